//! Rules engine boundary
//!
//! The search never generates moves or decides legality itself. Everything it
//! knows about chess rules comes through [`RulesEngine`]. Positions are
//! mutated only via [`RulesEngine::apply_move`] / [`RulesEngine::undo_move`]
//! in strict LIFO order.
//!
//! ## Module Organization
//!
//! - `standard_board` - [`StandardBoard`], a rules engine over `shakmaty`

mod standard_board;

pub use standard_board::StandardBoard;

use crate::error::ChessEngineResult;
use crate::types::{ChessMove, Color, Piece, Square};

/// Restricts which legal moves are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFilter {
    /// Every legal move
    All,
    /// Legal moves of the piece standing on the square
    From(Square),
    /// Captures, promotions and check-giving moves
    Tactical,
}

/// Board snapshot indexed `[rank][file]`, rank 0 is White's back rank
pub type BoardSnapshot = [[Option<Piece>; 8]; 8];

/// External collaborator supplying chess rules to the engine
pub trait RulesEngine {
    /// Legal moves for the side to move
    fn legal_moves(&self, filter: MoveFilter) -> Vec<ChessMove>;

    /// Apply a legal move
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChessEngineError::IllegalMove`] when `mv` is not in
    /// the current legal move list. The position is left unchanged.
    fn apply_move(&mut self, mv: &ChessMove) -> ChessEngineResult<()>;

    /// Revert the most recently applied move
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChessEngineError::UndoWithoutMove`] when no move has
    /// been applied.
    fn undo_move(&mut self) -> ChessEngineResult<()>;

    fn is_checkmate(&self) -> bool;

    /// Stalemate, insufficient material, threefold repetition or fifty-move rule
    fn is_draw(&self) -> bool;

    fn is_check(&self) -> bool;

    fn side_to_move(&self) -> Color;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Number of pieces of colour `by` attacking `square`
    fn attackers(&self, square: Square, by: Color) -> u32;

    /// Whether playing `mv` would put the opponent in check
    fn gives_check(&self, mv: &ChessMove) -> bool;

    /// Position as a FEN string
    fn serialize(&self) -> String;

    fn board_snapshot(&self) -> BoardSnapshot {
        let mut snapshot = [[None; 8]; 8];
        for square in Square::all() {
            snapshot[square.rank() as usize][square.file() as usize] = self.piece_at(square);
        }
        snapshot
    }

    fn is_terminal(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }
}
