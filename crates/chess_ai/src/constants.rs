//! # Score Constants and Search Limits
//!
//! All scores are centipawns (1/100th of a pawn) from the perspective of the
//! side the engine is searching for. Positive means good for that side.
//!
//! ## Piece values
//!
//! | Piece  | Value |
//! |--------|-------|
//! | Pawn   | 100   |
//! | Knight | 320   |
//! | Bishop | 330   |
//! | Rook   | 500   |
//! | Queen  | 900   |
//! | King   | 0     |
//!
//! Both sides always have exactly one king, so a king value would cancel out.
//! Losing the king is expressed by [`MATE_SCORE`] instead.
//!
//! ## Mate and window bounds
//!
//! [`MATE_SCORE`] dominates any material sum (the most material one side can
//! ever hold is well under 10,000). [`SCORE_INFINITY`] lies strictly outside
//! every reachable score and seeds the root alpha-beta window.

use crate::types::PieceKind;

/// Score type used throughout the engine (centipawns)
pub type Score = i32;

pub const PAWN_VALUE: Score = 100;
pub const KNIGHT_VALUE: Score = 320;
pub const BISHOP_VALUE: Score = 330;
pub const ROOK_VALUE: Score = 500;
pub const QUEEN_VALUE: Score = 900;
pub const KING_VALUE: Score = 0;

/// Score of a checkmated position for the winning side
pub const MATE_SCORE: Score = 100_000;

/// Scores with an absolute value at or above this are treated as forced mates
pub const MATE_THRESHOLD: Score = MATE_SCORE - 1_000;

/// Initial alpha-beta window bound
pub const SCORE_INFINITY: Score = 1_000_000;

/// Drawn positions score exactly zero
pub const DRAW_SCORE: Score = 0;

/// A safe capture must not leave the capturing side worse than this
pub const LOSS_THRESHOLD: Score = -500;

/// Hard ceiling on any configured search depth
pub const MAX_SEARCH_DEPTH: u8 = 16;

/// Default think time for the top difficulty tier
pub const DEFAULT_BUDGET_MS: u64 = 3_000;

/// Ordering bonus for promotions
pub const PROMOTION_ORDER_BONUS: Score = 800;

/// Ordering bonus for check-giving moves
pub const CHECK_ORDER_BONUS: Score = 50;

/// Ordering key used for the principal move from a previous iteration
pub const PRINCIPAL_ORDER_KEY: Score = Score::MAX;

/// Material value of a piece kind
pub const fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}
