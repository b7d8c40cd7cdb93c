//! Static position evaluation
//!
//! Scores a position in centipawns from a fixed perspective. Terminal
//! positions short-circuit: checkmate is `±MATE_SCORE`, any draw is exactly 0.
//! Otherwise the score is the sum of:
//! - Material count (piece values)
//! - Check and mobility of the side to move
//! - Positional bonuses (piece-square tables)
//! - Centre control, king safety, pawn structure, space and threats
//!
//! ## Module Organization
//!
//! - `terms` - [`TermSet`] switches and [`EvalWeights`]
//! - `position` - [`Evaluator`], the full evaluation entry point
//! - `material` - Material balance
//! - `pst` - Piece-square tables
//! - `king_safety` - Open files, pawn shield, king-zone attacks
//! - `pawns` - Isolated and doubled pawns
//! - `space` - Central block occupation
//! - `threats` - Forcing moves available to the side to move

mod king_safety;
mod material;
mod pawns;
mod position;
mod pst;
mod space;
mod terms;
mod threats;

pub use position::{evaluate_position, Evaluator};
pub use pst::pst_value;
pub use terms::{EvalWeights, TermSet};

use crate::rules::BoardSnapshot;
use crate::types::{Piece, Square};

pub(crate) type BoardView = BoardSnapshot;

/// Occupied squares of a snapshot
pub(crate) fn occupied(board: &BoardView) -> impl Iterator<Item = (Square, Piece)> + '_ {
    Square::all().filter_map(move |sq| {
        board[sq.rank() as usize][sq.file() as usize].map(|piece| (sq, piece))
    })
}
