//! Minimax search with alpha-beta pruning and iterative deepening
//!
//! This module implements the core AI search using:
//! - Minimax with alpha-beta pruning, scores from a fixed perspective
//! - Quiescence search at the horizon (negamax, relative to side to move)
//! - Iterative deepening for time management
//! - Move ordering for better pruning
//!
//! Positions are only touched through [`MoveGuard`], which undoes its move
//! when dropped, so the position a caller passes in is always restored.
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core alpha-beta search and the root move picker
//! - `quiescence` - Quiescence search to avoid horizon effect
//! - `ordering` - Move ordering heuristics
//! - `make_unmake` - Scoped make/undo guard
//! - `iterative` - Iterative deepening wrapper

mod alphabeta;
mod iterative;
mod make_unmake;
mod ordering;
mod quiescence;

pub use alphabeta::{alphabeta, find_best_move, minimax};
pub use iterative::{iterative_deepening, IterationResult};
pub use make_unmake::MoveGuard;
pub use ordering::OrderingStrategy;
pub use quiescence::quiesce;

use crate::evaluation::Evaluator;
use crate::types::ChessMove;
use serde::{Deserialize, Serialize};

/// Node counters collected during one search call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Main-search nodes visited
    pub nodes: u64,
    /// Quiescence nodes visited
    pub qnodes: u64,
    /// Beta cutoffs
    pub cutoffs: u64,
}

/// Per-call search state
///
/// Built fresh for every search from an immutable configuration; only the
/// statistics and the principal move change while searching.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub evaluator: Evaluator,
    pub ordering: OrderingStrategy,
    /// Quiescence plies at the horizon, 0 disables quiescence
    pub quiescence_depth: u8,
    /// Interior nodes search only this many ordered moves
    pub breadth_cutoff: Option<usize>,
    pub stats: SearchStats,
    /// Root move tried first (best move of the previous iteration)
    pub(crate) principal: Option<ChessMove>,
}

impl SearchContext {
    pub fn new(evaluator: Evaluator, ordering: OrderingStrategy) -> Self {
        Self {
            evaluator,
            ordering,
            quiescence_depth: 0,
            breadth_cutoff: None,
            stats: SearchStats::default(),
            principal: None,
        }
    }

    pub fn with_quiescence(mut self, depth: u8) -> Self {
        self.quiescence_depth = depth;
        self
    }

    pub fn with_breadth_cutoff(mut self, cutoff: Option<usize>) -> Self {
        self.breadth_cutoff = cutoff;
        self
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(Evaluator::default(), OrderingStrategy::default())
    }
}
