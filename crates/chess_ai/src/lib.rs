//! Chess move selection
//!
//! A configurable engine that picks a move for one side of a chess game.
//! Rules (move generation, legality, draw detection) come from a
//! [`RulesEngine`] implementation; [`StandardBoard`] wraps `shakmaty` for
//! ordinary use.
//!
//! ```no_run
//! use chess_ai::{select_move, Difficulty, StandardBoard, types::Color};
//!
//! let mut board = StandardBoard::startpos();
//! let mv = select_move(&mut board, Difficulty::Hard, Color::White)?;
//! # Ok::<(), chess_ai::ChessEngineError>(())
//! ```

pub mod api;
pub mod constants;
pub mod difficulty;
pub mod error;
pub mod evaluation;
pub mod rules;
pub mod search;
pub mod tactics;
pub mod types;

pub use api::{
    analyze_line, analyze_move, hint, select_move, select_move_with, Hint, MoveAnalysis,
    MoveQuality, MoveSource, SearchOutcome,
};
pub use constants::{Score, MATE_SCORE};
pub use difficulty::{Difficulty, SearchConfig, SearchStrategy};
pub use error::{ChessEngineError, ChessEngineResult};
pub use evaluation::{evaluate_position, EvalWeights, Evaluator, TermSet};
pub use rules::{MoveFilter, RulesEngine, StandardBoard};

/// Standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
