//! Public API for the move-selection engine
//!
//! - `select` - Pick a move for a difficulty level or an explicit config
//! - `hint` - One-ply suggestion with a plain-language reason
//! - `analysis` - Grade played moves against the engine's choice

mod analysis;
mod hint;
mod select;

pub use analysis::{
    analyze_line, analyze_move, AnalysisNote, MoveAnalysis, MoveQuality, DEFAULT_ANALYSIS_DEPTH,
};
pub use hint::{hint, AdvantageBand, Hint, HintReason};
pub use select::{select_move, select_move_with, MoveSource, SearchOutcome};
