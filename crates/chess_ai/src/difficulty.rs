//! Difficulty levels and search configuration
//!
//! Each difficulty maps to a fixed [`SearchConfig`]. Configurations are
//! plain data: built per call, never mutated while a search runs, and
//! serde-loadable so front ends can override them from JSON.
//!
//! # Difficulty Levels
//!
//! | Difficulty | Strategy                       | Terms      | Ordering    | Quiescence |
//! |------------|--------------------------------|------------|-------------|------------|
//! | Easy       | Fixed depth 1                  | Basic      | Heuristic   | off        |
//! | Medium     | Fixed depth 2                  | Basic      | Heuristic   | off        |
//! | Hard       | Fixed depth 3                  | Positional | Static eval | off        |
//! | Expert     | Iterative to 6 plies, 3 s      | Full       | Heuristic   | 4 plies    |
//!
//! Expert also tries the tactical shortcuts (forced mate, safe capture)
//! before searching. Only Expert depends on the clock; the other levels are
//! deterministic for a given position.
//!
//! # Configuration File
//!
//! ```json
//! {
//!   "strategy": { "kind": "iterative_time_boxed", "max_depth": 5, "budget_ms": 1500, "tactical_shortcuts": true },
//!   "terms": { "threats": false },
//!   "ordering": "heuristic",
//!   "quiescence_depth": 3
//! }
//! ```

use crate::constants::{DEFAULT_BUDGET_MS, MAX_SEARCH_DEPTH};
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::evaluation::{EvalWeights, Evaluator, TermSet};
use crate::search::{OrderingStrategy, SearchContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How deep and how long to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStrategy {
    /// One search to exactly `depth` plies
    FixedDepth { depth: u8 },
    /// Deepen from 1 to `max_depth` until `budget_ms` runs out
    IterativeTimeBoxed {
        max_depth: u8,
        budget_ms: u64,
        #[serde(default)]
        tactical_shortcuts: bool,
    },
}

impl SearchStrategy {
    pub fn max_depth(&self) -> u8 {
        match *self {
            SearchStrategy::FixedDepth { depth } => depth,
            SearchStrategy::IterativeTimeBoxed { max_depth, .. } => max_depth,
        }
    }

    pub fn budget(&self) -> Option<Duration> {
        match *self {
            SearchStrategy::FixedDepth { .. } => None,
            SearchStrategy::IterativeTimeBoxed { budget_ms, .. } => Some(Duration::from_millis(budget_ms)),
        }
    }

    pub fn tactical_shortcuts(&self) -> bool {
        matches!(
            self,
            SearchStrategy::IterativeTimeBoxed {
                tactical_shortcuts: true,
                ..
            }
        )
    }
}

/// Complete description of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
    /// Evaluation terms switched on
    #[serde(default)]
    pub terms: TermSet,
    #[serde(default)]
    pub weights: EvalWeights,
    #[serde(default)]
    pub ordering: OrderingStrategy,
    /// Quiescence plies at the horizon, 0 disables quiescence
    #[serde(default)]
    pub quiescence_depth: u8,
    /// Search only the first N ordered moves below the root
    #[serde(default)]
    pub breadth_cutoff: Option<usize>,
}

impl SearchConfig {
    pub const fn fixed_depth(depth: u8, terms: TermSet, ordering: OrderingStrategy) -> Self {
        Self {
            strategy: SearchStrategy::FixedDepth { depth },
            terms,
            weights: EvalWeights::STANDARD,
            ordering,
            quiescence_depth: 0,
            breadth_cutoff: None,
        }
    }

    /// Reject depths outside `1..=MAX_SEARCH_DEPTH` and a zero breadth cutoff
    ///
    /// # Errors
    ///
    /// [`ChessEngineError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> ChessEngineResult<()> {
        let depth = self.strategy.max_depth();
        if depth == 0 || depth > MAX_SEARCH_DEPTH {
            return Err(ChessEngineError::InvalidConfig {
                message: format!("search depth {depth} outside 1..={MAX_SEARCH_DEPTH}"),
            });
        }
        if self.quiescence_depth > MAX_SEARCH_DEPTH {
            return Err(ChessEngineError::InvalidConfig {
                message: format!(
                    "quiescence depth {} above {MAX_SEARCH_DEPTH}",
                    self.quiescence_depth
                ),
            });
        }
        if self.breadth_cutoff == Some(0) {
            return Err(ChessEngineError::InvalidConfig {
                message: "breadth cutoff must keep at least one move".to_string(),
            });
        }
        Ok(())
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.terms).with_weights(self.weights)
    }

    /// Fresh search state for one call
    pub fn context(&self) -> SearchContext {
        SearchContext::new(self.evaluator(), self.ordering)
            .with_quiescence(self.quiescence_depth)
            .with_breadth_cutoff(self.breadth_cutoff)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// Engine strength
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// One ply, material and mobility only
    Easy,
    /// Two plies, material and mobility only
    #[default]
    Medium,
    /// Three plies with positional terms and evaluation-ordered moves
    Hard,
    /// Time-boxed iterative deepening with quiescence and tactical shortcuts
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Numeric level used by front ends, 1 (easy) to 4 (expert)
    ///
    /// # Errors
    ///
    /// [`ChessEngineError::InvalidDifficulty`] for levels outside 1..=4.
    pub fn from_level(level: u8) -> ChessEngineResult<Self> {
        match level {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            4 => Ok(Difficulty::Expert),
            _ => Err(ChessEngineError::InvalidDifficulty {
                value: level.to_string(),
            }),
        }
    }

    pub const fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// The search configuration this level plays with
    pub const fn config(self) -> SearchConfig {
        match self {
            Difficulty::Easy => SearchConfig::fixed_depth(1, TermSet::BASIC, OrderingStrategy::Heuristic),
            Difficulty::Medium => SearchConfig::fixed_depth(2, TermSet::BASIC, OrderingStrategy::Heuristic),
            Difficulty::Hard => {
                SearchConfig::fixed_depth(3, TermSet::POSITIONAL, OrderingStrategy::StaticEval)
            }
            Difficulty::Expert => SearchConfig {
                strategy: SearchStrategy::IterativeTimeBoxed {
                    max_depth: 6,
                    budget_ms: DEFAULT_BUDGET_MS,
                    tactical_shortcuts: true,
                },
                terms: TermSet::FULL,
                weights: EvalWeights::STANDARD,
                ordering: OrderingStrategy::Heuristic,
                quiescence_depth: 4,
                breadth_cutoff: None,
            },
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (1 ply, material)",
            Difficulty::Medium => "Medium (2 ply, material)",
            Difficulty::Hard => "Hard (3 ply, positional)",
            Difficulty::Expert => "Expert (iterative, tactics, 3s)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        })
    }
}

impl FromStr for Difficulty {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> ChessEngineResult<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        if let Ok(level) = normalized.parse::<u8>() {
            return Difficulty::from_level(level);
        }
        Difficulty::ALL
            .into_iter()
            .find(|d| d.to_string() == normalized)
            .ok_or(ChessEngineError::InvalidDifficulty {
                value: s.to_string(),
            })
    }
}
