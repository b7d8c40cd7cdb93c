//! Move selection entry points

use crate::constants::{Score, MATE_SCORE};
use crate::difficulty::{Difficulty, SearchConfig, SearchStrategy};
use crate::error::ChessEngineResult;
use crate::rules::{MoveFilter, RulesEngine};
use crate::search::{find_best_move, iterative_deepening, MoveGuard, SearchContext, SearchStats};
use crate::tactics::{find_forced_mate, find_safe_capture};
use crate::types::{ChessMove, Color};
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Which stage of the engine produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSource {
    /// Alpha-beta search (fixed depth or iterative)
    Search,
    /// Forced-mate shortcut
    ForcedMate,
    /// Safe-capture shortcut
    SafeCapture,
    /// Side to move has no legal moves
    NoLegalMove,
}

/// Result of one move selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub best_move: Option<ChessMove>,
    /// Score of the chosen line from the requested perspective
    pub score: Score,
    /// Deepest completed search depth, 0 for shortcuts
    pub depth: u8,
    pub source: MoveSource,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Choose a move for `perspective` at the given difficulty
///
/// Returns `Ok(None)` when the side to move has no legal moves. The position
/// is unchanged when this returns.
///
/// # Errors
///
/// Propagates rules engine failures raised during the search.
pub fn select_move<R: RulesEngine + ?Sized>(
    rules: &mut R,
    difficulty: Difficulty,
    perspective: Color,
) -> ChessEngineResult<Option<ChessMove>> {
    Ok(select_move_with(rules, &difficulty.config(), perspective)?.best_move)
}

/// Choose a move with an explicit configuration and report how it was found
///
/// # Errors
///
/// `InvalidConfig` for configurations that fail validation; rules engine
/// failures raised during the search.
pub fn select_move_with<R: RulesEngine + ?Sized>(
    rules: &mut R,
    config: &SearchConfig,
    perspective: Color,
) -> ChessEngineResult<SearchOutcome> {
    config.validate()?;
    let start = Instant::now();
    let mut ctx = config.context();

    if rules.legal_moves(MoveFilter::All).is_empty() {
        debug!("no legal moves");
        return Ok(SearchOutcome {
            best_move: None,
            score: ctx.evaluator.evaluate(&*rules, perspective),
            depth: 0,
            source: MoveSource::NoLegalMove,
            stats: ctx.stats,
            elapsed: start.elapsed(),
        });
    }

    let (best_move, score, depth, source) = match config.strategy {
        SearchStrategy::FixedDepth { depth } => {
            let (best_move, score) = find_best_move(rules, depth, perspective, &mut ctx)?;
            (best_move, score, depth, MoveSource::Search)
        }
        SearchStrategy::IterativeTimeBoxed {
            max_depth,
            budget_ms,
            tactical_shortcuts,
        } => {
            let shortcut = if tactical_shortcuts && rules.side_to_move() == perspective {
                try_shortcuts(rules, perspective, &mut ctx)?
            } else {
                None
            };
            match shortcut {
                Some((mv, score, source)) => (Some(mv), score, 0, source),
                None => {
                    let budget = Duration::from_millis(budget_ms);
                    let result = iterative_deepening(rules, max_depth, budget, perspective, &mut ctx)?;
                    (result.best_move, result.score, result.depth, MoveSource::Search)
                }
            }
        }
    };

    let outcome = SearchOutcome {
        best_move,
        score,
        depth,
        source,
        stats: ctx.stats,
        elapsed: start.elapsed(),
    };
    info!(
        best = ?outcome.best_move.map(|m| m.to_string()),
        score = outcome.score,
        depth = outcome.depth,
        source = ?outcome.source,
        nodes = outcome.stats.nodes,
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        "move selected"
    );
    Ok(outcome)
}

fn try_shortcuts<R: RulesEngine + ?Sized>(
    rules: &mut R,
    perspective: Color,
    ctx: &mut SearchContext,
) -> ChessEngineResult<Option<(ChessMove, Score, MoveSource)>> {
    if let Some(mv) = find_forced_mate(rules)? {
        return Ok(Some((mv, MATE_SCORE, MoveSource::ForcedMate)));
    }
    if let Some(mv) = find_safe_capture(rules, perspective, ctx)? {
        let child = MoveGuard::apply(rules, &mv)?;
        let score = ctx.evaluator.evaluate(&*child, perspective);
        return Ok(Some((mv, score, MoveSource::SafeCapture)));
    }
    Ok(None)
}
