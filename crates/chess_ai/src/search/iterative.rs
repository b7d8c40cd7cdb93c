//! Iterative deepening search
//!
//! Searches depth 1, 2, 3, ... and keeps the result of the deepest completed
//! iteration. The clock is only checked between iterations, so an iteration
//! that has started always finishes and depth 1 always runs. A new iteration
//! is skipped when the last one, scaled by [`BRANCHING_ESTIMATE`], would not
//! fit in the time left.

use super::alphabeta::find_best_move;
use super::SearchContext;
use crate::constants::{Score, MATE_THRESHOLD};
use crate::error::ChessEngineResult;
use crate::rules::RulesEngine;
use crate::types::{ChessMove, Color};
use instant::Instant;
use std::time::Duration;
use tracing::debug;

/// Assumed cost ratio between consecutive iterations
pub const BRANCHING_ESTIMATE: u32 = 4;

/// Whether another iteration is expected to finish inside `budget`
fn next_iteration_fits(elapsed: Duration, last_iteration: Duration, budget: Duration) -> bool {
    elapsed < budget && last_iteration.saturating_mul(BRANCHING_ESTIMATE) <= budget - elapsed
}

/// Outcome of the deepest completed iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationResult {
    pub best_move: Option<ChessMove>,
    pub score: Score,
    pub depth: u8,
}

/// Iterative deepening search
///
/// Stops after `max_depth`, when `budget` has elapsed at an iteration
/// boundary, when the next iteration is not expected to fit in what is left
/// of it, or as soon as an iteration proves a forced mate either way.
/// Each iteration searches the previous iteration's best move first.
///
/// # Errors
///
/// Propagates rules engine failures from the underlying search.
pub fn iterative_deepening<R: RulesEngine + ?Sized>(
    rules: &mut R,
    max_depth: u8,
    budget: Duration,
    perspective: Color,
    ctx: &mut SearchContext,
) -> ChessEngineResult<IterationResult> {
    let start_time = Instant::now();
    let mut result = IterationResult {
        best_move: None,
        score: ctx.evaluator.evaluate(&*rules, perspective),
        depth: 0,
    };

    let mut last_iteration = Duration::ZERO;

    for depth in 1..=max_depth.max(1) {
        // Check time
        let elapsed = start_time.elapsed();
        if depth > 1 && !next_iteration_fits(elapsed, last_iteration, budget) {
            debug!(
                depth,
                elapsed_ms = elapsed.as_millis() as u64,
                last_ms = last_iteration.as_millis() as u64,
                "budget spent"
            );
            break;
        }

        ctx.principal = result.best_move;
        let iteration_start = Instant::now();
        let (best_move, score) = find_best_move(rules, depth, perspective, ctx)?;
        last_iteration = iteration_start.elapsed();
        result = IterationResult {
            best_move,
            score,
            depth,
        };
        debug!(
            depth,
            score,
            best = ?best_move.map(|m| m.to_string()),
            nodes = ctx.stats.nodes,
            "iteration complete"
        );

        if best_move.is_none() {
            break;
        }

        // Check for checkmate
        if score.abs() >= MATE_THRESHOLD {
            debug!(depth, score, "forced mate found, stopping");
            break;
        }
    }

    ctx.principal = None;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MATE_SCORE;
    use crate::evaluation::{Evaluator, TermSet};
    use crate::rules::{MoveFilter, StandardBoard};
    use crate::search::OrderingStrategy;

    fn ctx() -> SearchContext {
        SearchContext::new(Evaluator::new(TermSet::BASIC), OrderingStrategy::Heuristic)
    }

    #[test]
    fn test_next_iteration_fits() {
        let ms = Duration::from_millis;
        assert!(next_iteration_fits(ms(100), ms(50), ms(3000)));
        // 2900 ms in, a 200 ms iteration predicts 800 ms more
        assert!(!next_iteration_fits(ms(2900), ms(200), ms(3000)));
        assert!(next_iteration_fits(ms(2000), ms(250), ms(3000)));
        assert!(!next_iteration_fits(ms(3000), ms(0), ms(3000)));
        assert!(!next_iteration_fits(ms(10), ms(0), Duration::ZERO));
    }

    #[test]
    fn test_zero_budget_still_returns_legal_move() {
        let mut board = StandardBoard::startpos();
        let result =
            iterative_deepening(&mut board, 6, Duration::ZERO, Color::White, &mut ctx()).unwrap();

        assert_eq!(result.depth, 1, "Only the first iteration may run");
        let best = result.best_move.expect("Should find a move");
        assert!(board.legal_moves(MoveFilter::All).contains(&best));
    }

    #[test]
    fn test_runs_to_max_depth_with_generous_budget() {
        let mut board = StandardBoard::startpos();
        let result = iterative_deepening(
            &mut board,
            3,
            Duration::from_secs(600),
            Color::White,
            &mut ctx(),
        )
        .unwrap();
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn test_stops_early_on_mate() {
        let mut board = StandardBoard::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let result = iterative_deepening(
            &mut board,
            6,
            Duration::from_secs(600),
            Color::White,
            &mut ctx(),
        )
        .unwrap();
        assert_eq!(result.depth, 1);
        assert_eq!(result.score, MATE_SCORE);
        assert_eq!(result.best_move.unwrap().to_string(), "a1a8");
    }

    #[test]
    fn test_matches_fixed_depth_result() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut board = StandardBoard::from_fen(fen).unwrap();
        let deepened = iterative_deepening(
            &mut board,
            2,
            Duration::from_secs(600),
            Color::White,
            &mut ctx(),
        )
        .unwrap();
        let (_, fixed) = find_best_move(&mut board, 2, Color::White, &mut ctx()).unwrap();
        assert_eq!(deepened.score, fixed, "Principal-first ordering keeps the value");
        assert_eq!(board.serialize(), fen);
    }

    #[test]
    fn test_no_legal_moves() {
        let mut board = StandardBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let result = iterative_deepening(
            &mut board,
            4,
            Duration::from_secs(1),
            Color::Black,
            &mut ctx(),
        )
        .unwrap();
        assert!(result.best_move.is_none());
        assert_eq!(result.score, 0);
    }
}
