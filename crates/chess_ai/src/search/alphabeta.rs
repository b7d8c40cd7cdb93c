//! Alpha-beta search
//!
//! Minimax with alpha-beta pruning. Every score is from `perspective`:
//! the maximizing player is whoever `perspective` is, the minimizing player
//! its opponent. The search recurses through [`MoveGuard`], so the position
//! is restored on every return path including errors.

use super::make_unmake::MoveGuard;
use super::ordering::order_moves;
use super::quiescence::quiesce;
use super::SearchContext;
use crate::constants::{Score, SCORE_INFINITY};
use crate::error::ChessEngineResult;
use crate::evaluation::Evaluator;
use crate::rules::{MoveFilter, RulesEngine};
use crate::types::{ChessMove, Color};
use tracing::trace;

/// Horizon value: static evaluation, or quiescence when enabled
fn leaf_score<R: RulesEngine + ?Sized>(
    rules: &mut R,
    alpha: Score,
    beta: Score,
    maximizing: bool,
    perspective: Color,
    ctx: &mut SearchContext,
) -> ChessEngineResult<Score> {
    if ctx.quiescence_depth == 0 || rules.is_terminal() {
        return Ok(ctx.evaluator.evaluate(&*rules, perspective));
    }

    // Quiescence scores are relative to the side to move
    let depth = ctx.quiescence_depth;
    if maximizing {
        quiesce(rules, alpha, beta, depth, ctx)
    } else {
        Ok(-quiesce(rules, -beta, -alpha, depth, ctx)?)
    }
}

/// Alpha-beta search
///
/// Returns the minimax value of the position to `depth` plies from
/// `perspective`, provided it lies inside `(alpha, beta)`; outside the window
/// the result is a bound on that value.
///
/// # Errors
///
/// Propagates rules engine failures while applying moves.
pub fn alphabeta<R: RulesEngine + ?Sized>(
    rules: &mut R,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    perspective: Color,
    ctx: &mut SearchContext,
) -> ChessEngineResult<Score> {
    ctx.stats.nodes += 1;

    if depth == 0 || rules.is_terminal() {
        return leaf_score(rules, alpha, beta, maximizing, perspective, ctx);
    }

    let mut moves = rules.legal_moves(MoveFilter::All);
    if moves.is_empty() {
        return Ok(ctx.evaluator.evaluate(&*rules, perspective));
    }
    order_moves(rules, &mut moves, ctx.ordering, &ctx.evaluator, None)?;
    if let Some(limit) = ctx.breadth_cutoff {
        moves.truncate(limit.max(1));
    }

    if maximizing {
        let mut best = -SCORE_INFINITY;
        for mv in &moves {
            let score = {
                let mut child = MoveGuard::apply(rules, mv)?;
                alphabeta(&mut *child, depth - 1, alpha, beta, false, perspective, ctx)?
            };
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                ctx.stats.cutoffs += 1;
                break;
            }
        }
        Ok(best)
    } else {
        let mut best = SCORE_INFINITY;
        for mv in &moves {
            let score = {
                let mut child = MoveGuard::apply(rules, mv)?;
                alphabeta(&mut *child, depth - 1, alpha, beta, true, perspective, ctx)?
            };
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                ctx.stats.cutoffs += 1;
                break;
            }
        }
        Ok(best)
    }
}

/// Search every root move to `depth` and return the best one
///
/// The root is maximizing when `perspective` is to move. Ties keep the
/// first move in search order. Returns `(None, static score)` when there
/// are no legal moves. The principal move in `ctx`, if any, is searched
/// first. The breadth cutoff never applies at the root.
///
/// # Errors
///
/// Propagates rules engine failures while applying moves.
pub fn find_best_move<R: RulesEngine + ?Sized>(
    rules: &mut R,
    depth: u8,
    perspective: Color,
    ctx: &mut SearchContext,
) -> ChessEngineResult<(Option<ChessMove>, Score)> {
    ctx.stats.nodes += 1;

    let mut moves = rules.legal_moves(MoveFilter::All);
    if moves.is_empty() {
        return Ok((None, ctx.evaluator.evaluate(&*rules, perspective)));
    }
    order_moves(rules, &mut moves, ctx.ordering, &ctx.evaluator, ctx.principal)?;

    let maximizing = rules.side_to_move() == perspective;
    let depth = depth.max(1);
    let mut alpha = -SCORE_INFINITY;
    let mut beta = SCORE_INFINITY;
    let mut best: Option<(ChessMove, Score)> = None;

    for mv in moves {
        let score = {
            let mut child = MoveGuard::apply(rules, &mv)?;
            alphabeta(&mut *child, depth - 1, alpha, beta, !maximizing, perspective, ctx)?
        };
        trace!(depth, mv = %mv, score, "root move");

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((mv, score));
        }

        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }

    Ok(match best {
        Some((mv, score)) => (Some(mv), score),
        None => (None, ctx.evaluator.evaluate(&*rules, perspective)),
    })
}

/// Plain minimax without pruning or quiescence
///
/// Visits the full tree, so only practical at shallow depths. Serves as the
/// reference value alpha-beta must reproduce.
///
/// # Errors
///
/// Propagates rules engine failures while applying moves.
pub fn minimax<R: RulesEngine + ?Sized>(
    rules: &mut R,
    depth: u8,
    maximizing: bool,
    perspective: Color,
    evaluator: &Evaluator,
) -> ChessEngineResult<Score> {
    if depth == 0 || rules.is_terminal() {
        return Ok(evaluator.evaluate(&*rules, perspective));
    }
    let moves = rules.legal_moves(MoveFilter::All);
    if moves.is_empty() {
        return Ok(evaluator.evaluate(&*rules, perspective));
    }

    let mut best = if maximizing {
        -SCORE_INFINITY
    } else {
        SCORE_INFINITY
    };
    for mv in &moves {
        let mut child = MoveGuard::apply(rules, mv)?;
        let score = minimax(&mut *child, depth - 1, !maximizing, perspective, evaluator)?;
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    Ok(best)
}
