//! Quiescence search to avoid horizon effect
//!
//! Extends the search at the horizon along captures, promotions and checks
//! until the position is quiet or the quiescence depth runs out. Written in
//! negamax form: scores are relative to the side to move.

use super::make_unmake::MoveGuard;
use super::ordering::{order_moves, OrderingStrategy};
use super::SearchContext;
use crate::constants::Score;
use crate::error::ChessEngineResult;
use crate::rules::{MoveFilter, RulesEngine};

/// Quiescence search (fail-hard), scores relative to the side to move
///
/// The stand-pat evaluation is a lower bound: the side to move may decline
/// every tactical move. `depth` caps the number of tactical plies
/// independently of the main search depth.
///
/// # Errors
///
/// Propagates rules engine failures while applying tactical moves.
pub fn quiesce<R: RulesEngine + ?Sized>(
    rules: &mut R,
    mut alpha: Score,
    beta: Score,
    depth: u8,
    ctx: &mut SearchContext,
) -> ChessEngineResult<Score> {
    ctx.stats.qnodes += 1;

    // Stand-pat evaluation
    let stand_pat = ctx.evaluator.evaluate_for_mover(&*rules);
    if depth == 0 || rules.is_terminal() {
        return Ok(stand_pat);
    }

    // Beta cutoff
    if stand_pat >= beta {
        ctx.stats.cutoffs += 1;
        return Ok(beta);
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut moves = rules.legal_moves(MoveFilter::Tactical);
    if moves.is_empty() {
        return Ok(alpha);
    }
    order_moves(rules, &mut moves, OrderingStrategy::Heuristic, &ctx.evaluator, None)?;

    for mv in &moves {
        let score = {
            let mut child = MoveGuard::apply(rules, mv)?;
            -quiesce(&mut *child, -beta, -alpha, depth - 1, ctx)?
        };

        if score >= beta {
            ctx.stats.cutoffs += 1;
            return Ok(beta);
        }
        if score > alpha {
            alpha = score;
        }
    }

    Ok(alpha)
}
