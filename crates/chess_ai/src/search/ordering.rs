//! Move ordering for alpha-beta pruning
//!
//! Orders moves to maximize alpha-beta pruning efficiency by trying
//! the most forcing moves first. Ordering never changes the value a search
//! returns, only how much of the tree it visits. All strategies sort
//! stably, so equal keys keep generation order.

use super::make_unmake::MoveGuard;
use crate::constants::{
    piece_value, Score, CHECK_ORDER_BONUS, PRINCIPAL_ORDER_KEY, PROMOTION_ORDER_BONUS,
};
use crate::error::ChessEngineResult;
use crate::evaluation::Evaluator;
use crate::rules::RulesEngine;
use crate::types::ChessMove;
use serde::{Deserialize, Serialize};

/// How candidate moves are ranked before searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingStrategy {
    /// MVV-LVA captures, promotions and checks, no lookahead
    #[default]
    Heuristic,
    /// One-ply static evaluation of every child
    StaticEval,
    /// Generation order
    None,
}

/// Heuristic key: captures by victim value, then promotions and checks
fn heuristic_key<R: RulesEngine + ?Sized>(rules: &R, mv: &ChessMove) -> Score {
    let mut key = 0;

    // MVV-LVA: Most Valuable Victim - Least Valuable Attacker
    if let Some(victim) = mv.captured {
        key += piece_value(victim) * 10 - piece_value(mv.piece) / 10;
    }

    if mv.is_promotion() {
        key += PROMOTION_ORDER_BONUS;
    }

    if rules.gives_check(mv) {
        key += CHECK_ORDER_BONUS;
    }

    key
}

/// Order moves in place, best first
///
/// `principal` (the best move of a previous iteration) is always placed
/// first when present in `moves`.
///
/// # Errors
///
/// Only [`OrderingStrategy::StaticEval`] touches the position; a rules
/// engine failure while applying a child is propagated.
pub(crate) fn order_moves<R: RulesEngine + ?Sized>(
    rules: &mut R,
    moves: &mut Vec<ChessMove>,
    strategy: OrderingStrategy,
    evaluator: &Evaluator,
    principal: Option<ChessMove>,
) -> ChessEngineResult<()> {
    let mut keyed: Vec<(Score, ChessMove)> = Vec::with_capacity(moves.len());
    let mover = rules.side_to_move();

    for mv in moves.iter() {
        let key = if principal.as_ref() == Some(mv) {
            PRINCIPAL_ORDER_KEY
        } else {
            match strategy {
                OrderingStrategy::Heuristic => heuristic_key(&*rules, mv),
                OrderingStrategy::StaticEval => {
                    let child = MoveGuard::apply(rules, mv)?;
                    evaluator.evaluate(&*child, mover)
                }
                OrderingStrategy::None => 0,
            }
        };
        keyed.push((key, *mv));
    }

    // Stable sort by key (descending)
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    moves.clear();
    moves.extend(keyed.into_iter().map(|(_, mv)| mv));
    Ok(())
}
