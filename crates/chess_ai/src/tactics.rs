//! Tactical shortcuts tried before the full search at the top difficulty
//!
//! - [`find_forced_mate`]: mate in one, then a verified mate in two
//! - [`find_safe_capture`]: the most valuable capture that does not walk
//!   into a mate or a losing sequence
//!
//! Both functions restore the position before returning.

use crate::constants::{piece_value, LOSS_THRESHOLD, SCORE_INFINITY};
use crate::error::ChessEngineResult;
use crate::rules::{MoveFilter, RulesEngine};
use crate::search::{quiesce, MoveGuard, SearchContext};
use crate::types::{ChessMove, Color};
use tracing::debug;

/// Some move of the side to move that checkmates immediately
fn mate_in_one<R: RulesEngine + ?Sized>(rules: &mut R) -> ChessEngineResult<Option<ChessMove>> {
    for mv in rules.legal_moves(MoveFilter::All) {
        let child = MoveGuard::apply(rules, &mv)?;
        if child.is_checkmate() {
            return Ok(Some(mv));
        }
    }
    Ok(None)
}

/// Whether every reply of the side to move runs into a mate in one
///
/// False when there are no replies (stalemate or mate already).
fn every_reply_allows_mate<R: RulesEngine + ?Sized>(rules: &mut R) -> ChessEngineResult<bool> {
    let replies = rules.legal_moves(MoveFilter::All);
    if replies.is_empty() {
        return Ok(false);
    }
    for reply in &replies {
        let mut child = MoveGuard::apply(rules, reply)?;
        if mate_in_one(&mut *child)?.is_none() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Forced mate for the side to move within two of its own moves
///
/// Mate in one is tried first. For mate in two, a candidate qualifies only
/// when the opponent has at least one reply and every reply can be met by an
/// immediate mate.
///
/// # Errors
///
/// Propagates rules engine failures while applying moves.
pub fn find_forced_mate<R: RulesEngine + ?Sized>(rules: &mut R) -> ChessEngineResult<Option<ChessMove>> {
    if let Some(mv) = mate_in_one(rules)? {
        debug!(mv = %mv, "mate in one");
        return Ok(Some(mv));
    }

    for mv in rules.legal_moves(MoveFilter::All) {
        let mut child = MoveGuard::apply(rules, &mv)?;
        if every_reply_allows_mate(&mut *child)? {
            debug!(mv = %mv, "mate in two");
            return Ok(Some(mv));
        }
    }
    Ok(None)
}

/// Best capture that is safe for `perspective`
///
/// Captures are tried in descending captured-piece value (stable for ties).
/// A capture is accepted when, after it:
/// - the opponent has no mate in one, and
/// - the quiescence-refined score is at least [`LOSS_THRESHOLD`] and no
///   worse than the static score before the capture.
///
/// The second bound is stricter than the loss threshold alone: a capture
/// that leaves the mover worse off than not capturing is not taken.
///
/// # Errors
///
/// Propagates rules engine failures while applying moves.
pub fn find_safe_capture<R: RulesEngine + ?Sized>(
    rules: &mut R,
    perspective: Color,
    ctx: &mut SearchContext,
) -> ChessEngineResult<Option<ChessMove>> {
    let mut captures: Vec<ChessMove> = rules
        .legal_moves(MoveFilter::All)
        .into_iter()
        .filter(ChessMove::is_capture)
        .collect();
    if captures.is_empty() {
        return Ok(None);
    }
    captures.sort_by_key(|mv| std::cmp::Reverse(mv.captured.map_or(0, piece_value)));

    let baseline = ctx.evaluator.evaluate(&*rules, perspective);
    let depth = ctx.quiescence_depth.max(1);

    for mv in captures {
        let mut child = MoveGuard::apply(rules, &mv)?;

        if mate_in_one(&mut *child)?.is_some() {
            debug!(mv = %mv, "capture allows mate, skipped");
            continue;
        }

        // Opponent to move: quiescence is relative to them
        let relative = quiesce(&mut *child, -SCORE_INFINITY, SCORE_INFINITY, depth, ctx)?;
        let refined = if child.side_to_move() == perspective {
            relative
        } else {
            -relative
        };

        if refined >= LOSS_THRESHOLD && refined >= baseline {
            debug!(mv = %mv, refined, baseline, "safe capture");
            return Ok(Some(mv));
        }
        debug!(mv = %mv, refined, baseline, "capture rejected");
    }
    Ok(None)
}
