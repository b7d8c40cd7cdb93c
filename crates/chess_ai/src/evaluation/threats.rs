//! Threats: forcing moves available to the side to move

use crate::constants::Score;
use crate::rules::{MoveFilter, RulesEngine};
use crate::types::Color;

/// Captures, promotions and checks available to the side to move, signed
/// toward that side
pub(crate) fn threats<R: RulesEngine + ?Sized>(rules: &R, perspective: Color, weight: Score) -> Score {
    let forcing = rules.legal_moves(MoveFilter::Tactical).len() as Score;
    rules.side_to_move().sign_for(perspective) * forcing * weight
}
