//! Move hints for the side to move
//!
//! Every legal move is scored one ply deep with the full evaluator; the best
//! one is suggested together with a reason and how much it improves the
//! position.

use crate::constants::Score;
use crate::error::ChessEngineResult;
use crate::evaluation::Evaluator;
use crate::rules::{MoveFilter, RulesEngine};
use crate::search::MoveGuard;
use crate::types::{ChessMove, PieceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the hinted move stands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintReason {
    Capture(PieceKind),
    Promotion(PieceKind),
    Castling,
    Positional,
}

impl HintReason {
    fn of(mv: &ChessMove) -> Self {
        if let Some(captured) = mv.captured {
            HintReason::Capture(captured)
        } else if let Some(promotion) = mv.promotion {
            HintReason::Promotion(promotion)
        } else if mv.is_castle() {
            HintReason::Castling
        } else {
            HintReason::Positional
        }
    }
}

/// How much the hinted move gains over the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvantageBand {
    /// Best of a set of bad options (gain of -10 or less)
    BestOfBad,
    /// Keeps the balance (above -10)
    Solid,
    /// Above 10
    Good,
    /// Above 50
    Strong,
    /// Above 150
    Decisive,
}

impl AdvantageBand {
    pub fn from_gain(gain: Score) -> Self {
        match gain {
            g if g > 150 => AdvantageBand::Decisive,
            g if g > 50 => AdvantageBand::Strong,
            g if g > 10 => AdvantageBand::Good,
            g if g > -10 => AdvantageBand::Solid,
            _ => AdvantageBand::BestOfBad,
        }
    }
}

/// Suggested move with an explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub best_move: ChessMove,
    /// Score after the move, from the side to move
    pub score: Score,
    /// Score after minus score before
    pub gain: Score,
    pub reason: HintReason,
    pub band: AdvantageBand,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            HintReason::Capture(kind) => write!(f, "Capturing the {kind} is the best move. ")?,
            HintReason::Promotion(kind) => write!(f, "Promote to a {kind}. ")?,
            HintReason::Castling => f.write_str("Castling is a good idea to improve king safety. ")?,
            HintReason::Positional => f.write_str("This move improves your position. ")?,
        }
        f.write_str(match self.band {
            AdvantageBand::Decisive => "It gives you a decisive advantage!",
            AdvantageBand::Strong => "An excellent move that clearly improves your position.",
            AdvantageBand::Good => "A good move that gives you an edge.",
            AdvantageBand::Solid => "A solid move that keeps the balance.",
            AdvantageBand::BestOfBad => "The best available move in a difficult position.",
        })
    }
}

/// Best one-ply move for the side to move, `None` without legal moves
///
/// # Errors
///
/// Propagates rules engine failures while trying moves.
pub fn hint<R: RulesEngine + ?Sized>(rules: &mut R) -> ChessEngineResult<Option<Hint>> {
    let evaluator = Evaluator::default();
    let mover = rules.side_to_move();
    let before = evaluator.evaluate(&*rules, mover);

    let mut best: Option<(ChessMove, Score)> = None;
    for mv in rules.legal_moves(MoveFilter::All) {
        let score = {
            let child = MoveGuard::apply(rules, &mv)?;
            evaluator.evaluate(&*child, mover)
        };
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    Ok(best.map(|(best_move, score)| {
        let gain = score - before;
        Hint {
            best_move,
            score,
            gain,
            reason: HintReason::of(&best_move),
            band: AdvantageBand::from_gain(gain),
        }
    }))
}
