//! Played-move analysis
//!
//! Compares a played move with the engine's choice at a shallow depth and
//! grades the difference in centipawns:
//!
//! | Loss       | Quality    |
//! |------------|------------|
//! | > 200      | Blunder    |
//! | > 100      | Mistake    |
//! | > 50       | Inaccuracy |
//! | > 10       | Good       |
//! | otherwise  | Excellent  |

use super::select::select_move_with;
use crate::constants::Score;
use crate::difficulty::SearchConfig;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::evaluation::{Evaluator, TermSet};
use crate::rules::{MoveFilter, RulesEngine};
use crate::search::{MoveGuard, OrderingStrategy};
use crate::types::{ChessMove, PieceKind, UciMove};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Depth used when grading moves
pub const DEFAULT_ANALYSIS_DEPTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveQuality {
    Excellent,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl MoveQuality {
    pub fn from_loss(loss: Score) -> Self {
        match loss {
            l if l > 200 => MoveQuality::Blunder,
            l if l > 100 => MoveQuality::Mistake,
            l if l > 50 => MoveQuality::Inaccuracy,
            l if l > 10 => MoveQuality::Good,
            _ => MoveQuality::Excellent,
        }
    }
}

impl fmt::Display for MoveQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveQuality::Excellent => "Excellent move",
            MoveQuality::Good => "Good move",
            MoveQuality::Inaccuracy => "Inaccuracy",
            MoveQuality::Mistake => "Mistake",
            MoveQuality::Blunder => "Blunder",
        })
    }
}

/// Observations about the played move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisNote {
    Captured(PieceKind),
    Promoted(PieceKind),
    Castled,
    MissedCapture(PieceKind),
    MissedCastling,
}

impl fmt::Display for AnalysisNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisNote::Captured(kind) => write!(f, "Captured {kind}"),
            AnalysisNote::Promoted(kind) => write!(f, "Promoted to {kind}"),
            AnalysisNote::Castled => f.write_str("Castled for king safety"),
            AnalysisNote::MissedCapture(kind) => write!(f, "Missed chance to capture {kind}"),
            AnalysisNote::MissedCastling => f.write_str("Missed better castling opportunity"),
        }
    }
}

/// Grade of one played move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAnalysis {
    pub played: ChessMove,
    pub best: Option<ChessMove>,
    /// Static score after the played move, from the mover
    pub played_score: Score,
    /// Static score after the engine's move, from the mover
    pub best_score: Score,
    /// `best_score - played_score`
    pub loss: Score,
    pub quality: MoveQuality,
    pub notes: Vec<AnalysisNote>,
}

fn notes_for(played: &ChessMove, best: Option<&ChessMove>) -> Vec<AnalysisNote> {
    let mut notes = Vec::new();
    if let Some(kind) = played.captured {
        notes.push(AnalysisNote::Captured(kind));
    } else if let Some(kind) = played.promotion {
        notes.push(AnalysisNote::Promoted(kind));
    } else if played.is_castle() {
        notes.push(AnalysisNote::Castled);
    }

    if let Some(best) = best {
        if let (Some(kind), None) = (best.captured, played.captured) {
            notes.push(AnalysisNote::MissedCapture(kind));
        }
        if best.is_castle() && !played.is_castle() {
            notes.push(AnalysisNote::MissedCastling);
        }
    }
    notes
}

/// Grade `played` against the engine's best move at `depth`
///
/// # Errors
///
/// `IllegalMove` when `played` is not legal in the current position, and
/// rules engine failures during the search.
pub fn analyze_move<R: RulesEngine + ?Sized>(
    rules: &mut R,
    played: &ChessMove,
    depth: u8,
) -> ChessEngineResult<MoveAnalysis> {
    let mover = rules.side_to_move();
    let config = SearchConfig::fixed_depth(depth, TermSet::FULL, OrderingStrategy::Heuristic);
    let evaluator = Evaluator::new(TermSet::FULL);

    let played_score = {
        let child = MoveGuard::apply(rules, played)?;
        evaluator.evaluate(&*child, mover)
    };

    let best = select_move_with(rules, &config, mover)?.best_move;
    let best_score = match &best {
        Some(mv) => {
            let child = MoveGuard::apply(rules, mv)?;
            evaluator.evaluate(&*child, mover)
        }
        None => played_score,
    };

    let loss = best_score - played_score;
    let quality = MoveQuality::from_loss(loss);
    debug!(played = %played, loss, ?quality, "move graded");

    Ok(MoveAnalysis {
        played: *played,
        best,
        played_score,
        best_score,
        loss,
        quality,
        notes: notes_for(played, best.as_ref()),
    })
}

fn resolve<R: RulesEngine + ?Sized>(rules: &R, wanted: &UciMove) -> ChessEngineResult<ChessMove> {
    rules
        .legal_moves(MoveFilter::From(wanted.from))
        .into_iter()
        .find(|mv| wanted.matches(mv))
        .ok_or_else(|| ChessEngineError::IllegalMove {
            uci: wanted.to_string(),
            fen: rules.serialize(),
        })
}

fn analyze_each<R: RulesEngine + ?Sized>(
    rules: &mut R,
    moves: &[UciMove],
    depth: u8,
    applied: &mut usize,
    out: &mut Vec<MoveAnalysis>,
) -> ChessEngineResult<()> {
    for wanted in moves {
        let played = resolve(&*rules, wanted)?;
        out.push(analyze_move(rules, &played, depth)?);
        rules.apply_move(&played)?;
        *applied += 1;
    }
    Ok(())
}

/// Grade a sequence of moves played from the current position
///
/// The position is restored before returning, also on error.
///
/// # Errors
///
/// `IllegalMove` naming the first move that is not legal where it is played.
pub fn analyze_line<R: RulesEngine + ?Sized>(
    rules: &mut R,
    moves: &[UciMove],
    depth: u8,
) -> ChessEngineResult<Vec<MoveAnalysis>> {
    let mut applied = 0;
    let mut analyses = Vec::with_capacity(moves.len());
    let result = analyze_each(rules, moves, depth, &mut applied, &mut analyses);
    for _ in 0..applied {
        rules.undo_move()?;
    }
    result.map(|()| analyses)
}
