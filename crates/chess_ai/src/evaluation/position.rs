//! Full position evaluation
//!
//! Evaluates positions using material, check, mobility and whichever
//! positional terms the [`TermSet`] enables.

use super::king_safety::king_safety;
use super::material::material_balance;
use super::pawns::pawn_structure;
use super::pst::positional_balance;
use super::space::space;
use super::threats::threats;
use super::{EvalWeights, TermSet};
use crate::constants::{Score, DRAW_SCORE, MATE_SCORE};
use crate::rules::{MoveFilter, RulesEngine};
use crate::types::{Color, Square};
use serde::{Deserialize, Serialize};

/// Configured static evaluator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evaluator {
    pub terms: TermSet,
    pub weights: EvalWeights,
}

impl Evaluator {
    pub const fn new(terms: TermSet) -> Self {
        Self {
            terms,
            weights: EvalWeights::STANDARD,
        }
    }

    pub const fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Score `rules` in centipawns from `perspective`
    ///
    /// Pure function of the position: nothing is cached between calls.
    pub fn evaluate<R: RulesEngine + ?Sized>(&self, rules: &R, perspective: Color) -> Score {
        let mover = rules.side_to_move();

        // The side to move is the side that has been mated
        if rules.is_checkmate() {
            return if mover == perspective {
                -MATE_SCORE
            } else {
                MATE_SCORE
            };
        }
        if rules.is_draw() {
            return DRAW_SCORE;
        }

        let board = rules.board_snapshot();
        let weights = &self.weights;
        let mover_sign = mover.sign_for(perspective);
        let moves = rules.legal_moves(MoveFilter::All);

        let mut score = material_balance(&board, perspective);

        if rules.is_check() {
            score -= mover_sign * weights.check;
        }

        score += mover_sign * moves.len() as Score * weights.mobility;

        if self.terms.piece_square {
            score += positional_balance(&board, perspective);
        }

        if self.terms.center_control {
            let controlled = Square::CENTER
                .iter()
                .filter(|&&center| moves.iter().any(|mv| mv.from == center))
                .count() as Score;
            score += mover_sign * controlled * weights.center_control;
        }

        if self.terms.king_safety {
            score += king_safety(rules, &board, perspective, weights);
        }

        if self.terms.pawn_structure {
            score += pawn_structure(&board, perspective, weights);
        }

        if self.terms.space {
            score += space(&board, perspective, weights.space);
        }

        if self.terms.threats {
            score += threats(rules, perspective, weights.threat);
        }

        score
    }

    /// Score from the side to move's point of view (negamax convention)
    pub fn evaluate_for_mover<R: RulesEngine + ?Sized>(&self, rules: &R) -> Score {
        self.evaluate(rules, rules.side_to_move())
    }
}

/// Evaluate full position (every term enabled, standard weights)
pub fn evaluate_position<R: RulesEngine + ?Sized>(rules: &R, perspective: Color) -> Score {
    Evaluator::new(TermSet::FULL).evaluate(rules, perspective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StandardBoard;

    #[test]
    fn test_starting_position_only_mobility_differs() {
        let board = StandardBoard::startpos();
        // Everything is symmetric except the twenty moves of the side to move
        assert_eq!(evaluate_position(&board, Color::White), 20);
        assert_eq!(evaluate_position(&board, Color::Black), -20);
    }

    #[test]
    fn test_checkmate_scores() {
        // Back-rank mate, Black to move and mated
        let board = StandardBoard::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(evaluate_position(&board, Color::Black), -MATE_SCORE);
        assert_eq!(evaluate_position(&board, Color::White), MATE_SCORE);
    }

    #[test]
    fn test_draw_is_zero_for_both_sides() {
        let stalemate = StandardBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(evaluate_position(&stalemate, Color::White), 0);
        assert_eq!(evaluate_position(&stalemate, Color::Black), 0);
    }

    #[test]
    fn test_check_penalises_side_in_check() {
        // Black king on e8 checked by the e1 rook
        let board = StandardBoard::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").unwrap();
        let replies = board.legal_moves(MoveFilter::All).len() as Score;
        let basic = Evaluator::new(TermSet::BASIC);
        assert_eq!(basic.evaluate(&board, Color::White), 500 + 50 - replies);
    }

    #[test]
    fn test_perspectives_are_antisymmetric() {
        let fens = [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "r3k2r/pp3ppp/2n5/3q4/8/2N5/PP3PPP/R2QK2R b KQkq - 0 12",
            "8/5k2/8/3P4/8/8/5K2/8 w - - 0 50",
        ];
        for fen in fens {
            let board = StandardBoard::from_fen(fen).unwrap();
            assert_eq!(
                evaluate_position(&board, Color::White),
                -evaluate_position(&board, Color::Black),
                "{fen}"
            );
        }
    }

    #[test]
    fn test_evaluate_for_mover_matches_side_to_move() {
        let board = StandardBoard::startpos();
        let evaluator = Evaluator::default();
        assert_eq!(
            evaluator.evaluate_for_mover(&board),
            evaluator.evaluate(&board, Color::White)
        );
    }
}
