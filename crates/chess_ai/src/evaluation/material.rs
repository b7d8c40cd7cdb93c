//! Material evaluation
//!
//! Evaluates the material balance of a position by counting piece values.

use super::{occupied, BoardView};
use crate::constants::{piece_value, Score};
use crate::types::Color;

/// Material balance from `perspective`
pub(crate) fn material_balance(board: &BoardView, perspective: Color) -> Score {
    occupied(board)
        .map(|(_, piece)| piece.color.sign_for(perspective) * piece_value(piece.kind))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::QUEEN_VALUE;
    use crate::rules::{RulesEngine, StandardBoard};

    #[test]
    fn test_starting_position_material_balance() {
        let board = StandardBoard::startpos().board_snapshot();
        assert_eq!(
            material_balance(&board, Color::White),
            0,
            "Starting position should have 0 material balance"
        );
    }

    #[test]
    fn test_white_up_queen() {
        // Black queen removed from d8
        let board = StandardBoard::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap()
            .board_snapshot();
        assert_eq!(material_balance(&board, Color::White), QUEEN_VALUE);
        assert_eq!(material_balance(&board, Color::Black), -QUEEN_VALUE);
    }
}
