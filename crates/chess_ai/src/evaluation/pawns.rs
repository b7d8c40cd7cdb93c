//! Pawn structure: isolated and doubled pawns

use super::{occupied, BoardView, EvalWeights};
use crate::constants::Score;
use crate::types::{Color, PieceKind};

/// Pawn count per file for one colour
fn pawn_files(board: &BoardView, color: Color) -> [u8; 8] {
    let mut files = [0u8; 8];
    for (square, piece) in occupied(board) {
        if piece.color == color && piece.kind == PieceKind::Pawn {
            files[square.file() as usize] += 1;
        }
    }
    files
}

fn structure_for(board: &BoardView, color: Color, weights: &EvalWeights) -> Score {
    let files = pawn_files(board, color);
    let mut score = 0;
    for (file, &count) in files.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let left = file.checked_sub(1).map_or(0, |f| files[f]);
        let right = files.get(file + 1).copied().unwrap_or(0);
        if left == 0 && right == 0 {
            score -= Score::from(count) * weights.isolated_pawn;
        }
        if count > 1 {
            score -= Score::from(count - 1) * weights.doubled_pawn;
        }
    }
    score
}

pub(crate) fn pawn_structure(board: &BoardView, perspective: Color, weights: &EvalWeights) -> Score {
    Color::ALL
        .into_iter()
        .map(|color| color.sign_for(perspective) * structure_for(board, color, weights))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RulesEngine, StandardBoard};

    fn structure(fen: &str, color: Color) -> Score {
        let board = StandardBoard::from_fen(fen).unwrap().board_snapshot();
        structure_for(&board, color, &EvalWeights::STANDARD)
    }

    #[test]
    fn test_isolated_pawn() {
        // a2 and c2: both isolated
        assert_eq!(structure("4k3/8/8/8/8/8/P1P5/4K3 w - - 0 1", Color::White), -30);
        // a2 b2: connected
        assert_eq!(structure("4k3/8/8/8/8/8/PP6/4K3 w - - 0 1", Color::White), 0);
    }

    #[test]
    fn test_doubled_pawns() {
        // e2 e3 with d2 support: doubled but not isolated
        assert_eq!(structure("4k3/8/8/8/8/4P3/3PP3/4K3 w - - 0 1", Color::White), -10);
        // Lone doubled pair is isolated twice and doubled once
        assert_eq!(structure("4k3/8/8/8/8/4P3/4P3/4K3 w - - 0 1", Color::White), -40);
    }

    #[test]
    fn test_balance_is_signed() {
        let board = StandardBoard::from_fen("4k3/8/8/8/8/8/P1P5/4K3 w - - 0 1")
            .unwrap()
            .board_snapshot();
        assert_eq!(pawn_structure(&board, Color::White, &EvalWeights::STANDARD), -30);
        assert_eq!(pawn_structure(&board, Color::Black, &EvalWeights::STANDARD), 30);
    }
}
