//! King safety: open files around the king, pawn shield, and pressure on the
//! king zone.

use super::{BoardView, EvalWeights};
use crate::constants::Score;
use crate::rules::RulesEngine;
use crate::types::{Color, Piece, PieceKind, Square};

fn king_square(board: &BoardView, color: Color) -> Option<Square> {
    let king = Some(Piece::new(color, PieceKind::King));
    Square::all().find(|sq| board[sq.rank() as usize][sq.file() as usize] == king)
}

fn is_friendly_pawn(board: &BoardView, square: Square, color: Color) -> bool {
    board[square.rank() as usize][square.file() as usize] == Some(Piece::new(color, PieceKind::Pawn))
}

fn file_has_pawn(board: &BoardView, file: u8, color: Color) -> bool {
    (0..8).any(|rank| {
        Square::from_coords(file, rank).is_some_and(|sq| is_friendly_pawn(board, sq, color))
    })
}

/// Safety score of one king from its owner's view
fn king_safety_for<R: RulesEngine + ?Sized>(
    rules: &R,
    board: &BoardView,
    color: Color,
    weights: &EvalWeights,
) -> Score {
    let Some(king) = king_square(board, color) else {
        return 0;
    };
    let mut score = 0;

    for df in -1..=1i8 {
        let file = king.file() as i8 + df;
        if (0..8).contains(&file) && !file_has_pawn(board, file as u8, color) {
            score -= weights.king_open_file;
        }
        if let Some(shield) = king.offset(df, color.forward()) {
            if is_friendly_pawn(board, shield, color) {
                score += weights.king_pawn_shield;
            }
        }
    }

    let enemy = color.opponent();
    let zone_attacks: u32 = (-1..=1i8)
        .flat_map(|df| (-1..=1i8).map(move |dr| (df, dr)))
        .filter_map(|(df, dr)| king.offset(df, dr))
        .map(|sq| rules.attackers(sq, enemy))
        .sum();
    score -= zone_attacks as Score * weights.king_zone_attack;

    score
}

pub(crate) fn king_safety<R: RulesEngine + ?Sized>(
    rules: &R,
    board: &BoardView,
    perspective: Color,
    weights: &EvalWeights,
) -> Score {
    Color::ALL
        .into_iter()
        .map(|color| color.sign_for(perspective) * king_safety_for(rules, board, color, weights))
        .sum()
}
