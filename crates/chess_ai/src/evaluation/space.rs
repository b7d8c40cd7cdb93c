//! Space: pieces occupying the central c3-f6 block

use super::{occupied, BoardView};
use crate::constants::Score;
use crate::types::{Color, PieceKind};

const FILES: std::ops::RangeInclusive<u8> = 2..=5;
const RANKS: std::ops::RangeInclusive<u8> = 2..=5;

/// Signed count of non-king pieces on c3-f6, times `weight`
pub(crate) fn space(board: &BoardView, perspective: Color, weight: Score) -> Score {
    occupied(board)
        .filter(|(square, piece)| {
            piece.kind != PieceKind::King
                && FILES.contains(&square.file())
                && RANKS.contains(&square.rank())
        })
        .map(|(_, piece)| piece.color.sign_for(perspective) * weight)
        .sum()
}
