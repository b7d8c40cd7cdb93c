//! Evaluation term selection and weights
//!
//! Material, check and mobility are always scored. Everything else is
//! switched on per difficulty through [`TermSet`].

use crate::constants::Score;
use serde::{Deserialize, Serialize};

/// Optional evaluation terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TermSet {
    pub piece_square: bool,
    pub center_control: bool,
    pub king_safety: bool,
    pub pawn_structure: bool,
    pub space: bool,
    pub threats: bool,
}

impl TermSet {
    /// Material, check and mobility only
    pub const BASIC: TermSet = TermSet {
        piece_square: false,
        center_control: false,
        king_safety: false,
        pawn_structure: false,
        space: false,
        threats: false,
    };

    /// BASIC plus piece-square tables, centre control, king safety and pawns
    pub const POSITIONAL: TermSet = TermSet {
        piece_square: true,
        center_control: true,
        king_safety: true,
        pawn_structure: true,
        space: false,
        threats: false,
    };

    pub const FULL: TermSet = TermSet {
        piece_square: true,
        center_control: true,
        king_safety: true,
        pawn_structure: true,
        space: true,
        threats: true,
    };
}

impl Default for TermSet {
    fn default() -> Self {
        TermSet::FULL
    }
}

/// Centipawn weights for every evaluation term
///
/// Penalties are stored as positive magnitudes and subtracted where they
/// apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Per legal move of the side to move
    pub mobility: Score,
    /// Bonus for giving check / penalty for being in check
    pub check: Score,
    /// Per central square the side to move can move a piece from
    pub center_control: Score,
    /// Per file at or beside the king without a friendly pawn
    pub king_open_file: Score,
    /// Per friendly pawn directly in front of the king
    pub king_pawn_shield: Score,
    /// Per enemy attack on the king or an adjacent square
    pub king_zone_attack: Score,
    pub isolated_pawn: Score,
    /// Per extra pawn on one file
    pub doubled_pawn: Score,
    /// Per non-king piece on the c3-f6 block
    pub space: Score,
    /// Per capture, promotion or checking move available to the side to move
    pub threat: Score,
}

impl EvalWeights {
    pub const STANDARD: EvalWeights = EvalWeights {
        mobility: 1,
        check: 50,
        center_control: 10,
        king_open_file: 15,
        king_pawn_shield: 10,
        king_zone_attack: 8,
        isolated_pawn: 15,
        doubled_pawn: 10,
        space: 5,
        threat: 5,
    };
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights::STANDARD
    }
}
