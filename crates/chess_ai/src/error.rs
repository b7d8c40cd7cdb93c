//! Error types for the move-selection engine
//!
//! Covers rule-engine contract violations (illegal moves, unbalanced undo),
//! malformed positions and notation, and configuration parsing.

use thiserror::Error;

/// Errors that can occur in the chess AI
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Move is not in the legal move list of the current position
    #[error("Illegal move {uci} in position {fen}")]
    IllegalMove { uci: String, fen: String },

    /// Undo requested with an empty move history
    #[error("Cannot undo: no move has been applied")]
    UndoWithoutMove,

    /// FEN string could not be parsed
    #[error("Invalid FEN '{fen}': {message}")]
    InvalidFen { fen: String, message: String },

    /// FEN parsed but describes an impossible position
    #[error("Invalid position: {message}")]
    InvalidPosition { message: String },

    /// Square name or index out of range
    #[error("Invalid square: {square}")]
    InvalidSquare { square: String },

    /// Move string is not long algebraic notation
    #[error("Invalid move notation: {notation}")]
    InvalidMoveNotation { notation: String },

    /// Unknown difficulty name or level
    #[error("Unknown difficulty: {value} (expected easy, medium, hard, expert or 1-4)")]
    InvalidDifficulty { value: String },

    /// Search configuration is inconsistent
    #[error("Invalid search configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for chess AI operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
