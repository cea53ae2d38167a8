//! Engine error types

use crate::pieces::Side;

/// Errors raised when a caller breaks an engine precondition.
///
/// Ordinary misclicks (wrong piece, illegal destination) are not errors;
/// the turn controller ignores them and reports `false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: i16, col: i16 },

    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),

    #[error("{0:?} has no legal moves")]
    NoLegalMoves(Side),

    #[error("no game in progress")]
    GameNotInProgress,
}

pub type Result<T> = std::result::Result<T, EngineError>;
