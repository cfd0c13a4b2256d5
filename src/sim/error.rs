//! Error types for the multiverse simulation

use thiserror::Error;

/// Result alias for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by gate application and the simplify pass
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("Unknown gate: {0:?}")]
    UnknownGate(String),

    #[error("Division by a zero-magnitude complex value")]
    DivisionByZero,

    #[error("Every universe was pruned; nothing left to normalize")]
    EmptyMultiverse,

    #[error("Universe has {found} objects, controller tracks {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Object index {index} out of range ({count} objects)")]
    ObjectOutOfRange { index: usize, count: usize },
}
