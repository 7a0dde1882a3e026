//! Error types for pose scoring.

use thiserror::Error;

/// Result type for scoring operations.
pub type ScoringResult<T> = Result<T, ScoringError>;

/// Errors raised while measuring a single angle.
///
/// These never escape the engine: a failing angle spec is logged and
/// skipped for the frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Degenerate joint triple: {0}")]
    Degenerate(String),

    #[error("Non-finite angle: {0}")]
    NonFinite(String),
}

impl ScoringError {
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate(message.into())
    }

    pub fn non_finite(message: impl Into<String>) -> Self {
        Self::NonFinite(message.into())
    }
}
