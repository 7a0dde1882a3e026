//! Voice error types.

use thiserror::Error;

pub type VoiceResult<T> = Result<T, VoiceError>;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Speech engine not found: {0}")]
    EngineNotFound(String),

    #[error("Speech render failed: {0}")]
    RenderFailed(String),

    #[error("Unknown speech engine: {0}")]
    UnknownEngine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VoiceError {
    pub fn engine_not_found(msg: impl Into<String>) -> Self {
        Self::EngineNotFound(msg.into())
    }

    pub fn render_failed(msg: impl Into<String>) -> Self {
        Self::RenderFailed(msg.into())
    }
}
