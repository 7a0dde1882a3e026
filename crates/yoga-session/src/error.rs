//! Session error types.

use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Frame source failed: {0}")]
    FrameSource(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid frame at line {line}: {source}")]
    InvalidFrame {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Voice error: {0}")]
    Voice(#[from] yoga_voice::VoiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    pub fn frame_source(msg: impl Into<String>) -> Self {
        Self::FrameSource(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
