//! Speech feedback delivery for the yoga coach.
//!
//! This crate provides:
//! - The `SpeechEngine` seam over blocking text-to-speech backends
//! - A throttled, priority-aware speech queue run as an actor task
//! - Phrase builders for spoken feedback, corrections and instructions
//!
//! Speech rendering blocks for the length of the utterance, so it always
//! runs on a blocking thread owned by the queue; producers only ever do a
//! non-blocking channel send.

pub mod config;
pub mod engine;
pub mod error;
pub mod guide;
pub mod phrases;
pub mod throttle;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::{EngineKind, VoiceConfig};
pub use engine::{
    configure_engine, create_engine, CommandSpeechEngine, LogSpeechEngine, SpeechEngine,
};
pub use error::{VoiceError, VoiceResult};
pub use guide::{SpeechRequest, VoiceGuide, VoiceState};
pub use throttle::Throttle;
