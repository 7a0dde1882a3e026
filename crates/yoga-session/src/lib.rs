//! Real-time yoga coaching session.
//!
//! Wires frames, scoring and spoken feedback together:
//! - `source`: where each frame's joints come from
//! - `feedback`: the pure decision of when to speak
//! - `session`: the frame loop, pose navigation and session lifecycle
//! - `controls`, `overlay`: user input and on-screen output

pub mod config;
pub mod controls;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod metrics;
pub mod overlay;
pub mod session;
pub mod source;

pub use config::{FeedbackPolicy, SessionConfig};
pub use controls::{spawn_stdin_reader, SessionCommand};
pub use error::{SessionError, SessionResult};
pub use feedback::{decide_feedback, FeedbackDecision, SessionState};
pub use logging::SessionLogger;
pub use overlay::{overlay_lines, LogOverlay, OverlaySink};
pub use session::{Flow, Session, SessionSummary};
pub use source::{FrameSource, RecordedFrame, RecordedFrameSource};
