//! Structured session logging.
//!
//! Every event carries the session id and the pose being practiced so a
//! session's log lines can be pulled out of a shared stream.

use tracing::{info, warn, Span};
use uuid::Uuid;
use yoga_models::PoseId;

/// Logger for one coaching session.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    session_id: String,
    pose: String,
}

impl SessionLogger {
    /// Create a logger with a fresh session id.
    pub fn new(pose: PoseId) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            pose: pose.to_string(),
        }
    }

    /// Create a logger for an existing session id.
    pub fn from_string(session_id: &str, pose: PoseId) -> Self {
        Self {
            session_id: session_id.to_string(),
            pose: pose.to_string(),
        }
    }

    /// Track the pose now being practiced.
    pub fn set_pose(&mut self, pose: PoseId) {
        self.pose = pose.to_string();
    }

    pub fn log_start(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            pose = %self.pose,
            "Session started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            pose = %self.pose,
            "Session progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            session_id = %self.session_id,
            pose = %self.pose,
            "Session warning: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            pose = %self.pose,
            "Session completed: {}", message
        );
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn pose(&self) -> &str {
        &self.pose
    }

    /// Span covering the whole session.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("session", session_id = %self.session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_logger_creation() {
        let logger = SessionLogger::new(PoseId::Tree);
        assert!(Uuid::parse_str(logger.session_id()).is_ok());
        assert_eq!(logger.pose(), "tree");
    }

    #[test]
    fn test_session_logger_tracks_pose() {
        let mut logger = SessionLogger::from_string("session-1", PoseId::Mountain);
        logger.set_pose(PoseId::Warrior2);
        assert_eq!(logger.session_id(), "session-1");
        assert_eq!(logger.pose(), "warrior2");
    }
}
