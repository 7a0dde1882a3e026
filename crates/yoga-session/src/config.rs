//! Session configuration.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;
use yoga_models::PoseId;

use crate::error::{SessionError, SessionResult};

/// When spoken feedback may fire.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackPolicy {
    /// Minimum time between spoken feedback
    pub interval: Duration,
    /// Score change that counts as worth announcing
    pub score_change_threshold: u8,
    /// Scores above this are always worth announcing
    pub praise_threshold: u8,
}

impl Default for FeedbackPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            score_change_threshold: 10,
            praise_threshold: 80,
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub feedback: FeedbackPolicy,
    /// Practice sequence, cycled with next/previous
    pub poses: Vec<PoseId>,
    /// Recorded landmark frames (JSON lines)
    pub frames_path: Option<PathBuf>,
    /// Frame size used to convert normalized landmarks to pixels
    pub frame_width: u32,
    pub frame_height: u32,
    /// Delay between frames
    pub frame_interval: Duration,
    /// How long to let the closing message play before stopping speech
    pub closing_grace: Duration,
    /// Serve Prometheus metrics on this port when set
    pub metrics_port: Option<u16>,
    /// Caller-supplied session id; a fresh uuid when unset
    pub session_id: Option<String>,
}

pub const DEFAULT_POSES: [PoseId; 5] = [
    PoseId::Mountain,
    PoseId::Tree,
    PoseId::Sukasana,
    PoseId::ChildsPose,
    PoseId::Warrior2,
];

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback: FeedbackPolicy::default(),
            poses: DEFAULT_POSES.to_vec(),
            frames_path: None,
            frame_width: 640,
            frame_height: 480,
            frame_interval: Duration::from_millis(33), // ~30 fps
            closing_grace: Duration::from_secs(2),
            metrics_port: None,
            session_id: None,
        }
    }
}

impl SessionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> SessionResult<Self> {
        let poses = match std::env::var("SESSION_POSES") {
            Ok(list) => parse_pose_list(&list)?,
            Err(_) => DEFAULT_POSES.to_vec(),
        };

        Ok(Self {
            feedback: FeedbackPolicy {
                interval: Duration::from_millis(
                    std::env::var("SESSION_FEEDBACK_INTERVAL_MS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(5000),
                ),
                score_change_threshold: std::env::var("SESSION_SCORE_CHANGE_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                praise_threshold: std::env::var("SESSION_PRAISE_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(80),
            },
            poses,
            frames_path: std::env::var("SESSION_FRAMES_PATH").ok().map(PathBuf::from),
            frame_width: std::env::var("SESSION_FRAME_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(640),
            frame_height: std::env::var("SESSION_FRAME_HEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(480),
            frame_interval: Duration::from_millis(
                std::env::var("SESSION_FRAME_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(33),
            ),
            closing_grace: Duration::from_millis(
                std::env::var("SESSION_CLOSING_GRACE_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
            metrics_port: std::env::var("SESSION_METRICS_PORT")
                .ok()
                .and_then(|s| s.parse().ok()),
            session_id: std::env::var("SESSION_ID")
                .ok()
                .filter(|id| !id.trim().is_empty()),
        })
    }
}

/// Parse a comma-separated pose list such as `mountain,tree,warrior2`.
pub fn parse_pose_list(list: &str) -> SessionResult<Vec<PoseId>> {
    let poses = list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<PoseId>()
                .map_err(|e| SessionError::config_error(e.to_string()))
        })
        .collect::<SessionResult<Vec<_>>>()?;

    if poses.is_empty() {
        warn!("Empty pose list, using defaults");
        return Ok(DEFAULT_POSES.to_vec());
    }
    Ok(poses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.poses.len(), 5);
        assert_eq!(config.feedback.interval, Duration::from_secs(5));
        assert_eq!(config.feedback.score_change_threshold, 10);
        assert_eq!(config.feedback.praise_threshold, 80);
        assert!(config.metrics_port.is_none());
        assert!(config.session_id.is_none());
    }

    #[test]
    fn test_parse_pose_list() {
        let poses = parse_pose_list("mountain, Tree ,warrior1").unwrap();
        assert_eq!(poses, vec![PoseId::Mountain, PoseId::Tree, PoseId::Warrior1]);
    }

    #[test]
    fn test_parse_pose_list_rejects_unknown() {
        let err = parse_pose_list("mountain,handstand").unwrap_err();
        assert!(matches!(err, SessionError::ConfigError(_)));
    }

    #[test]
    fn test_parse_empty_pose_list_uses_defaults() {
        assert_eq!(parse_pose_list(" , ").unwrap(), DEFAULT_POSES.to_vec());
    }
}
