//! On-screen overlay output.

use tracing::debug;
use yoga_models::AnalysisResult;
use yoga_scoring::PoseDefinition;

/// At most this many corrections are shown at once.
pub const MAX_OVERLAY_CORRECTIONS: usize = 2;

/// Receives each frame's analysis for display.
pub trait OverlaySink: Send {
    fn render(&mut self, pose: &PoseDefinition, result: &AnalysisResult);
}

/// Text lines describing the frame: pose, score, feedback, corrections.
pub fn overlay_lines(pose: &PoseDefinition, result: &AnalysisResult) -> Vec<String> {
    let mut lines = vec![format!("Pose: {}", pose.name)];

    if !result.pose_detected {
        lines.push(result.feedback.clone());
        return lines;
    }

    lines.push(format!("Score: {}/100 ({})", result.score, result.band().as_str()));
    lines.push(result.feedback.clone());
    lines.extend(
        result
            .corrections
            .iter()
            .take(MAX_OVERLAY_CORRECTIONS)
            .map(|c| format!("- {}", c)),
    );
    lines
}

/// Overlay that writes to the trace log.
#[derive(Debug, Default)]
pub struct LogOverlay;

impl OverlaySink for LogOverlay {
    fn render(&mut self, pose: &PoseDefinition, result: &AnalysisResult) {
        debug!(score = result.score, "{}", overlay_lines(pose, result).join(" | "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoga_models::{AngleMeasurement, PoseId};

    #[test]
    fn test_overlay_limits_corrections() {
        let result = AnalysisResult {
            pose_detected: true,
            score: 65,
            feedback: "Almost".to_string(),
            corrections: vec!["one".into(), "two".into(), "three".into()],
            angles: AngleMeasurement::new(),
        };
        let lines = overlay_lines(PoseDefinition::get(PoseId::Tree), &result);

        assert_eq!(lines[1], "Score: 65/100 (fair)");
        assert_eq!(lines.len(), 3 + MAX_OVERLAY_CORRECTIONS);
        assert!(!lines.iter().any(|l| l.contains("three")));
    }

    #[test]
    fn test_overlay_without_pose() {
        let lines = overlay_lines(PoseDefinition::get(PoseId::Mountain), &AnalysisResult::no_pose());
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("No pose detected"));
    }
}
