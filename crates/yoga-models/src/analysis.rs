//! Per-frame pose analysis results.
//!
//! `AnalysisResult` is the whole surface exposed to overlay rendering and to
//! the feedback decision. It is produced fresh for every frame and never
//! persisted.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Feedback shown when the detector found no body in the frame.
pub const NO_POSE_FEEDBACK: &str =
    "No pose detected. Please ensure you're fully visible in the camera.";

/// Feedback shown when the requested pose has no catalog entry.
pub const UNKNOWN_POSE_FEEDBACK: &str = "Unknown pose";

/// A single measured angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AngleReading {
    /// Angle name from the pose definition (e.g. "left_arm")
    pub name: String,
    /// Measured angle in degrees (0-180)
    pub degrees: f64,
}

/// Angles measured for one frame, in pose-definition order.
///
/// Only angles whose three joints were all present appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AngleMeasurement {
    readings: Vec<AngleReading>,
}

impl AngleMeasurement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, degrees: f64) {
        self.readings.push(AngleReading {
            name: name.into(),
            degrees,
        });
    }

    /// Look up a measured angle by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.readings
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.degrees)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AngleReading> {
        self.readings.iter()
    }
}

/// Result of scoring one frame against a target pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Whether a body was found in the frame
    pub pose_detected: bool,
    /// Composite quality score (0-100)
    pub score: u8,
    /// Overall feedback sentence
    pub feedback: String,
    /// Targeted corrections, in pose-definition order
    pub corrections: Vec<String>,
    /// Angles that could be measured this frame
    pub angles: AngleMeasurement,
}

impl AnalysisResult {
    /// Result for a frame where no body was detected.
    pub fn no_pose() -> Self {
        Self {
            pose_detected: false,
            score: 0,
            feedback: NO_POSE_FEEDBACK.to_string(),
            corrections: Vec::new(),
            angles: AngleMeasurement::new(),
        }
    }

    /// Result for a detected body scored against a pose with no definition.
    pub fn unknown_pose() -> Self {
        Self {
            pose_detected: true,
            score: 0,
            feedback: UNKNOWN_POSE_FEEDBACK.to_string(),
            corrections: Vec::new(),
            angles: AngleMeasurement::new(),
        }
    }

    /// Score band used for colouring and phrasing.
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Coarse quality band of a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// 80 and above
    Good,
    /// 60 to 79
    Fair,
    /// Below 60
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Good,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pose_result() {
        let result = AnalysisResult::no_pose();
        assert!(!result.pose_detected);
        assert_eq!(result.score, 0);
        assert!(result.corrections.is_empty());
        assert!(result.angles.is_empty());
        assert_eq!(result.feedback, NO_POSE_FEEDBACK);
    }

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Poor);
    }

    #[test]
    fn test_angle_measurement_preserves_order() {
        let mut angles = AngleMeasurement::new();
        angles.push("spine", 175.0);
        angles.push("left_arm", 160.0);

        let names: Vec<&str> = angles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["spine", "left_arm"]);
        assert_eq!(angles.get("left_arm"), Some(160.0));
        assert_eq!(angles.get("right_arm"), None);
    }

    #[test]
    fn test_result_serializes_for_overlay() {
        let result = AnalysisResult::no_pose();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pose_detected"], false);
        assert_eq!(json["score"], 0);
        assert!(json["corrections"].as_array().unwrap().is_empty());
    }
}
