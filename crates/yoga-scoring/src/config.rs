//! Scoring engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the pose scoring engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Degrees outside the ideal range at which an angle scores 0 (default: 30.0).
    ///
    /// Tunable; the falloff from 100 to 0 is linear across this span.
    pub deviation_tolerance: f64,

    /// Composite score at or above which the "good" feedback is used (default: 80)
    pub good_threshold: u8,

    /// Joints below this visibility are treated as absent (default: 0.0, keep all)
    pub min_visibility: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            deviation_tolerance: 30.0,
            good_threshold: 80,
            min_visibility: 0.0,
        }
    }
}

impl ScoringConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            deviation_tolerance: std::env::var("SCORING_DEVIATION_TOLERANCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| *v > 0.0)
                .unwrap_or(defaults.deviation_tolerance),
            good_threshold: std::env::var("SCORING_GOOD_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.good_threshold),
            min_visibility: std::env::var("SCORING_MIN_VISIBILITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_visibility),
        }
    }
}
