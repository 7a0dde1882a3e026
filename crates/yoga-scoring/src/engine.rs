//! Pose scoring engine.
//!
//! Turns one frame's joints into angle measurements, a 0-100 composite score
//! and ordered corrections for a target pose.

use tracing::debug;
use yoga_models::{AnalysisResult, AngleMeasurement, JointSet, PoseId};

use crate::catalog::{AngleSpec, PoseDefinition};
use crate::config::ScoringConfig;
use crate::error::{ScoringError, ScoringResult};
use crate::geometry::joint_angle;

/// Score for one measured angle against its ideal range.
///
/// 100 inside `[min, max]`; outside, falls off linearly with the distance to
/// the nearest bound and reaches 0 at `tolerance` degrees.
pub fn angle_score(degrees: f64, ideal: (f64, f64), tolerance: f64) -> f64 {
    let (min, max) = ideal;
    if min <= degrees && degrees <= max {
        return 100.0;
    }

    let deviation = (min - degrees).max(degrees - max);
    (100.0 - (deviation / tolerance) * 100.0).max(0.0)
}

/// Stateless scorer for detected poses.
#[derive(Debug, Clone, Default)]
pub struct PoseScorer {
    config: ScoringConfig,
}

impl PoseScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a frame against a known pose.
    pub fn score(&self, joints: &JointSet, pose: PoseId) -> AnalysisResult {
        if joints.is_empty() {
            return AnalysisResult::no_pose();
        }

        let definition = PoseDefinition::get(pose);
        let angles = self.measure(joints, definition);
        let score = self.composite(definition, &angles);

        let feedback = if score >= self.config.good_threshold {
            definition.good
        } else {
            definition.improve
        };

        let corrections = definition
            .angles
            .iter()
            .filter_map(|spec| angles.get(spec.name).and_then(|deg| spec.correction(deg)))
            .collect();

        AnalysisResult {
            pose_detected: true,
            score,
            feedback: feedback.to_string(),
            corrections,
            angles,
        }
    }

    /// Score a frame against a pose given by name.
    ///
    /// Unknown names score 0 with an "Unknown pose" message; they are not an
    /// error.
    pub fn score_named(&self, joints: &JointSet, pose: &str) -> AnalysisResult {
        if joints.is_empty() {
            return AnalysisResult::no_pose();
        }

        match pose.parse::<PoseId>() {
            Ok(id) => self.score(joints, id),
            Err(e) => {
                debug!("{}", e);
                AnalysisResult::unknown_pose()
            }
        }
    }

    /// Measure every angle whose joints are present.
    ///
    /// Specs with missing joints or degenerate geometry are skipped; a
    /// failure in one spec never affects the others.
    pub fn measure(&self, joints: &JointSet, definition: &PoseDefinition) -> AngleMeasurement {
        let mut angles = AngleMeasurement::new();

        for spec in definition.angles {
            match self.measure_spec(joints, spec) {
                Ok(Some(degrees)) => angles.push(spec.name, degrees),
                Ok(None) => {}
                Err(e) => {
                    debug!(pose = %definition.id, angle = spec.name, "Skipping angle: {}", e);
                }
            }
        }

        angles
    }

    fn measure_spec(&self, joints: &JointSet, spec: &AngleSpec) -> ScoringResult<Option<f64>> {
        let mut points = [(0.0, 0.0); 3];
        for (point, id) in points.iter_mut().zip(spec.joints) {
            match joints.get(id) {
                Some(joint) if joint.visibility >= self.config.min_visibility => {
                    *point = joint.point();
                }
                _ => return Ok(None),
            }
        }

        let degrees = joint_angle(points[0], points[1], points[2])?;
        if !(0.0..=180.0).contains(&degrees) {
            return Err(ScoringError::non_finite(format!("{} out of range", degrees)));
        }
        Ok(Some(degrees))
    }

    /// Integer mean of per-angle scores (rounded down); 0 when nothing was measured.
    fn composite(&self, definition: &PoseDefinition, angles: &AngleMeasurement) -> u8 {
        let scores: Vec<f64> = definition
            .angles
            .iter()
            .filter_map(|spec| {
                angles
                    .get(spec.name)
                    .map(|deg| angle_score(deg, spec.ideal, self.config.deviation_tolerance))
            })
            .collect();

        if scores.is_empty() {
            return 0;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.floor().clamp(0.0, 100.0) as u8
    }
}
