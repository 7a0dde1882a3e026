//! Shared data models for the yoga pose coach.
//!
//! This crate provides Serde-serializable types for:
//! - Body landmarks (joints) and per-frame joint sets
//! - Pose identifiers for the supported asanas
//! - Per-frame analysis results and score bands

pub mod analysis;
pub mod joint;
pub mod pose;

// Re-export common types
pub use analysis::{AnalysisResult, AngleMeasurement, AngleReading, ScoreBand};
pub use joint::{Joint, JointId, JointIndexError, JointSet, NormalizedLandmark};
pub use pose::{PoseId, PoseIdParseError};
