//! Pose scoring for the yoga coach.
//!
//! This crate provides:
//! - Joint-angle geometry with clamped inverse cosine
//! - The static pose catalog (angle specs, feedback text, instructions)
//! - The pose scoring engine producing per-frame `AnalysisResult`s
//!
//! Everything here is pure, synchronous CPU work and safe to call from the
//! real-time frame loop.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;

pub use catalog::{AngleSpec, BodyRegion, PoseDefinition};
pub use config::ScoringConfig;
pub use engine::{angle_score, PoseScorer};
pub use error::{ScoringError, ScoringResult};
pub use geometry::joint_angle;
