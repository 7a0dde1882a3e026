//! Prometheus metrics for the coaching session.

use std::net::{Ipv4Addr, SocketAddr};

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use yoga_models::{AnalysisResult, PoseId};

use crate::error::{SessionError, SessionResult};

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_TOTAL: &str = "yoga_frames_total";
    pub const POSE_SCORE: &str = "yoga_pose_score";
    pub const FEEDBACK_SPOKEN_TOTAL: &str = "yoga_feedback_spoken_total";
    pub const FRAME_SOURCE_ERRORS_TOTAL: &str = "yoga_frame_source_errors_total";
}

/// Install the Prometheus recorder and serve it on `port`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(port: u16) -> SessionResult<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| SessionError::config_error(format!("metrics exporter: {}", e)))?;
    info!("Serving metrics on {}", addr);
    Ok(())
}

/// Record a scored frame.
pub fn record_frame(pose: PoseId, result: &AnalysisResult) {
    let detected = if result.pose_detected { "true" } else { "false" };
    let labels = [
        ("pose", pose.to_string()),
        ("detected", detected.to_string()),
    ];
    counter!(names::FRAMES_TOTAL, &labels).increment(1);

    if result.pose_detected {
        histogram!(names::POSE_SCORE, "pose" => pose.to_string()).record(result.score as f64);
    }
}

/// Record feedback handed to the voice queue.
pub fn record_feedback(pose: PoseId, band: &'static str) {
    let labels = [("pose", pose.to_string()), ("band", band.to_string())];
    counter!(names::FEEDBACK_SPOKEN_TOTAL, &labels).increment(1);
}

/// Record a frame source fault.
pub fn record_frame_source_error() {
    counter!(names::FRAME_SOURCE_ERRORS_TOTAL).increment(1);
}
