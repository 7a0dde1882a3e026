//! End-to-end session run over a recorded landmark file.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use yoga_models::{JointId, NormalizedLandmark};
use yoga_scoring::PoseScorer;
use yoga_session::{
    LogOverlay, RecordedFrame, RecordedFrameSource, Session, SessionCommand, SessionConfig,
};
use yoga_voice::testing::MemorySpeechEngine;
use yoga_voice::{phrases, VoiceConfig, VoiceGuide};

/// Upright body in normalized coordinates.
fn standing_frame() -> RecordedFrame {
    let mut landmarks = vec![
        NormalizedLandmark {
            x: 0.5,
            y: 0.05,
            visibility: 0.2,
        };
        JointId::COUNT
    ];
    let mut place = |id: JointId, x: f32, y: f32| {
        landmarks[id.index()] = NormalizedLandmark {
            x,
            y,
            visibility: 0.95,
        };
    };

    place(JointId::LeftShoulder, 0.25, 0.2);
    place(JointId::LeftElbow, 0.25, 0.3);
    place(JointId::LeftWrist, 0.25, 0.4);
    place(JointId::RightShoulder, 0.5, 0.2);
    place(JointId::RightElbow, 0.5, 0.3);
    place(JointId::RightWrist, 0.5, 0.4);
    place(JointId::LeftHip, 0.25, 0.5);
    place(JointId::LeftKnee, 0.25, 0.7);
    place(JointId::LeftAnkle, 0.25, 0.9);
    place(JointId::RightHip, 0.5, 0.5);
    place(JointId::RightKnee, 0.5, 0.7);
    place(JointId::RightAnkle, 0.5, 0.9);

    RecordedFrame { landmarks }
}

fn write_frames(lines: &[String]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn test_config() -> SessionConfig {
    SessionConfig {
        frame_interval: Duration::from_millis(1),
        closing_grace: Duration::from_secs(2),
        ..SessionConfig::default()
    }
}

fn start_session(engine: Arc<MemorySpeechEngine>, config: SessionConfig) -> Session {
    let voice = VoiceGuide::spawn(engine, &VoiceConfig::default());
    Session::new(config, PoseScorer::default(), voice, Box::new(LogOverlay)).unwrap()
}

#[tokio::test]
async fn test_session_replays_recording() {
    let standing = serde_json::to_string(&standing_frame()).unwrap();
    let file = write_frames(&[
        standing.clone(),
        "{ not a frame".to_string(),
        r#"{"landmarks":[]}"#.to_string(),
        standing,
    ]);

    let config = test_config();
    let source =
        RecordedFrameSource::open(file.path(), config.frame_width, config.frame_height).unwrap();
    let engine = Arc::new(MemorySpeechEngine::new());
    let session = start_session(engine.clone(), config);

    let (tx, rx) = mpsc::channel(4);
    drop(tx);
    let summary = session.run(source, rx).await;

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.frames_with_pose, 2);
    assert_eq!(summary.source_errors, 1);
    // The second standing frame is inside the feedback interval.
    assert_eq!(summary.feedback_given, 1);

    let spoken = engine.spoken();
    assert!(spoken
        .first()
        .is_some_and(|text| text.starts_with("Welcome to your AI yoga instructor!")));
    assert_eq!(spoken.last().map(String::as_str), Some(phrases::SESSION_CLOSING));
}

#[tokio::test]
async fn test_quit_ends_session_before_frames_run_out() {
    let standing = serde_json::to_string(&standing_frame()).unwrap();
    let file = write_frames(&vec![standing; 500]);

    let config = SessionConfig {
        frame_interval: Duration::from_millis(20),
        ..test_config()
    };
    let source =
        RecordedFrameSource::open(file.path(), config.frame_width, config.frame_height).unwrap();
    let engine = Arc::new(MemorySpeechEngine::new());
    let session = start_session(engine.clone(), config);

    let (tx, rx) = mpsc::channel(4);
    tx.send(SessionCommand::NextPose).await.unwrap();
    tx.send(SessionCommand::Quit).await.unwrap();
    let summary = session.run(source, rx).await;

    assert!(summary.frames < 500);
    assert_eq!(
        engine.spoken().last().map(String::as_str),
        Some(phrases::SESSION_CLOSING)
    );
}
