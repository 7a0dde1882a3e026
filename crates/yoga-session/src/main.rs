//! Yoga coaching session binary.
//!
//! Replays recorded landmark frames (`SESSION_FRAMES_PATH`) through the
//! scorer and speaks feedback. Type `n`, `p`, `i` or `q` and Enter to move
//! between poses, repeat instructions or quit.

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use yoga_scoring::{PoseScorer, ScoringConfig};
use yoga_session::{spawn_stdin_reader, LogOverlay, RecordedFrameSource, Session, SessionConfig};
use yoga_voice::{create_engine, VoiceConfig, VoiceGuide};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting yoga-session");

    let scoring_config = ScoringConfig::from_env();
    let voice_config = VoiceConfig::from_env();
    let session_config = SessionConfig::from_env().context("invalid session configuration")?;
    info!("Session config: {:?}", session_config);

    if let Some(port) = session_config.metrics_port {
        yoga_session::metrics::init_metrics(port)?;
    }

    let frames_path = session_config
        .frames_path
        .clone()
        .context("SESSION_FRAMES_PATH must point to a recorded landmark file")?;
    let source = RecordedFrameSource::open(
        &frames_path,
        session_config.frame_width,
        session_config.frame_height,
    )?;

    let engine = create_engine(&voice_config)?;
    let voice = VoiceGuide::spawn(engine, &voice_config);

    let scorer = PoseScorer::new(scoring_config);
    info!("Scoring config: {:?}", scorer.config());

    let session = Session::new(
        session_config,
        scorer,
        voice,
        Box::new(LogOverlay),
    )?;

    let (tx, rx) = mpsc::channel(16);
    // Detached: the thread may still be blocked on stdin when the session ends.
    spawn_stdin_reader(tx).context("failed to start control input")?;

    let summary = session.run(source, rx).await;

    info!(
        frames = summary.frames,
        feedback = summary.feedback_given,
        errors = summary.source_errors,
        "Session finished"
    );
    Ok(())
}
