//! The coaching session loop.
//!
//! Per frame: read joints from the [`FrameSource`], score them against the
//! current pose, hand the result to the overlay, then decide whether to
//! speak. Speech is only ever enqueued, so a slow voice never stalls frames.

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, Instrument};
use yoga_models::{AnalysisResult, JointSet, PoseId};
use yoga_scoring::{PoseDefinition, PoseScorer};
use yoga_voice::{phrases, VoiceGuide};

use crate::config::SessionConfig;
use crate::controls::SessionCommand;
use crate::error::{SessionError, SessionResult};
use crate::feedback::{decide_feedback, SessionState};
use crate::logging::SessionLogger;
use crate::metrics;
use crate::overlay::OverlaySink;
use crate::source::FrameSource;

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub session_id: String,
    pub frames: u64,
    pub frames_with_pose: u64,
    pub feedback_given: u64,
    pub source_errors: u64,
}

/// A running coaching session.
pub struct Session {
    config: SessionConfig,
    scorer: PoseScorer,
    voice: VoiceGuide,
    overlay: Box<dyn OverlaySink>,
    state: SessionState,
    logger: SessionLogger,
    summary: SessionSummary,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        scorer: PoseScorer,
        voice: VoiceGuide,
        overlay: Box<dyn OverlaySink>,
    ) -> SessionResult<Self> {
        let Some(&first) = config.poses.first() else {
            return Err(SessionError::config_error("no poses to practice"));
        };

        let logger = match &config.session_id {
            Some(id) => SessionLogger::from_string(id, first),
            None => SessionLogger::new(first),
        };
        let summary = SessionSummary {
            session_id: logger.session_id().to_string(),
            ..SessionSummary::default()
        };

        Ok(Self {
            config,
            scorer,
            voice,
            overlay,
            state: SessionState::new(0),
            logger,
            summary,
        })
    }

    pub fn current_pose(&self) -> PoseId {
        self.config.poses[self.state.pose_index]
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn voice(&self) -> &VoiceGuide {
        &self.voice
    }

    /// Welcome the user and introduce the first pose.
    pub fn start(&mut self) {
        self.logger.log_start(&format!(
            "{} poses, feedback every {:?}",
            self.config.poses.len(),
            self.config.feedback.interval
        ));
        let text = format!("{} {}", phrases::SESSION_WELCOME, self.pose_intro());
        self.voice.enqueue(text, true);
    }

    /// Score one frame and queue any feedback it earns.
    pub fn process_frame(&mut self, joints: &JointSet, now: Instant) -> AnalysisResult {
        let pose = self.current_pose();
        let result = self.scorer.score(joints, pose);

        self.summary.frames += 1;
        if result.pose_detected {
            self.summary.frames_with_pose += 1;
        }
        metrics::record_frame(pose, &result);
        self.overlay.render(PoseDefinition::get(pose), &result);

        let (state, decision) = decide_feedback(self.state, &result, now, &self.config.feedback);
        self.state = state;

        if let Some(decision) = decision {
            debug!(score = decision.score, "Speaking feedback");
            self.voice
                .enqueue(phrases::feedback(&decision.feedback, decision.score), false);
            if let Some(text) = phrases::corrections(&decision.corrections) {
                self.voice.enqueue(text, false);
            }
            self.summary.feedback_given += 1;
            metrics::record_feedback(pose, result.band().as_str());
        }

        result
    }

    /// Apply a user command.
    pub fn handle_command(&mut self, command: SessionCommand) -> Flow {
        let count = self.config.poses.len();
        match command {
            SessionCommand::NextPose => {
                self.switch_pose((self.state.pose_index + 1) % count);
            }
            SessionCommand::PreviousPose => {
                self.switch_pose((self.state.pose_index + count - 1) % count);
            }
            SessionCommand::Instruct => {
                self.voice.enqueue(self.pose_intro(), true);
            }
            SessionCommand::Quit => {
                self.logger.log_progress("Quit requested");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Record a frame source fault. The session keeps going.
    pub fn source_fault(&mut self, error: &SessionError) {
        self.summary.source_errors += 1;
        metrics::record_frame_source_error();
        self.logger.log_warning(&format!("Frame skipped: {}", error));
    }

    /// Run until the frames run out or the user quits, then close the session.
    pub async fn run<S: FrameSource>(
        mut self,
        mut source: S,
        mut commands: mpsc::Receiver<SessionCommand>,
    ) -> SessionSummary {
        let span = self.logger.create_span();
        async move {
            self.start();
            self.frame_loop(&mut source, &mut commands).await;
            self.finish().await
        }
        .instrument(span)
        .await
    }

    async fn frame_loop<S: FrameSource>(
        &mut self,
        source: &mut S,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) {
        let mut ticker = tokio::time::interval(self.config.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut controls_open = true;

        loop {
            tokio::select! {
                command = commands.recv(), if controls_open => {
                    match command {
                        Some(command) => {
                            if self.handle_command(command) == Flow::Quit {
                                return;
                            }
                        }
                        None => controls_open = false,
                    }
                }
                _ = ticker.tick() => {
                    match source.next_frame() {
                        Ok(Some(joints)) => {
                            self.process_frame(&joints, Instant::now());
                        }
                        Ok(None) => {
                            self.logger.log_progress("Frame stream ended");
                            return;
                        }
                        Err(e) => self.source_fault(&e),
                    }
                }
            }
        }
    }

    /// Say goodbye, give the closing message time to play, then stop speech.
    pub async fn finish(self) -> SessionSummary {
        self.voice.enqueue(phrases::SESSION_CLOSING, true);
        if !self.voice.wait_idle(self.config.closing_grace).await {
            debug!("Closing message cut short");
        }
        self.voice.shutdown().await;

        self.logger.log_completion(&format!(
            "{} frames, {} with a pose, {} feedback",
            self.summary.frames, self.summary.frames_with_pose, self.summary.feedback_given
        ));
        info!(session_id = %self.summary.session_id, "Session closed");
        self.summary
    }

    fn switch_pose(&mut self, index: usize) {
        self.state = self.state.switch_pose(index);
        let pose = self.current_pose();
        self.logger.set_pose(pose);
        self.logger.log_progress(&format!("Switched to {}", pose));
        self.voice.enqueue(self.pose_intro(), true);
    }

    fn pose_intro(&self) -> String {
        let definition = PoseDefinition::get(self.current_pose());
        phrases::pose_intro(definition.name, definition.instructions)
    }
}
