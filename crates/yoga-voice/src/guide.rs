//! Throttled, priority-aware speech queue.
//!
//! `VoiceGuide` is a cheap handle; the queue itself lives in an actor task
//! that owns the pending requests and the single in-flight render. Producers
//! send requests over an unbounded channel, so `enqueue` never blocks the
//! frame loop.
//!
//! ```text
//!  enqueue() ──► mailbox ──► actor ──► pending (FIFO) ──► spawn_blocking(engine.speak)
//!                              ▲                                   │
//!                              └────────── render finished ◄───────┘
//! ```
//!
//! Rules applied by the actor, in mailbox order:
//! - non-priority requests inside the throttle window are dropped
//! - a priority request discards everything pending, then is appended
//! - exactly one render is in flight at any time

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::counter;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::config::VoiceConfig;
use crate::engine::SpeechEngine;
use crate::error::VoiceResult;
use crate::throttle::Throttle;

/// Metric names.
pub mod names {
    pub const SPEECH_REQUESTS_TOTAL: &str = "yoga_speech_requests_total";
    pub const SPEECH_RENDERS_TOTAL: &str = "yoga_speech_renders_total";
}

const STOP_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// A request to speak some text.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub priority: bool,
    pub enqueued_at: Instant,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, priority: bool) -> Self {
        Self {
            text: text.into(),
            priority,
            enqueued_at: Instant::now(),
        }
    }
}

/// Observable queue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// Nothing pending, nothing being spoken
    Idle,
    /// Speaking and/or holding pending requests
    Draining,
}

enum VoiceCommand {
    Speak(SpeechRequest),
    StopAll(oneshot::Sender<()>),
    NotifyIdle(oneshot::Sender<()>),
}

/// Handle to the speech queue.
pub struct VoiceGuide {
    tx: mpsc::UnboundedSender<VoiceCommand>,
    engine: Arc<dyn SpeechEngine>,
    state: watch::Receiver<VoiceState>,
    actor: Option<JoinHandle<()>>,
}

impl VoiceGuide {
    /// Start the queue actor on the current tokio runtime.
    pub fn spawn(engine: Arc<dyn SpeechEngine>, config: &VoiceConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(VoiceState::Idle);

        let throttle = Throttle::new(config.throttle_interval);
        info!(
            "Starting voice guide with engine '{}' (throttle {:?})",
            engine.name(),
            throttle.interval()
        );

        let actor = VoiceActor {
            rx,
            engine: Arc::clone(&engine),
            throttle,
            pending: VecDeque::new(),
            in_flight: None,
            idle_waiters: Vec::new(),
            state: state_tx,
        };

        Self {
            tx,
            engine,
            state,
            actor: Some(tokio::spawn(actor.run())),
        }
    }

    /// Queue `text` for speaking.
    ///
    /// Non-priority requests may be dropped by the throttle; callers must not
    /// assume every request is spoken. A priority request discards anything
    /// not yet spoken and becomes the only pending utterance.
    pub fn enqueue(&self, text: impl Into<String>, priority: bool) {
        let request = SpeechRequest::new(text, priority);
        if self.tx.send(VoiceCommand::Speak(request)).is_err() {
            debug!("Voice guide stopped, dropping speech request");
        }
    }

    /// Speak `text` on the calling thread, bypassing the queue.
    ///
    /// **Blocks** until the utterance finishes. Do not call from the frame
    /// loop or from inside an async task.
    pub fn speak_immediate(&self, text: &str) -> VoiceResult<()> {
        self.engine.speak(text)
    }

    /// Interrupt the current utterance and discard everything pending.
    ///
    /// Returns once the actor has confirmed the queue is empty and nothing
    /// is being rendered. Idempotent; a no-op when idle or shut down.
    pub async fn stop_all(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(VoiceCommand::StopAll(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }

    /// Wait until every request sent so far has been spoken or dropped.
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(VoiceCommand::NotifyIdle(tx)).is_err() {
            return true;
        }
        tokio::time::timeout(timeout, rx).await.is_ok()
    }

    /// Current queue state.
    pub fn state(&self) -> VoiceState {
        *self.state.borrow()
    }

    /// Stop speaking, close the mailbox and wait for the actor to exit.
    pub async fn shutdown(mut self) {
        self.stop_all().await;

        let Some(actor) = self.actor.take() else {
            return;
        };
        // Dropping the last sender ends the actor loop.
        drop(self);
        if let Err(e) = actor.await {
            warn!("Voice actor ended abnormally: {}", e);
        }
    }
}

struct VoiceActor {
    rx: mpsc::UnboundedReceiver<VoiceCommand>,
    engine: Arc<dyn SpeechEngine>,
    throttle: Throttle,
    pending: VecDeque<SpeechRequest>,
    in_flight: Option<JoinHandle<VoiceResult<()>>>,
    idle_waiters: Vec<oneshot::Sender<()>>,
    state: watch::Sender<VoiceState>,
}

enum ActorEvent {
    Command(Option<VoiceCommand>),
    Rendered(Result<VoiceResult<()>, JoinError>),
}

impl VoiceActor {
    async fn run(mut self) {
        loop {
            self.start_next();
            self.publish_state();

            let event = tokio::select! {
                command = self.rx.recv() => ActorEvent::Command(command),
                result = join_in_flight(&mut self.in_flight) => ActorEvent::Rendered(result),
            };

            match event {
                ActorEvent::Command(Some(command)) => {
                    self.handle(command).await;
                    // Apply everything already queued before starting the next
                    // render, so a priority flush reaches requests sent just
                    // before it.
                    while let Ok(command) = self.rx.try_recv() {
                        self.handle(command).await;
                    }
                }
                ActorEvent::Command(None) => break,
                ActorEvent::Rendered(result) => {
                    self.in_flight = None;
                    record_render(result);
                }
            }
        }

        self.halt().await;
        self.publish_state();
        debug!("Voice actor exited");
    }

    async fn handle(&mut self, command: VoiceCommand) {
        match command {
            VoiceCommand::Speak(request) => self.accept(request),
            VoiceCommand::StopAll(ack) => {
                self.halt().await;
                let _ = ack.send(());
            }
            VoiceCommand::NotifyIdle(waiter) => self.idle_waiters.push(waiter),
        }
    }

    fn accept(&mut self, request: SpeechRequest) {
        if !self.throttle.admit(request.priority) {
            debug!("Throttled speech request: {}", request.text);
            counter!(names::SPEECH_REQUESTS_TOTAL, "outcome" => "throttled").increment(1);
            return;
        }

        if request.priority && !self.pending.is_empty() {
            debug!(
                "Priority request discards {} pending utterance(s)",
                self.pending.len()
            );
            counter!(names::SPEECH_REQUESTS_TOTAL, "outcome" => "preempted")
                .increment(self.pending.len() as u64);
            self.pending.clear();
        }

        counter!(names::SPEECH_REQUESTS_TOTAL, "outcome" => "accepted").increment(1);
        self.pending.push_back(request);
    }

    fn start_next(&mut self) {
        if self.in_flight.is_some() {
            return;
        }
        let Some(request) = self.pending.pop_front() else {
            return;
        };

        let engine = Arc::clone(&self.engine);
        debug!(
            "Rendering speech queued {:?} ago",
            request.enqueued_at.elapsed()
        );
        self.in_flight = Some(tokio::task::spawn_blocking(move || {
            engine.speak(&request.text)
        }));
    }

    /// Discard pending requests and wait out the current render.
    async fn halt(&mut self) {
        self.pending.clear();
        let Some(mut render) = self.in_flight.take() else {
            return;
        };
        // Repeat the stop in case the render thread had not started yet.
        loop {
            self.engine.stop();
            tokio::select! {
                result = &mut render => {
                    record_render(result);
                    return;
                }
                _ = tokio::time::sleep(STOP_RETRY_INTERVAL) => {}
            }
        }
    }

    fn publish_state(&mut self) {
        let state = if self.in_flight.is_none() && self.pending.is_empty() {
            VoiceState::Idle
        } else {
            VoiceState::Draining
        };

        self.state.send_if_modified(|current| {
            let changed = *current != state;
            *current = state;
            changed
        });

        if state == VoiceState::Idle {
            for waiter in self.idle_waiters.drain(..) {
                let _ = waiter.send(());
            }
        }
    }
}

async fn join_in_flight(
    in_flight: &mut Option<JoinHandle<VoiceResult<()>>>,
) -> Result<VoiceResult<()>, JoinError> {
    match in_flight {
        Some(render) => render.await,
        None => std::future::pending().await,
    }
}

fn record_render(result: Result<VoiceResult<()>, JoinError>) {
    match result {
        Ok(Ok(())) => {
            counter!(names::SPEECH_RENDERS_TOTAL, "result" => "ok").increment(1);
        }
        Ok(Err(e)) => {
            warn!("Speech error: {}", e);
            counter!(names::SPEECH_RENDERS_TOTAL, "result" => "failed").increment(1);
        }
        Err(e) => {
            warn!("Speech render task failed: {}", e);
            counter!(names::SPEECH_RENDERS_TOTAL, "result" => "failed").increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySpeechEngine;

    const WAIT: Duration = Duration::from_secs(5);

    fn config(throttle: Duration) -> VoiceConfig {
        VoiceConfig {
            throttle_interval: throttle,
            ..VoiceConfig::default()
        }
    }

    #[tokio::test]
    async fn test_single_request_is_spoken() {
        let engine = Arc::new(MemorySpeechEngine::new());
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::from_secs(3)));

        guide.enqueue("hello", false);
        assert!(guide.wait_idle(WAIT).await);

        assert_eq!(engine.spoken(), vec!["hello"]);
        assert_eq!(guide.state(), VoiceState::Idle);
        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_throttle_drops_second_request() {
        let engine = Arc::new(MemorySpeechEngine::new());
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::from_millis(300)));

        guide.enqueue("first", false);
        guide.enqueue("second", false);
        assert!(guide.wait_idle(WAIT).await);
        assert_eq!(engine.spoken(), vec!["first"]);

        tokio::time::sleep(Duration::from_millis(400)).await;
        guide.enqueue("third", false);
        assert!(guide.wait_idle(WAIT).await);

        assert_eq!(engine.spoken(), vec!["first", "third"]);
        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_priority_discards_pending() {
        let engine = Arc::new(MemorySpeechEngine::new());
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::from_secs(3)));

        guide.enqueue("A", false);
        guide.enqueue("B", true);
        assert!(guide.wait_idle(WAIT).await);

        assert_eq!(engine.spoken(), vec!["B"]);
        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_priority_does_not_cut_current_utterance() {
        let engine = Arc::new(MemorySpeechEngine::with_delay(Duration::from_millis(200)));
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::ZERO));

        guide.enqueue("speaking", false);
        // Let the first render start.
        tokio::time::sleep(Duration::from_millis(50)).await;
        guide.enqueue("queued", false);
        guide.enqueue("urgent", true);
        assert!(guide.wait_idle(WAIT).await);

        assert_eq!(engine.spoken(), vec!["speaking", "urgent"]);
        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_fifo_within_tier() {
        let engine = Arc::new(MemorySpeechEngine::new());
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::ZERO));

        for text in ["one", "two", "three"] {
            guide.enqueue(text, false);
        }
        assert!(guide.wait_idle(WAIT).await);

        assert_eq!(engine.spoken(), vec!["one", "two", "three"]);
        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_stop_all_clears_and_interrupts() {
        let engine = Arc::new(MemorySpeechEngine::with_delay(Duration::from_secs(30)));
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::ZERO));

        guide.enqueue("long", false);
        guide.enqueue("never", false);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let started = Instant::now();
        guide.stop_all().await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(guide.state(), VoiceState::Idle);
        assert!(engine.interrupted() >= 1);
        assert!(!engine.spoken().contains(&"never".to_string()));

        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_stop_all_keeps_throttle_window() {
        let engine = Arc::new(MemorySpeechEngine::new());
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::from_secs(3)));

        guide.enqueue("first", false);
        assert!(guide.wait_idle(WAIT).await);
        guide.stop_all().await;

        guide.enqueue("second", false);
        assert!(guide.wait_idle(WAIT).await);

        assert_eq!(engine.spoken(), vec!["first"]);
        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_stop_all_is_idempotent() {
        let engine = Arc::new(MemorySpeechEngine::new());
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::from_secs(3)));

        guide.stop_all().await;
        guide.stop_all().await;
        assert_eq!(guide.state(), VoiceState::Idle);
        assert!(engine.spoken().is_empty());

        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_render_does_not_stop_queue() {
        let engine = Arc::new(MemorySpeechEngine::new());
        engine.fail_on("broken");
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::ZERO));

        guide.enqueue("broken", false);
        guide.enqueue("fine", false);
        assert!(guide.wait_idle(WAIT).await);

        assert_eq!(engine.spoken(), vec!["fine"]);
        guide.shutdown().await;
    }

    #[tokio::test]
    async fn test_speak_immediate_bypasses_queue() {
        let engine = Arc::new(MemorySpeechEngine::new());
        let guide = VoiceGuide::spawn(engine.clone(), &config(Duration::from_secs(3)));

        guide.enqueue("queued", false);
        // Throttle window is open, but immediate speech ignores it.
        guide.speak_immediate("now").unwrap();
        assert!(engine.spoken().contains(&"now".to_string()));

        assert!(guide.wait_idle(WAIT).await);
        guide.shutdown().await;
    }
}
