//! Text-to-speech backends.
//!
//! `speak` blocks the calling thread until the utterance has finished (or
//! was interrupted by `stop`). Engines are shared between the queue's
//! blocking render thread and callers of `stop`, so every method takes
//! `&self`.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{EngineKind, VoiceConfig};
use crate::error::{VoiceError, VoiceResult};

/// A blocking speech synthesizer.
pub trait SpeechEngine: Send + Sync {
    /// Render `text` to audio, returning once playback completes.
    fn speak(&self, text: &str) -> VoiceResult<()>;

    /// Interrupt any in-progress `speak`. Safe to call when silent.
    fn stop(&self);

    /// Set speech rate in words per minute.
    fn set_rate(&self, words_per_minute: u32);

    /// Set volume (0.0-1.0).
    fn set_volume(&self, volume: f32);

    /// Engine name for logging.
    fn name(&self) -> &'static str;
}

/// Build the engine selected in the config.
pub fn create_engine(config: &VoiceConfig) -> VoiceResult<Arc<dyn SpeechEngine>> {
    let engine: Arc<dyn SpeechEngine> = match config.engine {
        EngineKind::Log => Arc::new(LogSpeechEngine::new(config.rate)),
        EngineKind::Command => Arc::new(CommandSpeechEngine::new(&config.command)?),
    };
    configure_engine(engine.as_ref(), config);
    info!("Using speech engine '{}'", engine.name());
    Ok(engine)
}

/// Apply the configured rate and volume to an engine.
pub fn configure_engine(engine: &dyn SpeechEngine, config: &VoiceConfig) {
    engine.set_rate(config.rate);
    engine.set_volume(config.volume);
}

fn store_volume(slot: &AtomicU32, volume: f32) {
    slot.store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
}

fn load_volume(slot: &AtomicU32) -> f32 {
    f32::from_bits(slot.load(Ordering::Relaxed))
}

// ============================================================================
// Log engine
// ============================================================================

/// Engine that traces utterances instead of playing audio.
///
/// Each utterance still takes as long as it would to say at the configured
/// rate, so queue timing behaves like a real voice.
pub struct LogSpeechEngine {
    rate: AtomicU32,
    volume: AtomicU32,
    /// Bumped by `stop` to wake and cancel the current utterance
    generation: Mutex<u64>,
    wake: Condvar,
}

impl LogSpeechEngine {
    pub fn new(words_per_minute: u32) -> Self {
        Self {
            rate: AtomicU32::new(words_per_minute.max(1)),
            volume: AtomicU32::new(1.0f32.to_bits()),
            generation: Mutex::new(0),
            wake: Condvar::new(),
        }
    }

    /// How long `text` takes to say at the current rate.
    pub fn utterance_duration(&self, text: &str) -> Duration {
        let words = text.split_whitespace().count() as f64;
        let wpm = self.rate.load(Ordering::Relaxed).max(1) as f64;
        Duration::from_secs_f64(words * 60.0 / wpm)
    }
}

impl SpeechEngine for LogSpeechEngine {
    fn speak(&self, text: &str) -> VoiceResult<()> {
        info!(volume = load_volume(&self.volume), "Speaking: {}", text);

        let duration = self.utterance_duration(text);
        let guard = self
            .generation
            .lock()
            .map_err(|_| VoiceError::render_failed("engine lock poisoned"))?;
        let started = *guard;

        let (_guard, timeout) = self
            .wake
            .wait_timeout_while(guard, duration, |generation| *generation == started)
            .map_err(|_| VoiceError::render_failed("engine lock poisoned"))?;

        if !timeout.timed_out() {
            debug!("Utterance interrupted");
        }
        Ok(())
    }

    fn stop(&self) {
        if let Ok(mut generation) = self.generation.lock() {
            *generation = generation.wrapping_add(1);
        }
        self.wake.notify_all();
    }

    fn set_rate(&self, words_per_minute: u32) {
        self.rate.store(words_per_minute.max(1), Ordering::Relaxed);
    }

    fn set_volume(&self, volume: f32) {
        store_volume(&self.volume, volume);
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

// ============================================================================
// Command engine
// ============================================================================

/// Engine that shells out to an espeak-compatible program.
///
/// Invoked as `<program> -s <wpm> -a <amplitude 0-200> <text>`.
pub struct CommandSpeechEngine {
    program: PathBuf,
    rate: AtomicU32,
    volume: AtomicU32,
    child: Mutex<Option<Child>>,
}

const CHILD_POLL_INTERVAL: Duration = Duration::from_millis(20);

impl CommandSpeechEngine {
    /// Locate `program` on PATH.
    pub fn new(program: &str) -> VoiceResult<Self> {
        let program = which::which(program)
            .map_err(|_| VoiceError::engine_not_found(program.to_string()))?;
        debug!("Found speech program at {}", program.display());

        Ok(Self {
            program,
            rate: AtomicU32::new(150),
            volume: AtomicU32::new(0.8f32.to_bits()),
            child: Mutex::new(None),
        })
    }

    fn build_args(&self, text: &str) -> Vec<String> {
        let amplitude = (load_volume(&self.volume) * 200.0).round() as u32;
        vec![
            "-s".to_string(),
            self.rate.load(Ordering::Relaxed).to_string(),
            "-a".to_string(),
            amplitude.to_string(),
            text.to_string(),
        ]
    }
}

impl SpeechEngine for CommandSpeechEngine {
    fn speak(&self, text: &str) -> VoiceResult<()> {
        let child = Command::new(&self.program)
            .args(self.build_args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        {
            let mut slot = self
                .child
                .lock()
                .map_err(|_| VoiceError::render_failed("engine lock poisoned"))?;
            *slot = Some(child);
        }

        // Poll so that `stop` can take the lock and kill the process.
        loop {
            let status = {
                let mut slot = self
                    .child
                    .lock()
                    .map_err(|_| VoiceError::render_failed("engine lock poisoned"))?;
                match slot.as_mut() {
                    Some(child) => child.try_wait()?,
                    // Taken by stop()
                    None => return Ok(()),
                }
            };

            if let Some(status) = status {
                if let Ok(mut slot) = self.child.lock() {
                    slot.take();
                }
                if status.success() {
                    return Ok(());
                }
                return Err(VoiceError::render_failed(format!(
                    "{} exited with {}",
                    self.program.display(),
                    status
                )));
            }

            std::thread::sleep(CHILD_POLL_INTERVAL);
        }
    }

    fn stop(&self) {
        let child = match self.child.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };

        if let Some(mut child) = child {
            if let Err(e) = child.kill() {
                warn!("Failed to stop speech process: {}", e);
            }
            let _ = child.wait();
        }
    }

    fn set_rate(&self, words_per_minute: u32) {
        self.rate.store(words_per_minute.max(1), Ordering::Relaxed);
    }

    fn set_volume(&self, volume: f32) {
        store_volume(&self.volume, volume);
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
