//! In-memory speech engine for tests.

use std::collections::HashSet;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

use crate::engine::SpeechEngine;
use crate::error::{VoiceError, VoiceResult};

#[derive(Default)]
struct Recorded {
    spoken: Vec<String>,
    interrupted: usize,
    failing: HashSet<String>,
    generation: u64,
    rate: u32,
    volume: f32,
}

/// Records completed utterances instead of playing them.
///
/// Utterances cut short by `stop` are counted but not recorded as spoken.
#[derive(Default)]
pub struct MemorySpeechEngine {
    delay: Duration,
    inner: Mutex<Recorded>,
    wake: Condvar,
}

impl MemorySpeechEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each utterance takes `delay` unless stopped.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Make `speak` fail for this exact text.
    pub fn fail_on(&self, text: &str) {
        self.lock().failing.insert(text.to_string());
    }

    /// Completed utterances, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.lock().spoken.clone()
    }

    /// Number of utterances cut short by `stop`.
    pub fn interrupted(&self) -> usize {
        self.lock().interrupted
    }

    pub fn rate(&self) -> u32 {
        self.lock().rate
    }

    pub fn volume(&self) -> f32 {
        self.lock().volume
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        // A panicking test thread must not hide what was recorded.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SpeechEngine for MemorySpeechEngine {
    fn speak(&self, text: &str) -> VoiceResult<()> {
        let guard = self.lock();
        if guard.failing.contains(text) {
            return Err(VoiceError::render_failed(format!("refused: {}", text)));
        }

        let started = guard.generation;
        let (mut guard, timeout) = self
            .wake
            .wait_timeout_while(guard, self.delay, |r| r.generation == started)
            .unwrap_or_else(|e| e.into_inner());

        if timeout.timed_out() || self.delay.is_zero() {
            guard.spoken.push(text.to_string());
        } else {
            guard.interrupted += 1;
        }
        Ok(())
    }

    fn stop(&self) {
        let mut guard = self.lock();
        guard.generation = guard.generation.wrapping_add(1);
        drop(guard);
        self.wake.notify_all();
    }

    fn set_rate(&self, words_per_minute: u32) {
        self.lock().rate = words_per_minute;
    }

    fn set_volume(&self, volume: f32) {
        self.lock().volume = volume;
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
