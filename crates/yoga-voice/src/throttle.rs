//! Rate limiter for non-priority speech.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

/// Speech rate limiter type alias.
pub type SpeechRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Enforces a minimum spacing between accepted non-priority requests.
///
/// One request per interval with no burst. Dropped requests do not consume
/// the window, and priority requests always pass without touching it.
pub struct Throttle {
    interval: Duration,
    /// `None` for a zero interval
    limiter: Option<SpeechRateLimiter>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        let limiter = Quota::with_period(interval)
            .map(|quota| RateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)));
        Self { interval, limiter }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Decide whether a request arriving now may be queued.
    pub fn admit(&self, priority: bool) -> bool {
        if priority {
            return true;
        }

        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("interval", &self.interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(200);

    #[test]
    fn test_first_request_admitted() {
        let throttle = Throttle::new(Duration::from_secs(3));
        assert!(throttle.admit(false));
        assert_eq!(throttle.interval(), Duration::from_secs(3));
    }

    #[test]
    fn test_within_interval_dropped() {
        let throttle = Throttle::new(INTERVAL);
        assert!(throttle.admit(false));
        assert!(!throttle.admit(false));

        // Rejected requests do not extend the window.
        std::thread::sleep(INTERVAL / 2);
        assert!(!throttle.admit(false));
        std::thread::sleep(INTERVAL / 2 + Duration::from_millis(20));
        assert!(throttle.admit(false));
        assert!(!throttle.admit(false));
    }

    #[test]
    fn test_priority_bypasses_and_keeps_window() {
        let throttle = Throttle::new(Duration::from_secs(3));
        assert!(throttle.admit(false));
        assert!(throttle.admit(true));
        assert!(throttle.admit(true));
        assert!(!throttle.admit(false));
    }

    #[test]
    fn test_priority_does_not_open_window() {
        let throttle = Throttle::new(Duration::from_secs(3));
        assert!(throttle.admit(true));
        // Priority traffic did not use up the first slot.
        assert!(throttle.admit(false));
    }

    #[test]
    fn test_zero_interval_admits_everything() {
        let throttle = Throttle::new(Duration::ZERO);
        for _ in 0..10 {
            assert!(throttle.admit(false));
        }
    }
}
