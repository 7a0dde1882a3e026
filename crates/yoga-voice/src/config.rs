//! Voice configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::VoiceError;

/// Which speech backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// Trace utterances and simulate their duration
    #[default]
    Log,
    /// Run an external espeak-compatible program
    Command,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Log => "log",
            EngineKind::Command => "command",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "none" => Ok(EngineKind::Log),
            "command" | "espeak" => Ok(EngineKind::Command),
            _ => Err(VoiceError::UnknownEngine(s.to_string())),
        }
    }
}

/// Speech queue and engine configuration.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Minimum spacing between accepted non-priority requests
    pub throttle_interval: Duration,
    /// Speech rate in words per minute
    pub rate: u32,
    /// Volume (0.0-1.0)
    pub volume: f32,
    /// Backend selection
    pub engine: EngineKind,
    /// Program used by the command engine
    pub command: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            throttle_interval: Duration::from_secs(3),
            rate: 150,
            volume: 0.8,
            engine: EngineKind::Log,
            command: "espeak".to_string(),
        }
    }
}

impl VoiceConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            throttle_interval: std::env::var("VOICE_THROTTLE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.throttle_interval),
            rate: std::env::var("VOICE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate),
            volume: std::env::var("VOICE_VOLUME")
                .ok()
                .and_then(|s| s.parse::<f32>().ok())
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(defaults.volume),
            engine: std::env::var("VOICE_ENGINE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.engine),
            command: std::env::var("VOICE_COMMAND").unwrap_or(defaults.command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_kind_parse() {
        assert_eq!("log".parse::<EngineKind>().unwrap(), EngineKind::Log);
        assert_eq!("ESPEAK".parse::<EngineKind>().unwrap(), EngineKind::Command);
        assert!("festival".parse::<EngineKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = VoiceConfig::default();
        assert_eq!(config.throttle_interval, Duration::from_secs(3));
        assert_eq!(config.rate, 150);
        assert_eq!(config.engine, EngineKind::Log);
    }
}
