//! Player configuration shared by the CLI and the web UI.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::step::Script;

pub const DEFAULT_INTERVAL_MS: u64 = 1500;
pub const MIN_INTERVAL_MS: u64 = 250;
pub const MAX_INTERVAL_MS: u64 = 10_000;

/// Tick interval and the script to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    pub interval: Duration,
    pub script: Script,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            script: Script::default(),
        }
    }
}

impl PlayerConfig {
    /// Build a config, rejecting intervals outside the supported range.
    pub fn new(interval_ms: u64, script: Script) -> Result<Self> {
        Ok(Self {
            interval: Duration::from_millis(validate_interval(interval_ms)?),
            script,
        })
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }
}

pub fn validate_interval(millis: u64) -> Result<u64> {
    if (MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&millis) {
        Ok(millis)
    } else {
        Err(Error::InvalidInterval { millis })
    }
}

/// Clamp a slider value into the supported range.
pub fn clamp_interval(millis: u64) -> u64 {
    millis.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.interval_ms(), DEFAULT_INTERVAL_MS);
        assert_eq!(config.script, Script::EarlyGlobalPop);
    }

    #[test]
    fn test_interval_bounds_inclusive() {
        assert!(PlayerConfig::new(MIN_INTERVAL_MS, Script::LateGlobalPop).is_ok());
        assert!(PlayerConfig::new(MAX_INTERVAL_MS, Script::LateGlobalPop).is_ok());
    }

    #[test]
    fn test_interval_out_of_range() {
        let err = PlayerConfig::new(0, Script::EarlyGlobalPop).unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { millis: 0 }));
        assert!(PlayerConfig::new(MAX_INTERVAL_MS + 1, Script::EarlyGlobalPop).is_err());
    }

    #[test]
    fn test_invalid_interval_message() {
        let err = validate_interval(50).unwrap_err();
        assert_eq!(err.to_string(), "tick interval 50ms is outside 250..=10000ms");
    }

    #[test]
    fn test_clamp_interval() {
        assert_eq!(clamp_interval(10), MIN_INTERVAL_MS);
        assert_eq!(clamp_interval(2000), 2000);
        assert_eq!(clamp_interval(60_000), MAX_INTERVAL_MS);
    }
}
