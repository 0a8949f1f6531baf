//! Control port configuration

use bravia_core::{BraviaError, BraviaResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pacing interval between consecutive requests, in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 500;
/// Largest accepted pacing interval, in milliseconds
pub const MAX_INTERVAL_MS: u64 = 1000;

/// Control port configuration
///
/// Everything about the serial line itself is a protocol constant; the
/// configuration surface is the device path and the request pacing interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortConfig {
    /// Serial device identifier, e.g. "/dev/ttyUSB0" or "COM3"
    pub path: String,
    /// Minimum spacing between consecutive requests, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl PortConfig {
    /// Create a configuration for a device path with the default interval
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }

    /// Set the pacing interval in milliseconds
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Get the pacing interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Fails when the path is empty or the interval lies outside
    /// 0..=[`MAX_INTERVAL_MS`] milliseconds. Configuration errors are fatal
    /// at construction and never retried.
    pub fn validate(&self) -> BraviaResult<()> {
        if self.path.is_empty() {
            return Err(BraviaError::Config(
                "the serial device path is required".to_string(),
            ));
        }
        if self.interval_ms > MAX_INTERVAL_MS {
            return Err(BraviaError::Config(format!(
                "the interval must be in the range of 0 to {} ms, got {}",
                MAX_INTERVAL_MS, self.interval_ms
            )));
        }
        Ok(())
    }
}
