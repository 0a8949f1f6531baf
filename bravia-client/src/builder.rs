//! Builder for the serial control port
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use bravia_client::ControlPortBuilder;
//!
//! # fn main() -> bravia_core::BraviaResult<()> {
//! let port = ControlPortBuilder::new()
//!     .path("/dev/ttyUSB0")
//!     .interval_ms(500)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::config::{PortConfig, DEFAULT_INTERVAL_MS};
use crate::port::ControlPort;
use bravia_core::BraviaResult;
use bravia_transport::Transport;

/// Builder for [`ControlPort`]
///
/// The path is required; the pacing interval defaults to 500 ms. A custom
/// transport can be substituted, which is how tests run the port against an
/// in-memory link instead of a serial device.
pub struct ControlPortBuilder {
    path: Option<String>,
    interval_ms: u64,
    transport: Option<Box<dyn Transport>>,
}

impl ControlPortBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self {
            path: None,
            interval_ms: DEFAULT_INTERVAL_MS,
            transport: None,
        }
    }

    /// Set the serial device path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the pacing interval in milliseconds (0 to 1000 inclusive)
    pub fn interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Substitute the transport the port opens its link through
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the port
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when the path is missing or the
    /// interval lies outside its accepted range.
    pub fn build(self) -> BraviaResult<ControlPort> {
        let config = PortConfig {
            path: self.path.unwrap_or_default(),
            interval_ms: self.interval_ms,
        };
        match self.transport {
            Some(transport) => ControlPort::with_transport(config, transport),
            None => ControlPort::new(config),
        }
    }
}

impl Default for ControlPortBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bravia_core::BraviaError;

    #[test]
    fn test_build_with_path() {
        let port = ControlPortBuilder::new()
            .path("/dev/ttyUSB0")
            .interval_ms(250)
            .build()
            .unwrap();
        assert_eq!(port.config().path, "/dev/ttyUSB0");
        assert_eq!(port.config().interval_ms, 250);
        assert!(!port.is_open());
    }

    #[test]
    fn test_build_without_path_fails() {
        let result = ControlPortBuilder::new().build();
        assert!(matches!(result, Err(BraviaError::Config(_))));
    }

    #[test]
    fn test_build_with_out_of_range_interval_fails() {
        let result = ControlPortBuilder::new()
            .path("COM3")
            .interval_ms(1500)
            .build();
        assert!(matches!(result, Err(BraviaError::Config(_))));
    }
}
