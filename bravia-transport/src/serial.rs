//! Serial port transport implementation

use crate::stream::{ControlLink, Transport};
use async_trait::async_trait;
use bravia_core::{BraviaError, BraviaResult};
use tokio_serial::SerialStream;

/// Baud rate fixed by the display protocol
pub const BAUD_RATE: u32 = 9600;

/// Serial port transport layer settings
///
/// The line configuration (9600 baud, 8 data bits, 1 stop bit, no parity, no
/// flow control) is a protocol constant. Only the device path is free.
#[derive(Debug, Clone)]
pub struct SerialSettings {
    pub path: String,
    pub baud_rate: u32,
    pub data_bits: tokio_serial::DataBits,
    pub stop_bits: tokio_serial::StopBits,
    pub parity: tokio_serial::Parity,
    pub flow_control: tokio_serial::FlowControl,
}

impl SerialSettings {
    /// Create settings for a device path with the protocol-mandated line
    /// configuration
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: BAUD_RATE,
            data_bits: tokio_serial::DataBits::Eight,
            stop_bits: tokio_serial::StopBits::One,
            parity: tokio_serial::Parity::None,
            flow_control: tokio_serial::FlowControl::None,
        }
    }
}

/// Serial port transport layer implementation
#[derive(Debug, Clone)]
pub struct SerialTransport {
    settings: SerialSettings,
}

impl SerialTransport {
    /// Create a new serial transport layer
    pub fn new(settings: SerialSettings) -> Self {
        Self { settings }
    }

    /// Create a serial transport for a device path
    pub fn for_path(path: impl Into<String>) -> Self {
        Self::new(SerialSettings::new(path))
    }

    /// Get the settings this transport opens the port with
    pub fn settings(&self) -> &SerialSettings {
        &self.settings
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&self) -> BraviaResult<Box<dyn ControlLink>> {
        let builder = tokio_serial::new(&self.settings.path, self.settings.baud_rate)
            .data_bits(self.settings.data_bits)
            .stop_bits(self.settings.stop_bits)
            .parity(self.settings.parity)
            .flow_control(self.settings.flow_control);

        let stream = SerialStream::open(&builder).map_err(|e| {
            BraviaError::Connection(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to open serial port: {}", e),
            ))
        })?;

        Ok(Box::new(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_settings() {
        let settings = SerialSettings::new("/dev/ttyUSB0");
        assert_eq!(settings.path, "/dev/ttyUSB0");
        assert_eq!(settings.baud_rate, 9600);
        assert_eq!(settings.data_bits, tokio_serial::DataBits::Eight);
        assert_eq!(settings.stop_bits, tokio_serial::StopBits::One);
        assert_eq!(settings.parity, tokio_serial::Parity::None);
        assert_eq!(settings.flow_control, tokio_serial::FlowControl::None);
    }

    #[test]
    fn test_transport_keeps_settings() {
        let transport = SerialTransport::for_path("COM3");
        assert_eq!(transport.settings().path, "COM3");
        assert_eq!(transport.settings().baud_rate, BAUD_RATE);
    }
}
