//! Transport layer for BRAVIA serial display control
//!
//! This crate owns the physical serial connection. The display speaks over a
//! point-to-point RS-232C link at a fixed line configuration; only the device
//! path varies between installations.

pub mod serial;
pub mod stream;

pub use serial::{SerialSettings, SerialTransport, BAUD_RATE};
pub use stream::{ControlLink, Transport};
