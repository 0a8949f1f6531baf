//! Serial (RS-232C) control of BRAVIA professional displays
//!
//! This library drives a display over a point-to-point serial link using the
//! vendor's binary request/response protocol. The core is the protocol
//! engine: framing by checksum terminator, request/response correlation
//! through a single pending slot, inter-request pacing, and connection
//! lifecycle with an intentional/unexpected close distinction.
//!
//! # Architecture
//!
//! The library is organized as a workspace with layered crates:
//!
//! - `bravia-core`: error taxonomy and answer-code classification
//! - `bravia-transport`: the serial link (fixed 9600 8N1 line configuration)
//! - `bravia-protocol`: checksum codec, frame codec, frame assembler
//! - `bravia-client`: the [`ControlPort`] request/response coordinator
//!
//! # Usage
//!
//! ```no_run
//! use bravia::{ControlPort, PortConfig};
//!
//! # async fn demo() -> bravia::BraviaResult<()> {
//! let port = ControlPort::new(PortConfig::new("/dev/ttyUSB0"))?;
//! port.open().await?;
//!
//! // Query function register 0x01 and print the returned data.
//! let frame = port.request_read(0x01).await?;
//! println!("data: {:02X?}", frame.data());
//!
//! port.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Command catalogs (power, volume, input select, ...) layer on top of
//! [`ControlPort::request_read`] and [`ControlPort::request_write`]; this
//! library deliberately ships no per-feature tables.

// Re-export core types
pub use bravia_core::{AnswerCode, BraviaError, BraviaResult};

// Re-export the protocol surface
pub use bravia_protocol::{ControlFrame, ControlRequest, FrameAssembler, Progress};

// Re-export the client API
pub use bravia_client::{CloseEvent, ControlPort, ControlPortBuilder, PortConfig};

// Re-export the transport seam
pub mod transport {
    pub use bravia_transport::*;
}
