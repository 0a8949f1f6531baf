//! Client-side control port for BRAVIA professional displays
//!
//! This crate provides the request/response coordinator sitting on top of
//! the transport and protocol layers:
//!
//! - Connection lifecycle (open, intentional close, unexpected close)
//! - Request pacing (a minimum spacing between consecutive requests)
//! - Correlation of each outgoing request with exactly one inbound frame
//!
//! The per-feature command catalog (power, volume, input select, ...) sits
//! above this crate and only ever calls [`ControlPort::request_read`] and
//! [`ControlPort::request_write`].

pub mod builder;
pub mod config;
pub mod port;

pub use builder::ControlPortBuilder;
pub use config::{PortConfig, DEFAULT_INTERVAL_MS, MAX_INTERVAL_MS};
pub use port::{CloseEvent, ControlPort};
