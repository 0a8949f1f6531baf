//! Core types and error handling for BRAVIA serial display control
//!
//! This crate provides the error taxonomy and the answer-code
//! classification shared by the transport, protocol, and client crates.

pub mod answer;
pub mod error;

pub use answer::AnswerCode;
pub use error::{BraviaError, BraviaResult};
