//! Answer code classification for response frames
//!
//! Every response frame carries a single answer byte directly after the
//! header. The display uses the full code table when acknowledging a control
//! (write) request; in a query response the limit codes never occur, so they
//! classify as unknown there.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Answer code reported by the display in a response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerCode {
    /// 0x00 - the request was carried out
    Completed,
    /// 0x01 - the written value was above the acceptable maximum
    OverMaximum,
    /// 0x02 - the written value was below the acceptable minimum
    OverMinimum,
    /// 0x03 - the command was canceled by the display
    Canceled,
    /// 0x04 - the display could not parse the request
    ParseError,
    /// Any code the protocol does not name, kept with its raw value
    Unknown(u8),
}

impl AnswerCode {
    /// Classify the answer byte of an acknowledgement frame
    pub fn from_control(byte: u8) -> Self {
        match byte {
            0x00 => AnswerCode::Completed,
            0x01 => AnswerCode::OverMaximum,
            0x02 => AnswerCode::OverMinimum,
            0x03 => AnswerCode::Canceled,
            0x04 => AnswerCode::ParseError,
            other => AnswerCode::Unknown(other),
        }
    }

    /// Classify the answer byte of a query response frame
    ///
    /// The limit codes 0x01/0x02 carry write-only semantics and are
    /// classified as unknown when they appear in a query response.
    pub fn from_query(byte: u8) -> Self {
        match byte {
            0x00 => AnswerCode::Completed,
            0x03 => AnswerCode::Canceled,
            0x04 => AnswerCode::ParseError,
            other => AnswerCode::Unknown(other),
        }
    }

    /// Get the raw answer byte
    pub fn byte(&self) -> u8 {
        match self {
            AnswerCode::Completed => 0x00,
            AnswerCode::OverMaximum => 0x01,
            AnswerCode::OverMinimum => 0x02,
            AnswerCode::Canceled => 0x03,
            AnswerCode::ParseError => 0x04,
            AnswerCode::Unknown(byte) => *byte,
        }
    }

    /// Check whether this code reports a successfully handled request
    pub fn is_completed(&self) -> bool {
        matches!(self, AnswerCode::Completed)
    }
}

impl fmt::Display for AnswerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerCode::Completed => write!(f, "Completed"),
            AnswerCode::OverMaximum => write!(f, "Limit Over (over maximum value)"),
            AnswerCode::OverMinimum => write!(f, "Limit Over (under minimum value)"),
            AnswerCode::Canceled => write!(f, "Command Canceled"),
            AnswerCode::ParseError => write!(f, "Parse Error (Data Format Error)"),
            AnswerCode::Unknown(byte) => write!(f, "Unknown Answer (0x{:02x})", byte),
        }
    }
}
