//! Frame assembler
//!
//! Turns the unbounded, chunked inbound byte stream into validated frames.
//! There is no trusted length field: a frame is complete exactly when the
//! buffered run satisfies the checksum terminator rule. A byte run that
//! terminates but does not decode (stray noise, unexpected header) is
//! dropped without surfacing an error; the serial line is noisy and the
//! protocol favors availability here.
//!
//! Known limitation, kept deliberately: a checksum can coincidentally match
//! mid-stream and split a frame early. The protocol offers no stronger
//! framing to guard against this.

use crate::checksum::Checksum;
use crate::frame::ControlFrame;
use bytes::{BufMut, BytesMut};
use std::time::{Duration, Instant};

/// Inter-byte gap after which a partial frame is considered stale
pub const STALE_GAP: Duration = Duration::from_millis(5000);

/// Progress of the reassembly buffer after one appended byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The buffer does not yet terminate on a valid checksum
    Incomplete,
    /// The buffer terminated and decoded into a frame; buffer cleared
    Complete(ControlFrame),
    /// The buffer terminated but did not decode; bytes dropped
    Invalid,
}

/// Reassembly buffer for inbound bytes
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buf: BytesMut,
    sum: Checksum,
    last_byte_at: Option<Instant>,
}

impl FrameAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk received at `now`, returning every frame it completes
    ///
    /// If more than [`STALE_GAP`] elapsed since the previous chunk, any
    /// buffered partial frame is discarded before the new bytes are
    /// considered.
    pub fn feed(&mut self, chunk: &[u8], now: Instant) -> Vec<ControlFrame> {
        if let Some(last) = self.last_byte_at {
            if now.duration_since(last) > STALE_GAP && !self.buf.is_empty() {
                log::debug!("discarding {} stale buffered byte(s)", self.buf.len());
                self.clear();
            }
        }
        self.last_byte_at = Some(now);

        let mut frames = Vec::new();
        for &byte in chunk {
            if let Progress::Complete(frame) = self.push(byte) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Append a single byte and test the terminator rule
    pub fn push(&mut self, byte: u8) -> Progress {
        self.buf.put_u8(byte);
        self.sum.update(byte);

        // Complete when the checksum of everything before the last byte
        // equals that last byte.
        if self.sum.value().wrapping_sub(byte) != byte {
            return Progress::Incomplete;
        }

        let decoded = ControlFrame::decode(&self.buf);
        self.clear();
        match decoded {
            Ok(frame) => Progress::Complete(frame),
            Err(e) => {
                log::debug!("dropping unparseable byte run: {}", e);
                Progress::Invalid
            }
        }
    }

    /// Number of bytes currently buffered
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    fn clear(&mut self) {
        self.buf.clear();
        self.sum.reset();
    }
}
