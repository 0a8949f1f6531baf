//! Frame codec and reassembly for BRAVIA serial display control
//!
//! The wire protocol is a vendor-defined binary request/response exchange.
//! Frames carry no trusted length field for framing purposes; a frame ends
//! where the buffered byte run satisfies the checksum terminator rule. This
//! crate provides the checksum codec, the frame encoder/decoder, and the
//! assembler that turns a chunked byte stream into validated frames.

pub mod assembler;
pub mod checksum;
pub mod frame;

pub use assembler::{FrameAssembler, Progress, STALE_GAP};
pub use checksum::{frame_checksum, is_terminated, Checksum};
pub use frame::{
    ControlFrame, ControlRequest, HEADER, MAX_WRITE_DATA, READ_OPCODE, WRITE_OPCODE,
};
