//! Frame encoding and decoding
//!
//! Outgoing requests and inbound responses share the same trailing-checksum
//! layout but differ in shape:
//!
//! - Query (read) request:    `0x83 0x00 <function> 0xFF 0xFF <checksum>`
//! - Control (write) request: `0x8C 0x00 <function> <len+1> <data...> <checksum>`
//! - Acknowledgement:         `0x70 <answer> <checksum>`
//! - Query response:          `0x70 <answer> <len+1> <data...> <checksum>`

use crate::checksum::frame_checksum;
use bravia_core::{AnswerCode, BraviaError, BraviaResult};

/// Header byte of every inbound response frame
pub const HEADER: u8 = 0x70;
/// Opcode of an outgoing query (read) request
pub const READ_OPCODE: u8 = 0x83;
/// Opcode of an outgoing control (write) request
pub const WRITE_OPCODE: u8 = 0x8C;
/// Fixed category byte following the opcode in every request
const CATEGORY: u8 = 0x00;
/// Marker bytes standing in for data in a read request
const READ_MARKER: [u8; 2] = [0xFF, 0xFF];

/// Largest write payload the one-byte length field can describe
pub const MAX_WRITE_DATA: usize = 254;

/// A decoded response frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFrame {
    code: AnswerCode,
    data: Vec<u8>,
}

impl ControlFrame {
    /// Create a frame from its parts
    pub fn new(code: AnswerCode, data: Vec<u8>) -> Self {
        Self { code, data }
    }

    /// Get the classified answer code
    pub fn code(&self) -> AnswerCode {
        self.code
    }

    /// Get the response data (empty for pure acknowledgements)
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame, returning its data
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Decode one complete, checksum-terminated byte run
    ///
    /// A 3-byte run is an acknowledgement (header, answer, checksum); anything
    /// longer is a query response carrying a declared data length. The caller
    /// is expected to have already established frame completeness via the
    /// checksum terminator rule.
    pub fn decode(bytes: &[u8]) -> BraviaResult<Self> {
        if bytes.len() < 3 {
            return Err(BraviaError::FrameInvalid(format!(
                "frame too short: {} byte(s)",
                bytes.len()
            )));
        }
        if bytes[0] != HEADER {
            return Err(BraviaError::FrameInvalid(format!(
                "unexpected header byte 0x{:02X}",
                bytes[0]
            )));
        }

        if bytes.len() == 3 {
            // Acknowledgement of a control request, or the abnormal end of a
            // query request.
            return Ok(Self::new(AnswerCode::from_control(bytes[1]), Vec::new()));
        }

        // Query response: the declared length counts the data plus itself.
        let declared = (bytes[2] as usize).saturating_sub(1);
        let available = bytes.len() - 4;
        if declared > available {
            return Err(BraviaError::FrameInvalid(format!(
                "declared data length {} exceeds the {} byte(s) carried",
                declared, available
            )));
        }

        Ok(Self::new(
            AnswerCode::from_query(bytes[1]),
            bytes[3..3 + declared].to_vec(),
        ))
    }
}

/// An outgoing request for the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRequest {
    /// Read the current value of a function register
    Read { function: u8 },
    /// Write a value to a function register
    Write { function: u8, data: Vec<u8> },
}

impl ControlRequest {
    /// Create a read request
    pub fn read(function: u8) -> Self {
        ControlRequest::Read { function }
    }

    /// Create a write request
    pub fn write(function: u8, data: Vec<u8>) -> Self {
        ControlRequest::Write { function, data }
    }

    /// Get the function code this request targets
    pub fn function(&self) -> u8 {
        match self {
            ControlRequest::Read { function } => *function,
            ControlRequest::Write { function, .. } => *function,
        }
    }

    /// Encode the request into wire bytes, including the trailing checksum
    ///
    /// # Errors
    ///
    /// Fails when a write payload does not fit the one-byte length field.
    pub fn encode(&self) -> BraviaResult<Vec<u8>> {
        let mut bytes = match self {
            ControlRequest::Read { function } => {
                vec![
                    READ_OPCODE,
                    CATEGORY,
                    *function,
                    READ_MARKER[0],
                    READ_MARKER[1],
                ]
            }
            ControlRequest::Write { function, data } => {
                if data.len() > MAX_WRITE_DATA {
                    return Err(BraviaError::FrameInvalid(format!(
                        "write data of {} bytes exceeds the {} byte maximum",
                        data.len(),
                        MAX_WRITE_DATA
                    )));
                }
                let mut bytes = vec![WRITE_OPCODE, CATEGORY, *function, (data.len() + 1) as u8];
                bytes.extend_from_slice(data);
                bytes
            }
        };
        bytes.push(frame_checksum(&bytes));
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::is_terminated;

    #[test]
    fn test_encode_read_request() {
        let wire = ControlRequest::read(0x05).encode().unwrap();
        assert_eq!(wire, vec![0x83, 0x00, 0x05, 0xFF, 0xFF, 0x86]);
        assert!(is_terminated(&wire));
    }

    #[test]
    fn test_encode_write_request() {
        let wire = ControlRequest::write(0x02, vec![0x01]).encode().unwrap();
        assert_eq!(wire, vec![0x8C, 0x00, 0x02, 0x02, 0x01, 0x91]);
        assert!(is_terminated(&wire));
    }

    #[test]
    fn test_every_write_encoding_terminates_on_its_checksum() {
        for function in [0x00u8, 0x20, 0x7F, 0xFF] {
            let wire = ControlRequest::write(function, vec![function, 0x10])
                .encode()
                .unwrap();
            assert!(is_terminated(&wire), "function 0x{:02X}", function);
            assert_eq!(wire[3], 3, "length byte counts data plus itself");
        }
    }

    #[test]
    fn test_encode_rejects_oversized_write() {
        let result = ControlRequest::write(0x01, vec![0; MAX_WRITE_DATA + 1]).encode();
        assert!(matches!(result, Err(BraviaError::FrameInvalid(_))));
    }

    #[test]
    fn test_decode_acknowledgement() {
        let frame = ControlFrame::decode(&[0x70, 0x00, 0x70]).unwrap();
        assert_eq!(frame.code(), AnswerCode::Completed);
        assert!(frame.data().is_empty());

        let frame = ControlFrame::decode(&[0x70, 0x04, 0x74]).unwrap();
        assert_eq!(frame.code(), AnswerCode::ParseError);
    }

    #[test]
    fn test_decode_query_response() {
        let frame = ControlFrame::decode(&[0x70, 0x00, 0x03, 0xAA, 0xBB, 0xD8]).unwrap();
        assert_eq!(frame.code(), AnswerCode::Completed);
        assert_eq!(frame.data(), &[0xAA, 0xBB]);
    }

    #[test]
    fn test_decode_query_limit_code_is_unknown() {
        // 0x01 names a write-only condition; in a query shape it is unknown.
        let frame = ControlFrame::decode(&[0x70, 0x01, 0x01, 0x72]).unwrap();
        assert_eq!(frame.code(), AnswerCode::Unknown(0x01));
    }

    #[test]
    fn test_decode_zero_length_byte_saturates_to_empty() {
        let frame = ControlFrame::decode(&[0x70, 0x00, 0x00, 0x70]).unwrap();
        assert!(frame.data().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_header() {
        let result = ControlFrame::decode(&[0x71, 0x00, 0x71]);
        assert!(matches!(result, Err(BraviaError::FrameInvalid(_))));
    }

    #[test]
    fn test_decode_rejects_short_and_overdeclared_frames() {
        assert!(ControlFrame::decode(&[0x70, 0x70]).is_err());
        // Declares 4 data bytes but carries 1.
        assert!(ControlFrame::decode(&[0x70, 0x00, 0x05, 0xAA, 0x1F]).is_err());
    }
}
