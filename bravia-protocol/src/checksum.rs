//! Checksum codec
//!
//! Every frame ends with a single checksum byte: the sum of all preceding
//! bytes modulo 256. The same rule doubles as the frame terminator on the
//! inbound path, where no length field is trusted.

/// Running checksum accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum {
    sum: u8,
}

impl Checksum {
    /// Create a new checksum accumulator
    pub fn new() -> Self {
        Self { sum: 0 }
    }

    /// Reset the accumulator to its initial state
    pub fn reset(&mut self) {
        self.sum = 0;
    }

    /// Update the checksum with a single byte
    pub fn update(&mut self, byte: u8) {
        self.sum = self.sum.wrapping_add(byte);
    }

    /// Update the checksum with multiple bytes
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.update(byte);
        }
    }

    /// Get the current checksum value
    pub fn value(&self) -> u8 {
        self.sum
    }
}

/// Checksum of a complete byte run
pub fn frame_checksum(bytes: &[u8]) -> u8 {
    let mut checksum = Checksum::new();
    checksum.update_bytes(bytes);
    checksum.value()
}

/// True when the last byte equals the checksum of everything before it
pub fn is_terminated(bytes: &[u8]) -> bool {
    match bytes.split_last() {
        Some((&last, head)) => frame_checksum(head) == last,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_sums_modulo_256() {
        assert_eq!(frame_checksum(&[0x01, 0x02, 0x03]), 0x06);
        assert_eq!(frame_checksum(&[0xFF, 0xFF, 0x02]), 0x00);
        assert_eq!(frame_checksum(&[]), 0x00);
    }

    #[test]
    fn test_accumulator_matches_one_shot() {
        let bytes = [0x83, 0x00, 0x05, 0xFF, 0xFF];
        let mut checksum = Checksum::new();
        for &byte in &bytes {
            checksum.update(byte);
        }
        assert_eq!(checksum.value(), frame_checksum(&bytes));
    }

    #[test]
    fn test_reset() {
        let mut checksum = Checksum::new();
        checksum.update(0x42);
        checksum.reset();
        assert_eq!(checksum.value(), 0);
    }

    #[test]
    fn test_terminator_rule() {
        assert!(is_terminated(&[0x70, 0x00, 0x70]));
        assert!(!is_terminated(&[0x70, 0x00, 0x71]));
        // A single zero byte trivially terminates (empty prefix sums to 0).
        assert!(is_terminated(&[0x00]));
        assert!(!is_terminated(&[0x01]));
        assert!(!is_terminated(&[]));
    }
}
