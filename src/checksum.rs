//! Report checksum.
//!
//! The checksum is an 8-bit wraparound sum: an accumulator starts at zero and
//! every byte is added with `wrapping_add`. This equals the plain sum of the
//! bytes taken modulo 256.

use crate::packet::{Offset, REPORT_LEN};

/// Calculate the wraparound sum of a byte slice.
#[inline]
#[must_use]
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Checksum a report covers: every byte before the checksum byte.
#[inline]
#[must_use]
pub fn report_checksum(raw: &[u8; REPORT_LEN]) -> u8 {
    checksum(&raw[..Offset::Checksum.index()])
}

/// Checksum digest for incremental calculation.
///
/// Use this when building a report byte-by-byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecksumDigest {
    acc: u8,
}

impl ChecksumDigest {
    /// Create a new digest.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { acc: 0 }
    }

    /// Update the digest with a single byte.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.acc = self.acc.wrapping_add(byte);
    }

    /// Update the digest with a byte slice.
    #[inline]
    pub fn update_slice(&mut self, data: &[u8]) {
        for &b in data {
            self.update(b);
        }
    }

    /// Finalize and return the checksum value.
    #[inline]
    #[must_use]
    pub const fn finalize(self) -> u8 {
        self.acc
    }
}
