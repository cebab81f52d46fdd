//! Report encoding.
//!
//! This module provides [`encode`] and the [`Serialize`] trait for turning a
//! [`ControllerState`] (or an already validated [`Packet`]) back into a
//! 10-byte report. Simulators and test harnesses use this to feed the
//! decoder; anything produced here always passes validation.
//!
//! # Example
//!
//! ```
//! use esp32_ds4::{ControllerState, Packet, Serialize, REPORT_LEN};
//!
//! let state = ControllerState::neutral();
//! let mut buf = [0u8; REPORT_LEN];
//! let len = state.serialize(&mut buf).unwrap();
//!
//! assert_eq!(len, REPORT_LEN);
//! assert_eq!(Packet::decode(&buf).unwrap().state(), state);
//! ```

use crate::checksum::ChecksumDigest;
use crate::packet::{Offset, Packet, HEADER, REPORT_LEN};
use crate::types::ControllerState;

/// Build the report bytes for a controller state.
#[must_use]
pub fn encode(state: &ControllerState) -> [u8; REPORT_LEN] {
    let mut raw = [0u8; REPORT_LEN];
    let mut digest = ChecksumDigest::new();

    let fields = [
        (Offset::Header, HEADER),
        (Offset::ButtonsHigh, state.buttons.high_byte()),
        (Offset::ButtonsLow, state.buttons.low_byte()),
        (Offset::RightStickX, state.sticks.rx),
        (Offset::RightStickY, state.sticks.ry),
        (Offset::LeftStickX, state.sticks.lx),
        (Offset::LeftStickY, state.sticks.ly),
        (Offset::RightTrigger, state.triggers.r2),
        (Offset::LeftTrigger, state.triggers.l2),
    ];
    for (offset, value) in fields {
        raw[offset.index()] = value;
        digest.update(value);
    }

    raw[Offset::Checksum.index()] = digest.finalize();
    raw
}

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold a report.
    BufferTooSmall,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

impl core::error::Error for SerializeError {}

/// Extension trait for writing reports.
///
/// Implemented for [`ControllerState`] and [`Packet`].
pub trait Serialize {
    /// The report bytes.
    fn to_report(&self) -> [u8; REPORT_LEN];

    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written, always [`REPORT_LEN`].
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is not large enough.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let out = buf
            .get_mut(..REPORT_LEN)
            .ok_or(SerializeError::BufferTooSmall)?;
        out.copy_from_slice(&self.to_report());
        Ok(REPORT_LEN)
    }

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is less than [`REPORT_LEN`].
    #[cfg(feature = "heapless")]
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        heapless::Vec::from_slice(&self.to_report()).map_err(|_| SerializeError::BufferTooSmall)
    }

    /// Serialize to an `embedded_io::Write` implementation.
    ///
    /// This can be used with UART or other I/O peripherals.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        writer
            .write_all(&self.to_report())
            .map_err(|_| SerializeError::WriteError)
    }
}

impl Serialize for ControllerState {
    fn to_report(&self) -> [u8; REPORT_LEN] {
        encode(self)
    }
}

impl Serialize for Packet {
    fn to_report(&self) -> [u8; REPORT_LEN] {
        *self.raw()
    }
}
