//! Builder pattern API for constructing reports.
//!
//! # Example
//!
//! ```
//! use esp32_ds4::{Button, ReportBuilder};
//!
//! let packet = ReportBuilder::new()
//!     .button(Button::Cross)
//!     .left_stick(0x20, 0xE0)
//!     .triggers(255, 0)
//!     .packet();
//!
//! assert!(packet.has(Button::Cross));
//! assert_eq!(packet.sticks().lx, 0x20);
//! assert_eq!(packet.triggers().r2, 255);
//! ```

use crate::packet::{Packet, REPORT_LEN};
use crate::serialize::{encode, Serialize, SerializeError};
use crate::types::{Button, Buttons, ControllerState, Sticks, Triggers};

/// Fluent builder for a single report.
///
/// Starts from [`ControllerState::neutral()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    state: ControllerState,
}

impl ReportBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ControllerState::neutral(),
        }
    }

    /// Press a button. Can be called repeatedly.
    #[must_use]
    pub fn button(mut self, button: Button) -> Self {
        self.state.buttons.set(button, true);
        self
    }

    /// Replace the whole button set.
    #[must_use]
    pub fn buttons(mut self, buttons: Buttons) -> Self {
        self.state.buttons = buttons;
        self
    }

    /// Set the right stick position.
    #[must_use]
    pub fn right_stick(mut self, x: u8, y: u8) -> Self {
        self.state.sticks.rx = x;
        self.state.sticks.ry = y;
        self
    }

    /// Set the left stick position.
    #[must_use]
    pub fn left_stick(mut self, x: u8, y: u8) -> Self {
        self.state.sticks.lx = x;
        self.state.sticks.ly = y;
        self
    }

    /// Set all four stick axes at once.
    #[must_use]
    pub fn sticks(mut self, sticks: Sticks) -> Self {
        self.state.sticks = sticks;
        self
    }

    /// Set the right trigger value.
    #[must_use]
    pub fn right_trigger(mut self, value: u8) -> Self {
        self.state.triggers.r2 = value;
        self
    }

    /// Set the left trigger value.
    #[must_use]
    pub fn left_trigger(mut self, value: u8) -> Self {
        self.state.triggers.l2 = value;
        self
    }

    /// Set both triggers at once.
    #[must_use]
    pub fn triggers(mut self, r2: u8, l2: u8) -> Self {
        self.state.triggers = Triggers::new(r2, l2);
        self
    }

    /// Get the built state without encoding.
    #[must_use]
    pub fn build(self) -> ControllerState {
        self.state
    }

    /// Encode the report bytes.
    #[must_use]
    pub fn encode(self) -> [u8; REPORT_LEN] {
        encode(&self.state)
    }

    /// Encode and wrap the report as a validated packet.
    #[must_use]
    pub fn packet(self) -> Packet {
        Packet::from_encoded(self.encode())
    }

    /// Serialize the report to the provided buffer.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is too small.
    pub fn serialize(self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        self.state.serialize(buf)
    }

    /// Serialize to a `heapless::Vec`.
    #[cfg(feature = "heapless")]
    pub fn serialize_to_vec<const N: usize>(self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        self.state.serialize_to_vec()
    }

    /// Serialize to an `embedded_io::Write` implementation.
    #[cfg(feature = "embedded-io")]
    pub fn serialize_io<W: embedded_io::Write>(self, writer: &mut W) -> Result<(), SerializeError> {
        self.state.serialize_io(writer)
    }
}

impl From<ControllerState> for ReportBuilder {
    fn from(state: ControllerState) -> Self {
        Self { state }
    }
}
