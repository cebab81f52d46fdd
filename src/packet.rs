//! Report validation and typed field access.
//!
//! A report is exactly [`REPORT_LEN`] bytes:
//!
//! ```text
//! | 0x80 | btn hi | btn lo | RX | RY | LX | LY | R2 | L2 | checksum |
//! ```
//!
//! The checksum is the wraparound sum of bytes 0-8. A [`Packet`] can only be
//! obtained through [`Packet::decode`], so holding one means both the header
//! and the checksum have been verified.

use crate::checksum::report_checksum;
use crate::types::{Button, Buttons, ControllerState, Sticks, Triggers};

/// Header byte opening every report.
pub const HEADER: u8 = 0x80;

/// Length of a report in bytes, checksum included.
pub const REPORT_LEN: usize = 10;

/// Byte offsets within a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum Offset {
    Header = 0,
    ButtonsHigh = 1,
    ButtonsLow = 2,
    RightStickX = 3,
    RightStickY = 4,
    LeftStickX = 5,
    LeftStickY = 6,
    RightTrigger = 7,
    LeftTrigger = 8,
    Checksum = 9,
}

impl Offset {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Which check rejected a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationFailure {
    /// Slice was not exactly [`REPORT_LEN`] bytes.
    Length,
    /// First byte was not [`HEADER`].
    Header,
    /// Last byte did not match the sum of the others.
    Checksum,
}

/// A buffer failed structural or checksum validation.
///
/// There is a single error type for every failure. The [`reason`](Self::reason)
/// is informational only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidationError {
    reason: ValidationFailure,
}

impl ValidationError {
    const fn new(reason: ValidationFailure) -> Self {
        Self { reason }
    }

    /// The check that failed.
    #[inline]
    #[must_use]
    pub const fn reason(&self) -> ValidationFailure {
        self.reason
    }
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.reason {
            ValidationFailure::Length => write!(f, "packet validation failed: wrong length"),
            ValidationFailure::Header => write!(f, "packet validation failed: bad header"),
            ValidationFailure::Checksum => write!(f, "packet validation failed: bad checksum"),
        }
    }
}

impl core::error::Error for ValidationError {}

/// Check a report without keeping it.
///
/// The header is checked first, then the checksum.
pub fn validate(raw: &[u8; REPORT_LEN]) -> Result<(), ValidationError> {
    let header = raw[Offset::Header.index()];
    if header != HEADER {
        debug!("rejecting report: header {:?}", header);
        return Err(ValidationError::new(ValidationFailure::Header));
    }

    let expected = report_checksum(raw);
    let received = raw[Offset::Checksum.index()];
    if expected != received {
        debug!(
            "rejecting report: checksum expected {:?}, received {:?}",
            expected,
            received
        );
        return Err(ValidationError::new(ValidationFailure::Checksum));
    }

    Ok(())
}

/// A validated report.
///
/// Holds its own copy of the bytes and never changes after construction.
///
/// # Example
///
/// ```
/// use esp32_ds4::{Button, Packet};
///
/// let raw = [0x80, 0x01, 0x00, 10, 20, 30, 40, 50, 60, 0x53];
/// let packet = Packet::decode(&raw).unwrap();
///
/// assert!(packet.has(Button::R1));
/// assert_eq!(packet.sticks().lx, 30);
/// assert_eq!(packet.triggers().l2, 60);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    raw: [u8; REPORT_LEN],
}

impl Packet {
    /// Validate a report and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the header is not [`HEADER`] or the
    /// checksum byte does not match.
    pub fn decode(raw: &[u8; REPORT_LEN]) -> Result<Self, ValidationError> {
        validate(raw)?;
        trace!("decoded report {:?}", raw);
        Ok(Self { raw: *raw })
    }

    /// Wrap bytes produced by [`encode`](crate::encode), skipping validation.
    pub(crate) fn from_encoded(raw: [u8; REPORT_LEN]) -> Self {
        debug_assert!(validate(&raw).is_ok(), "encoded report failed validation");
        Self { raw }
    }

    /// Validate a report handed over as a slice.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the slice is not exactly
    /// [`REPORT_LEN`] bytes long, or for any reason [`decode`](Self::decode)
    /// would.
    pub fn from_slice(data: &[u8]) -> Result<Self, ValidationError> {
        let raw: &[u8; REPORT_LEN] = data.try_into().map_err(|_| {
            warn!("rejecting report: {:?} bytes", data.len());
            ValidationError::new(ValidationFailure::Length)
        })?;
        Self::decode(raw)
    }

    /// Check whether a button is pressed.
    #[must_use]
    pub fn has(&self, button: Button) -> bool {
        let bits = button.bits();
        if bits > 0xFF {
            let mask = (bits >> 8) as u8;
            (self.raw[Offset::ButtonsHigh.index()] & mask) != 0
        } else {
            let mask = bits as u8;
            (self.raw[Offset::ButtonsLow.index()] & mask) != 0
        }
    }

    /// All pressed buttons.
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        Buttons::from_bytes(
            self.raw[Offset::ButtonsHigh.index()],
            self.raw[Offset::ButtonsLow.index()],
        )
    }

    /// Iterate over the pressed buttons in ascending bit order.
    pub fn pressed(&self) -> impl Iterator<Item = Button> {
        self.buttons().iter()
    }

    /// Stick axes, unscaled.
    #[inline]
    #[must_use]
    pub fn sticks(&self) -> Sticks {
        Sticks {
            rx: self.raw[Offset::RightStickX.index()],
            ry: self.raw[Offset::RightStickY.index()],
            lx: self.raw[Offset::LeftStickX.index()],
            ly: self.raw[Offset::LeftStickY.index()],
        }
    }

    /// Trigger pressure, unscaled.
    #[inline]
    #[must_use]
    pub fn triggers(&self) -> Triggers {
        Triggers {
            r2: self.raw[Offset::RightTrigger.index()],
            l2: self.raw[Offset::LeftTrigger.index()],
        }
    }

    /// Everything the report carries.
    #[must_use]
    pub fn state(&self) -> ControllerState {
        ControllerState {
            buttons: self.buttons(),
            sticks: self.sticks(),
            triggers: self.triggers(),
        }
    }

    /// The validated checksum byte.
    #[inline]
    #[must_use]
    pub fn checksum(&self) -> u8 {
        self.raw[Offset::Checksum.index()]
    }

    /// The report bytes, exactly as decoded.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &[u8; REPORT_LEN] {
        &self.raw
    }
}

impl TryFrom<&[u8; REPORT_LEN]> for Packet {
    type Error = ValidationError;

    fn try_from(raw: &[u8; REPORT_LEN]) -> Result<Self, Self::Error> {
        Self::decode(raw)
    }
}

impl TryFrom<[u8; REPORT_LEN]> for Packet {
    type Error = ValidationError;

    fn try_from(raw: [u8; REPORT_LEN]) -> Result<Self, Self::Error> {
        Self::decode(&raw)
    }
}

impl TryFrom<&[u8]> for Packet {
    type Error = ValidationError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(data)
    }
}

impl From<Packet> for ControllerState {
    fn from(packet: Packet) -> Self {
        packet.state()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;
    use std::string::ToString;
    use std::vec::Vec;

    use super::*;
    use crate::checksum::checksum;

    /// Fill in the checksum byte for the given fields.
    fn report(fields: [u8; REPORT_LEN - 1]) -> [u8; REPORT_LEN] {
        let mut raw = [0u8; REPORT_LEN];
        raw[..REPORT_LEN - 1].copy_from_slice(&fields);
        raw[Offset::Checksum.index()] = checksum(&fields);
        raw
    }

    #[test]
    fn test_decode_scenario() {
        let raw = report([0x80, 0x01, 0x00, 10, 20, 30, 40, 50, 60]);
        assert_eq!(raw[9], 0x53);

        let packet = Packet::decode(&raw).unwrap();
        assert!(packet.has(Button::R1));
        assert_eq!(packet.sticks(), Sticks::new(10, 20, 30, 40));
        assert_eq!(packet.triggers(), Triggers::new(50, 60));
        assert_eq!(packet.raw(), &raw);
        assert_eq!(packet.checksum(), 0x53);
    }

    #[test]
    fn test_decode_neutral_zeros() {
        let raw = [0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0x80];
        let packet = Packet::decode(&raw).unwrap();
        assert!(packet.buttons().is_empty());
        assert_eq!(packet.sticks(), Sticks::new(0, 0, 0, 0));
        assert_eq!(packet.triggers(), Triggers::RELEASED);
    }

    #[test]
    fn test_zero_checksum_rejected_with_header() {
        // The header counts toward the sum, so zero is wrong here
        let raw = [0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0x00];
        let err = Packet::decode(&raw).unwrap_err();
        assert_eq!(err.reason(), ValidationFailure::Checksum);
    }

    #[test]
    fn test_bad_header_rejected() {
        let mut raw = report([0x80, 0x01, 0x00, 10, 20, 30, 40, 50, 60]);
        raw[0] = 0x00;
        let err = Packet::decode(&raw).unwrap_err();
        assert_eq!(err.reason(), ValidationFailure::Header);

        // Still rejected once the checksum is recomputed for the new header
        let raw = report([0x00, 0x01, 0x00, 10, 20, 30, 40, 50, 60]);
        let err = Packet::decode(&raw).unwrap_err();
        assert_eq!(err.reason(), ValidationFailure::Header);
    }

    #[test]
    fn test_header_checked_before_checksum() {
        let raw = [0x7F, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF];
        assert_eq!(
            Packet::decode(&raw).unwrap_err().reason(),
            ValidationFailure::Header
        );
    }

    #[test]
    fn test_checksum_off_by_one_rejected() {
        let mut raw = report([0x80, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(Packet::decode(&raw).is_ok());
        raw[9] = raw[9].wrapping_add(1);
        assert_eq!(
            Packet::decode(&raw).unwrap_err().reason(),
            ValidationFailure::Checksum
        );
    }

    #[test]
    fn test_validate_matches_decode() {
        let good = report([0x80, 0x12, 0x34, 1, 2, 3, 4, 5, 6]);
        assert_eq!(validate(&good), Ok(()));
        assert!(Packet::decode(&good).is_ok());

        let mut bad = good;
        bad[4] ^= 0x01;
        assert_eq!(validate(&bad), Packet::decode(&bad).map(|_| ()));
    }

    #[test]
    fn test_has_each_button_alone() {
        for button in Button::ALL {
            let bits = button.bits();
            let raw = report([0x80, (bits >> 8) as u8, bits as u8, 0, 0, 0, 0, 0, 0]);
            let packet = Packet::decode(&raw).unwrap();
            for other in Button::ALL {
                assert_eq!(packet.has(other), other == button, "{:?} vs {:?}", button, other);
            }
        }
    }

    #[test]
    fn test_has_high_and_low_bytes_independent() {
        // Same bit position in both bytes: Circle (low) and R1 (high)
        let raw = report([0x80, 0x00, 0x01, 0, 0, 0, 0, 0, 0]);
        let packet = Packet::decode(&raw).unwrap();
        assert!(packet.has(Button::Circle));
        assert!(!packet.has(Button::R1));

        let raw = report([0x80, 0x01, 0x00, 0, 0, 0, 0, 0, 0]);
        let packet = Packet::decode(&raw).unwrap();
        assert!(!packet.has(Button::Circle));
        assert!(packet.has(Button::R1));
    }

    #[test]
    fn test_buttons_and_pressed() {
        let raw = report([0x80, 0x80, 0x09, 0, 0, 0, 0, 0, 0]);
        let packet = Packet::decode(&raw).unwrap();
        assert_eq!(packet.buttons().raw(), 0x8009);
        let pressed: Vec<Button> = packet.pressed().collect();
        assert_eq!(pressed, [Button::Circle, Button::Cross, Button::Touchpad]);
    }

    #[test]
    fn test_extreme_axis_values_pass_through() {
        let raw = report([0x80, 0, 0, 0x00, 0xFF, 0x7F, 0x80, 0xFF, 0x00]);
        let packet = Packet::decode(&raw).unwrap();
        assert_eq!(packet.sticks(), Sticks::new(0x00, 0xFF, 0x7F, 0x80));
        assert_eq!(packet.triggers(), Triggers::new(0xFF, 0x00));
    }

    #[test]
    fn test_state_projection() {
        let raw = report([0x80, 0x02, 0x20, 1, 2, 3, 4, 5, 6]);
        let packet = Packet::decode(&raw).unwrap();
        let state = ControllerState::from(packet);
        assert!(state.buttons.is_pressed(Button::L1));
        assert!(state.buttons.is_pressed(Button::Up));
        assert_eq!(state.sticks, packet.sticks());
        assert_eq!(state.triggers, packet.triggers());
    }

    #[test]
    fn test_from_slice_length() {
        let raw = report([0x80, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(Packet::from_slice(&raw).is_ok());
        assert_eq!(
            Packet::from_slice(&raw[..9]).unwrap_err().reason(),
            ValidationFailure::Length
        );
        assert_eq!(
            Packet::from_slice(&[]).unwrap_err().reason(),
            ValidationFailure::Length
        );

        let mut long = Vec::from(raw);
        long.push(0);
        assert_eq!(
            Packet::try_from(long.as_slice()).unwrap_err().reason(),
            ValidationFailure::Length
        );
    }

    #[test]
    fn test_try_from_array() {
        let raw = report([0x80, 0x40, 0x00, 0, 0, 0, 0, 0, 0]);
        let by_ref = Packet::try_from(&raw).unwrap();
        let by_val = Packet::try_from(raw).unwrap();
        assert_eq!(by_ref, by_val);
        assert!(by_val.has(Button::PSLogo));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let raw = report([0x80, 0x55, 0xAA, 9, 8, 7, 6, 5, 4]);
        let first = Packet::decode(&raw).unwrap();
        let second = Packet::decode(&raw).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.sticks(), first.sticks());
        assert_eq!(first.buttons(), second.buttons());
    }

    #[test]
    fn test_error_display() {
        let header = Packet::decode(&[0; REPORT_LEN]).unwrap_err();
        assert_eq!(header.to_string(), "packet validation failed: bad header");
        assert_eq!(
            format!("{}", ValidationError::new(ValidationFailure::Checksum)),
            "packet validation failed: bad checksum"
        );
    }

    #[test]
    fn test_packet_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Packet>();
        assert_send_sync::<ValidationError>();
    }
}
