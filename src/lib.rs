//! Validation and typed access for ESP32-DS4 controller reports.
//!
//! A DS4-style controller bridge sends one fixed 10-byte report per update.
//! This crate checks that a report is well formed and then exposes its
//! buttons, sticks and triggers without re-parsing:
//!
//! - **Decoding**: [`Packet::decode`] verifies the header and checksum and
//!   returns an immutable [`Packet`], or a [`ValidationError`]
//! - **Accessors**: [`Packet::has`], [`Packet::sticks`], [`Packet::triggers`]
//! - **Encoding**: [`encode`], the [`Serialize`] trait and [`ReportBuilder`]
//!   produce reports that always decode
//!
//! # Report Format
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | Header, always `0x80` |
//! | 1 | Buttons, high byte (bits 8-15) |
//! | 2 | Buttons, low byte (bits 0-7) |
//! | 3 | Right stick X |
//! | 4 | Right stick Y |
//! | 5 | Left stick X |
//! | 6 | Left stick Y |
//! | 7 | Right trigger |
//! | 8 | Left trigger |
//! | 9 | Checksum: bytes 0-8 summed, modulo 256 |
//!
//! Stick and trigger bytes are raw values; every value 0-255 is valid.
//!
//! # Example
//!
//! ```
//! use esp32_ds4::{Button, Packet, Sticks, Triggers};
//!
//! let raw = [0x80, 0x01, 0x00, 10, 20, 30, 40, 50, 60, 0x53];
//! let packet = Packet::decode(&raw).unwrap();
//!
//! assert!(packet.has(Button::R1));
//! assert!(!packet.has(Button::Circle));
//! assert_eq!(packet.sticks(), Sticks::new(10, 20, 30, 40));
//! assert_eq!(packet.triggers(), Triggers::new(50, 60));
//!
//! // A wrong header is rejected regardless of the checksum
//! let mut bad = raw;
//! bad[0] = 0x00;
//! assert!(Packet::decode(&bad).is_err());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: defmt formatting and logging (for embedded targets)
//! - **`log`**: Logging through the `log` facade (for hosts)
//! - **`heapless`**: Enable `serialize_to_vec()` methods
//! - **`embedded-io`**: Enable `serialize_io()` methods for I/O peripherals
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This must go first so the logging macros are visible to the other modules
mod fmt;

pub mod builder;
pub mod checksum;
pub mod packet;
pub mod serialize;
pub mod types;

// Re-export types at crate root for convenience
pub use builder::ReportBuilder;
pub use checksum::{checksum, report_checksum, ChecksumDigest};
pub use packet::{
    validate, Offset, Packet, ValidationError, ValidationFailure, HEADER, REPORT_LEN,
};
pub use serialize::{encode, Serialize, SerializeError};
pub use types::{Button, Buttons, ControllerState, Sticks, Triggers};
