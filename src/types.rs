//! Controller types: Button, Buttons, Sticks, Triggers, ControllerState.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// A single controller button.
///
/// Each variant is one bit of a 16-bit space. Bits 8-15 travel in the high
/// button byte of a report, bits 0-7 in the low button byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Button {
    /// Circle button.
    Circle = 0x0001,
    /// Triangle button.
    Triangle = 0x0002,
    /// Square button.
    Square = 0x0004,
    /// Cross button.
    Cross = 0x0008,
    /// D-pad right.
    Right = 0x0010,
    /// D-pad up.
    Up = 0x0020,
    /// D-pad left.
    Left = 0x0040,
    /// D-pad down.
    Down = 0x0080,
    /// Right bumper.
    R1 = 0x0100,
    /// Left bumper.
    L1 = 0x0200,
    /// Right stick press.
    R3 = 0x0400,
    /// Left stick press.
    L3 = 0x0800,
    /// Center-right button.
    Options = 0x1000,
    /// Center-left button.
    Share = 0x2000,
    /// Logo button.
    PSLogo = 0x4000,
    /// Touchpad click.
    Touchpad = 0x8000,
}

impl Button {
    /// Every button, in ascending bit order.
    pub const ALL: [Button; 16] = [
        Button::Circle,
        Button::Triangle,
        Button::Square,
        Button::Cross,
        Button::Right,
        Button::Up,
        Button::Left,
        Button::Down,
        Button::R1,
        Button::L1,
        Button::R3,
        Button::L3,
        Button::Options,
        Button::Share,
        Button::PSLogo,
        Button::Touchpad,
    ];

    /// The button's bit in the unified 16-bit numbering.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// Whether the button lives in the high button byte (bits 8-15).
    #[inline]
    #[must_use]
    pub const fn is_high_byte(self) -> bool {
        self.bits() > 0xFF
    }
}

/// Set of pressed buttons, using the same numbering as [`Button`].
///
/// # Example
///
/// ```
/// use esp32_ds4::{Button, Buttons};
///
/// let buttons = Buttons::from(Button::Cross) | Button::R1.into();
/// assert!(buttons.contains(Button::Cross.into()));
/// assert!(buttons.is_pressed(Button::R1));
/// assert!(!buttons.is_pressed(Button::Circle));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Build a set from the two report bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(high: u8, low: u8) -> Self {
        Self(((high as u16) << 8) | low as u16)
    }

    /// Check if all the given buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, buttons: Buttons) -> bool {
        (self.0 & buttons.0) == buttons.0
    }

    /// Check if a single button is pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, button: Button) -> bool {
        (self.0 & button.bits()) != 0
    }

    /// Press or release a button.
    #[inline]
    pub fn set(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.0 |= button.bits();
        } else {
            self.0 &= !button.bits();
        }
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Bits 8-15, as carried in the high button byte.
    #[inline]
    #[must_use]
    pub const fn high_byte(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Bits 0-7, as carried in the low button byte.
    #[inline]
    #[must_use]
    pub const fn low_byte(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the pressed buttons in ascending bit order.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL
            .into_iter()
            .filter(move |&b| self.is_pressed(b))
    }
}

impl From<Button> for Buttons {
    #[inline]
    fn from(button: Button) -> Self {
        Self(button.bits())
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Raw analog stick positions, one byte per axis.
///
/// Values are passed through unscaled; there is no deadzone handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sticks {
    /// Right stick X.
    pub rx: u8,
    /// Right stick Y.
    pub ry: u8,
    /// Left stick X.
    pub lx: u8,
    /// Left stick Y.
    pub ly: u8,
}

impl Sticks {
    #[must_use]
    pub const fn new(rx: u8, ry: u8, lx: u8, ly: u8) -> Self {
        Self { rx, ry, lx, ly }
    }

    /// Both sticks at rest.
    pub const CENTER: Self = Self {
        rx: 0x80,
        ry: 0x80,
        lx: 0x80,
        ly: 0x80,
    };
}

impl Default for Sticks {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Raw analog trigger pressure.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Triggers {
    /// Right trigger.
    pub r2: u8,
    /// Left trigger.
    pub l2: u8,
}

impl Triggers {
    #[must_use]
    pub const fn new(r2: u8, l2: u8) -> Self {
        Self { r2, l2 }
    }

    /// Both triggers released.
    pub const RELEASED: Self = Self { r2: 0, l2: 0 };
}

/// Complete controller snapshot carried by one report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub buttons: Buttons,
    pub sticks: Sticks,
    pub triggers: Triggers,
}

impl ControllerState {
    /// No buttons pressed, sticks centered, triggers released.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            sticks: Sticks::CENTER,
            triggers: Triggers::RELEASED,
        }
    }
}
