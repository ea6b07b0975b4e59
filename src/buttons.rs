//! Decoded button registers
//!
//! The poller produces two raw bytes per controller. These wrappers keep the
//! exact bit layout callers rely on while giving each button a name.
//!
//! | Bit | `Buttons3` | `Buttons6` |
//! |:----|:-----------|:-----------|
//! | 0   | Up         | Z          |
//! | 1   | Down       | Y          |
//! | 2   | Left       | X          |
//! | 3   | Right      | Mode       |
//! | 4   | A          | -          |
//! | 5   | B          | -          |
//! | 6   | C          | -          |
//! | 7   | Start      | -          |
//!
//! A set bit means the button is pressed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 3-button register: d-pad, A, B, C and Start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Buttons3(u8);

impl Buttons3 {
    pub const UP: u8 = 0x01;
    pub const DOWN: u8 = 0x02;
    pub const LEFT: u8 = 0x04;
    pub const RIGHT: u8 = 0x08;
    pub const A: u8 = 0x10;
    pub const B: u8 = 0x20;
    pub const C: u8 = 0x40;
    pub const START: u8 = 0x80;

    /// Buttons in text order, paired with their script letter.
    const LETTERS: [(u8, char); 8] = [
        (Self::UP, 'U'),
        (Self::DOWN, 'D'),
        (Self::LEFT, 'L'),
        (Self::RIGHT, 'R'),
        (Self::A, 'A'),
        (Self::B, 'B'),
        (Self::C, 'C'),
        (Self::START, 'S'),
    ];

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `mask` is set.
    pub fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    pub fn set(&mut self, mask: u8, pressed: bool) {
        if pressed {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    pub fn up(self) -> bool {
        self.contains(Self::UP)
    }

    pub fn down(self) -> bool {
        self.contains(Self::DOWN)
    }

    pub fn left(self) -> bool {
        self.contains(Self::LEFT)
    }

    pub fn right(self) -> bool {
        self.contains(Self::RIGHT)
    }

    pub fn a(self) -> bool {
        self.contains(Self::A)
    }

    pub fn b(self) -> bool {
        self.contains(Self::B)
    }

    pub fn c(self) -> bool {
        self.contains(Self::C)
    }

    pub fn start(self) -> bool {
        self.contains(Self::START)
    }

    /// Parse the `UDLRABCS` notation.
    ///
    /// Positional and lenient: a position holding anything other than its
    /// own letter is released, and missing positions are released.
    pub fn parse(s: &str) -> Self {
        Self::from_chars(s.chars())
    }

    /// Parse from characters already split off a longer string.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut buttons = Self::default();
        for ((mask, letter), c) in Self::LETTERS.iter().zip(chars) {
            buttons.set(*mask, c == *letter);
        }
        buttons
    }
}

impl From<u8> for Buttons3 {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<Buttons3> for u8 {
    fn from(buttons: Buttons3) -> u8 {
        buttons.0
    }
}

impl fmt::Display for Buttons3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mask, letter) in Self::LETTERS {
            let c = if self.contains(mask) { letter } else { '.' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// The 6-button register: X, Y, Z and Mode in the low nibble.
///
/// Bits 4-7 carry no meaning and are ignored by the accessors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Buttons6(u8);

impl Buttons6 {
    pub const Z: u8 = 0x01;
    pub const Y: u8 = 0x02;
    pub const X: u8 = 0x04;
    pub const MODE: u8 = 0x08;

    /// Text order is `XYZM`, matching the script notation, not bit order.
    const LETTERS: [(u8, char); 4] = [
        (Self::X, 'X'),
        (Self::Y, 'Y'),
        (Self::Z, 'Z'),
        (Self::MODE, 'M'),
    ];

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 & 0x0F == 0
    }

    pub fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    pub fn set(&mut self, mask: u8, pressed: bool) {
        if pressed {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    pub fn z(self) -> bool {
        self.contains(Self::Z)
    }

    pub fn y(self) -> bool {
        self.contains(Self::Y)
    }

    pub fn x(self) -> bool {
        self.contains(Self::X)
    }

    pub fn mode(self) -> bool {
        self.contains(Self::MODE)
    }

    /// Parse the `XYZM` notation (same rules as [`Buttons3::parse`]).
    pub fn parse(s: &str) -> Self {
        Self::from_chars(s.chars())
    }

    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut buttons = Self::default();
        for ((mask, letter), c) in Self::LETTERS.iter().zip(chars) {
            buttons.set(*mask, c == *letter);
        }
        buttons
    }
}

impl From<u8> for Buttons6 {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<Buttons6> for u8 {
    fn from(buttons: Buttons6) -> u8 {
        buttons.0
    }
}

impl fmt::Display for Buttons6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mask, letter) in Self::LETTERS {
            let c = if self.contains(mask) { letter } else { '.' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
