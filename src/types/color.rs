//! Color representation for Altium records
//!
//! Altium stores colors as a Windows `COLORREF` integer: red in the low
//! byte, then green, then blue.

use std::fmt;

/// An RGB color decoded from an Altium `COLOR`/`AREACOLOR` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Decode a `COLORREF` value (`0x00BBGGRR`)
    pub const fn from_altium(value: i32) -> Self {
        let v = value as u32;
        Color {
            r: (v & 0xFF) as u8,
            g: ((v >> 8) & 0xFF) as u8,
            b: ((v >> 16) & 0xFF) as u8,
        }
    }

    /// Encode back into a `COLORREF` value
    pub const fn to_altium(&self) -> i32 {
        (self.r as i32) | ((self.g as i32) << 8) | ((self.b as i32) << 16)
    }

    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
