//! Flag bytes at the start of binary primitives.

use bitflags::bitflags;

bitflags! {
    /// First flag byte of arcs, pads, vias, tracks, fills and regions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PrimitiveFlags1: u8 {
        /// Part of a polygon pour outline.
        const POLYGON_OUTLINE = 0x02;
        /// Cleared when the primitive is locked.
        const UNLOCKED = 0x04;
        const TENT_TOP = 0x20;
        const TENT_BOTTOM = 0x40;
        const TEST_FAB_TOP = 0x80;
    }
}

bitflags! {
    /// Second flag byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PrimitiveFlags2: u8 {
        const TEST_FAB_BOTTOM = 0x01;
        const KEEPOUT = 0x02;
    }
}

impl PrimitiveFlags1 {
    pub fn from_byte(value: u8) -> Self {
        Self::from_bits_retain(value)
    }

    pub fn is_locked(&self) -> bool {
        !self.contains(Self::UNLOCKED)
    }
}

impl PrimitiveFlags2 {
    pub fn from_byte(value: u8) -> Self {
        Self::from_bits_retain(value)
    }

    /// Keepout primitives have exactly the keepout bit set.
    pub fn is_keepout(&self) -> bool {
        *self == Self::KEEPOUT
    }
}

/// Keepout restrictions applied when the record predates the explicit field.
pub const DEFAULT_KEEPOUT_RESTRICTIONS: u8 = 0x1F;
