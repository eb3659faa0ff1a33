//! Vector types for decoded geometry
//!
//! Positions and sizes are stored in destination internal units
//! (nanometres) as `i32`, the same width Altium uses for its own
//! coordinates. Rotations and other unitless triples use `f64`.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// 2D integer vector (position or size in nanometres)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2I {
    pub x: i32,
    pub y: i32,
}

impl Vector2I {
    /// Create a new 2D vector
    pub const fn new(x: i32, y: i32) -> Self {
        Vector2I { x, y }
    }

    /// Zero vector
    pub const ZERO: Vector2I = Vector2I::new(0, 0);

    /// Component-wise absolute value, used for sizes derived from two corners
    pub fn abs(&self) -> Self {
        Vector2I::new(self.x.wrapping_abs(), self.y.wrapping_abs())
    }
}

impl Add for Vector2I {
    type Output = Vector2I;
    fn add(self, other: Vector2I) -> Vector2I {
        Vector2I::new(self.x.wrapping_add(other.x), self.y.wrapping_add(other.y))
    }
}

impl Sub for Vector2I {
    type Output = Vector2I;
    fn sub(self, other: Vector2I) -> Vector2I {
        Vector2I::new(self.x.wrapping_sub(other.x), self.y.wrapping_sub(other.y))
    }
}

impl Neg for Vector2I {
    type Output = Vector2I;
    fn neg(self) -> Vector2I {
        Vector2I::new(self.x.wrapping_neg(), self.y.wrapping_neg())
    }
}

impl fmt::Display for Vector2I {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 3D integer vector (model offsets in nanometres)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector3I {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3I {
    /// Create a new 3D vector
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Vector3I { x, y, z }
    }
}

/// 3D vector of doubles (rotations in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Create a new 3D vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
}
