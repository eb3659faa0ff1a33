//! Plain value types shared by the record decoders

pub mod color;
pub mod units;
pub mod vector;

pub use color::Color;
pub use units::{convert_to_kicad_unit, sch_unit_to_kicad};
pub use vector::{Vector2I, Vector3, Vector3I};
