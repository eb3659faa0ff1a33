//! 3D model table (`Models`).
//!
//! Embedded model data lives in `Models/<n>` streams, one per record in
//! order; see [`CompoundFile::inflate_model`](crate::io::cfb::CompoundFile::inflate_model).

use super::{check_parsed, read_record_properties};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::Vector3;

const STREAM: &str = "Models";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub name: String,
    pub id: String,
    pub is_embedded: bool,
    /// Degrees around X, Y and Z.
    pub rotation: Vector3,
    pub z_offset: f64,
    pub checksum: i32,
}

impl Model {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let props = read_record_properties(reader, STREAM)?;
        check_parsed(reader, STREAM)?;
        Ok(Model {
            name: props.read_string("NAME", ""),
            id: props.read_string("ID", ""),
            is_embedded: props.read_bool("EMBED", false),
            rotation: Vector3::new(
                props.read_double("ROTX", 0.0),
                props.read_double("ROTY", 0.0),
                props.read_double("ROTZ", 0.0),
            ),
            z_offset: props.read_double("DZ", 0.0),
            checksum: props.read_int("CHECKSUM", 0),
        })
    }
}
