//! Arc primitive (`Arcs6`).

use super::flags::{PrimitiveFlags1, PrimitiveFlags2, DEFAULT_KEEPOUT_RESTRICTIONS};
use super::{check_parsed, expect_tag, AltiumLayer, RecordTag};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::Vector2I;

const STREAM: &str = "Arcs6";

/// An arc (or full circle) on a PCB layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arc {
    pub layer: AltiumLayer,
    pub keepout_restrictions: u8,
    pub net: u16,
    pub component: u16,
    pub polygon: u16,
    pub subpoly_index: u16,
    pub center: Vector2I,
    pub radius: i32,
    /// Degrees, counter-clockwise.
    pub start_angle: f64,
    pub end_angle: f64,
    pub width: i32,
    pub is_locked: bool,
    pub is_keepout: bool,
    pub is_polygon_outline: bool,
}

impl Arc {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        expect_tag(reader, RecordTag::Arc, STREAM)?;

        reader.begin_subrecord();
        let layer = AltiumLayer(reader.read_u8());
        let flags1 = PrimitiveFlags1::from_byte(reader.read_u8());
        let flags2 = PrimitiveFlags2::from_byte(reader.read_u8());

        let mut arc = Arc {
            layer,
            is_locked: flags1.is_locked(),
            is_polygon_outline: flags1.contains(PrimitiveFlags1::POLYGON_OUTLINE),
            is_keepout: flags2.is_keepout(),
            ..Default::default()
        };

        arc.net = reader.read_u16();
        arc.polygon = reader.read_u16();
        arc.component = reader.read_u16();
        reader.skip(4);
        arc.center = reader.read_position();
        arc.radius = reader.read_kicad_unit();
        arc.start_angle = reader.read_f64();
        arc.end_angle = reader.read_f64();
        arc.width = reader.read_kicad_unit();
        arc.subpoly_index = reader.read_u16();

        arc.keepout_restrictions = if reader.remaining_subrecord_bytes() >= 10 {
            reader.skip(9);
            reader.read_u8()
        } else if arc.is_keepout {
            DEFAULT_KEEPOUT_RESTRICTIONS
        } else {
            0
        };

        reader.skip_subrecord();
        check_parsed(reader, STREAM)?;
        Ok(arc)
    }
}
