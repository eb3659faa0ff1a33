//! Rectangular fill primitive (`Fills6`).

use super::flags::{PrimitiveFlags1, PrimitiveFlags2, DEFAULT_KEEPOUT_RESTRICTIONS};
use super::{check_parsed, expect_tag, AltiumLayer, RecordTag};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::Vector2I;

const STREAM: &str = "Fills6";

/// A filled rectangle given by two corners and a rotation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fill {
    pub layer: AltiumLayer,
    pub keepout_restrictions: u8,
    pub component: u16,
    pub net: u16,
    pub pos1: Vector2I,
    pub pos2: Vector2I,
    pub rotation: f64,
    pub is_locked: bool,
    pub is_keepout: bool,
}

impl Fill {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        expect_tag(reader, RecordTag::Fill, STREAM)?;

        reader.begin_subrecord();
        let layer = AltiumLayer(reader.read_u8());
        let flags1 = PrimitiveFlags1::from_byte(reader.read_u8());
        let flags2 = PrimitiveFlags2::from_byte(reader.read_u8());
        let net = reader.read_u16();
        reader.skip(2);
        let component = reader.read_u16();
        reader.skip(4);
        let pos1 = reader.read_position();
        let pos2 = reader.read_position();
        let rotation = reader.read_f64();

        let is_keepout = flags2.is_keepout();
        let keepout_restrictions = if reader.remaining_subrecord_bytes() >= 10 {
            reader.skip(9);
            reader.read_u8()
        } else if is_keepout {
            DEFAULT_KEEPOUT_RESTRICTIONS
        } else {
            0
        };

        reader.skip_subrecord();
        check_parsed(reader, STREAM)?;

        Ok(Fill {
            layer,
            keepout_restrictions,
            component,
            net,
            pos1,
            pos2,
            rotation,
            is_locked: flags1.is_locked(),
            is_keepout,
        })
    }
}
