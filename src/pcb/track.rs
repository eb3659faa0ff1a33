//! Track segment primitive (`Tracks6`).

use super::flags::{PrimitiveFlags1, PrimitiveFlags2, DEFAULT_KEEPOUT_RESTRICTIONS};
use super::{check_parsed, expect_tag, AltiumLayer, RecordTag};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::Vector2I;

const STREAM: &str = "Tracks6";

/// A straight copper or graphic segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub layer: AltiumLayer,
    pub keepout_restrictions: u8,
    pub net: u16,
    pub component: u16,
    pub polygon: u16,
    pub subpoly_index: u16,
    pub start: Vector2I,
    pub end: Vector2I,
    pub width: i32,
    pub is_locked: bool,
    pub is_keepout: bool,
    pub is_polygon_outline: bool,
}

impl Track {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        expect_tag(reader, RecordTag::Track, STREAM)?;

        reader.begin_subrecord();
        let layer = AltiumLayer(reader.read_u8());
        let flags1 = PrimitiveFlags1::from_byte(reader.read_u8());
        let flags2 = PrimitiveFlags2::from_byte(reader.read_u8());
        let net = reader.read_u16();
        let polygon = reader.read_u16();
        let component = reader.read_u16();
        reader.skip(4);
        let start = reader.read_position();
        let end = reader.read_position();
        let width = reader.read_kicad_unit();
        let subpoly_index = reader.read_u16();
        reader.skip(1);

        let is_keepout = flags2.is_keepout();
        let keepout_restrictions = if reader.remaining_subrecord_bytes() >= 9 {
            reader.skip(5);
            reader.read_u8()
        } else if is_keepout {
            DEFAULT_KEEPOUT_RESTRICTIONS
        } else {
            0
        };

        reader.skip_subrecord();
        check_parsed(reader, STREAM)?;

        Ok(Track {
            layer,
            keepout_restrictions,
            net,
            component,
            polygon,
            subpoly_index,
            start,
            end,
            width,
            is_locked: flags1.is_locked(),
            is_keepout,
            is_polygon_outline: flags1.contains(PrimitiveFlags1::POLYGON_OUTLINE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::altium::test_support::RecordBuilder;

    fn track_body(b: &mut RecordBuilder) {
        b.u8(32)
            .u8(0x06)
            .u8(0x00)
            .u16(12)
            .u16(2)
            .u16(65535)
            .zeros(4)
            .i32(0)
            .i32(0)
            .i32(1_000_000)
            .i32(-500_000)
            .i32(100_000)
            .u16(4)
            .u8(0);
    }

    #[test]
    fn test_read_track() {
        let data = RecordBuilder::new()
            .tag(RecordTag::Track)
            .subrecord(track_body)
            .build();
        let mut reader = BinaryReader::new(data);
        let track = Track::read(&mut reader).unwrap();
        assert_eq!(track.layer, AltiumLayer::BOTTOM_LAYER);
        assert!(!track.is_locked);
        assert!(track.is_polygon_outline);
        assert!(!track.is_keepout);
        assert_eq!(track.net, 12);
        assert_eq!(track.polygon, 2);
        assert_eq!(track.end, Vector2I::new(2_540_000, 1_270_000));
        assert_eq!(track.width, 254_000);
        assert_eq!(track.subpoly_index, 4);
        assert_eq!(track.keepout_restrictions, 0);
    }

    #[test]
    fn test_newer_layout_with_restrictions() {
        let data = RecordBuilder::new()
            .tag(RecordTag::Track)
            .subrecord(|b| {
                track_body(b);
                b.zeros(5).u8(0x1A).zeros(10);
            })
            .build();
        let mut reader = BinaryReader::new(data);
        let track = Track::read(&mut reader).unwrap();
        assert_eq!(track.keepout_restrictions, 0x1A);
        assert_eq!(reader.remaining_bytes(), 0);
    }
}
