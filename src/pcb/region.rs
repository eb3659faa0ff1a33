//! Region primitive (`Regions6` and `ShapeBasedRegions6`).

use super::enums::RegionKind;
use super::flags::{PrimitiveFlags1, PrimitiveFlags2, DEFAULT_KEEPOUT_RESTRICTIONS};
use super::vertex::Vertex;
use super::{check_parsed, expect_tag, read_record_properties, AltiumLayer, RecordTag, ALTIUM_POLYGON_NONE};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::{convert_to_kicad_unit, Vector2I};

/// A filled area, cutout or keepout outline with optional holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    pub layer: AltiumLayer,
    pub net: u16,
    pub polygon: u16,
    pub component: u16,
    pub subpoly_index: u16,
    pub hole_count: u16,
    pub is_locked: bool,
    pub is_keepout: bool,
    pub is_polygon_outline: bool,
    pub is_shape_based: bool,
    pub keepout_restrictions: u8,
    pub kind: RegionKind,
    pub outline: Vec<Vertex>,
    pub holes: Vec<Vec<Vertex>>,
}

impl Region {
    /// Read one region. `extended_vertices` selects the shape-based layout:
    /// a closing vertex is stored and every vertex carries arc data.
    /// Otherwise vertices are pairs of `f64` coordinates.
    pub fn read(reader: &mut BinaryReader, extended_vertices: bool) -> Result<Self> {
        let stream = if extended_vertices {
            "ShapeBasedRegions6"
        } else {
            "Regions6"
        };
        expect_tag(reader, RecordTag::Region, stream)?;

        reader.begin_subrecord();
        let layer = AltiumLayer(reader.read_u8());
        let flags1 = PrimitiveFlags1::from_byte(reader.read_u8());
        let flags2 = PrimitiveFlags2::from_byte(reader.read_u8());

        let mut region = Region {
            layer,
            is_locked: flags1.is_locked(),
            is_polygon_outline: flags1.contains(PrimitiveFlags1::POLYGON_OUTLINE),
            is_keepout: flags2.is_keepout(),
            ..Default::default()
        };

        region.net = reader.read_u16();
        region.polygon = reader.read_u16();
        region.component = reader.read_u16();
        reader.skip(5);
        region.hole_count = reader.read_u16();
        reader.skip(2);

        let props = read_record_properties(reader, stream)?;
        let kind = props.read_int("KIND", 0);
        let is_board_cutout = props.read_bool("ISBOARDCUTOUT", false);
        region.kind = RegionKind::from_kind(kind, is_board_cutout);
        region.is_shape_based = props.read_bool("ISSHAPEBASED", false);
        region.keepout_restrictions =
            props.read_int("KEEPOUTRESTRIC", DEFAULT_KEEPOUT_RESTRICTIONS as i32) as u8;
        region.subpoly_index = props.read_int("SUBPOLYINDEX", ALTIUM_POLYGON_NONE as i32) as u16;

        let mut vertex_count = reader.read_u32();
        if extended_vertices {
            // closing vertex
            vertex_count = vertex_count.saturating_add(1);
        }
        for _ in 0..vertex_count {
            if reader.has_error() {
                break;
            }
            let vertex = if extended_vertices {
                read_extended_vertex(reader)
            } else {
                read_legacy_vertex(reader)
            };
            region.outline.push(vertex);
        }

        for _ in 0..region.hole_count {
            let count = reader.read_u32();
            let mut hole = Vec::new();
            for _ in 0..count {
                if reader.has_error() {
                    break;
                }
                hole.push(read_legacy_vertex(reader));
            }
            region.holes.push(hole);
        }

        reader.skip_subrecord();
        check_parsed(reader, stream)?;
        Ok(region)
    }
}

fn read_extended_vertex(reader: &mut BinaryReader) -> Vertex {
    let is_round = reader.read_u8() != 0;
    let position = reader.read_position();
    let center = reader.read_position();
    let radius = reader.read_kicad_unit();
    let start_angle = reader.read_f64();
    let end_angle = reader.read_f64();
    Vertex {
        is_round,
        radius,
        start_angle,
        end_angle,
        position,
        center,
    }
}

fn read_legacy_vertex(reader: &mut BinaryReader) -> Vertex {
    let x = convert_to_kicad_unit(reader.read_f64());
    let y = convert_to_kicad_unit(-reader.read_f64());
    Vertex::new(Vector2I::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AltiumError;
    use crate::io::altium::test_support::RecordBuilder;

    fn header(b: &mut RecordBuilder, hole_count: u16) {
        b.u8(1)
            .u8(0x04)
            .u8(0x00)
            .u16(3)
            .u16(65535)
            .u16(65535)
            .zeros(5)
            .u16(hole_count)
            .zeros(2);
    }

    #[test]
    fn test_legacy_region_with_hole() {
        let data = RecordBuilder::new()
            .tag(RecordTag::Region)
            .subrecord(|b| {
                header(b, 1);
                b.properties("|KIND=0|ISBOARDCUTOUT=TRUE|SUBPOLYINDEX=2")
                    .u32(3)
                    .f64(0.0)
                    .f64(0.0)
                    .f64(10_000.0)
                    .f64(0.0)
                    .f64(10_000.0)
                    .f64(10_000.0)
                    .u32(1)
                    .f64(5_000.0)
                    .f64(5_000.0);
            })
            .build();
        let mut reader = BinaryReader::new(data);
        let region = Region::read(&mut reader, false).unwrap();
        assert_eq!(region.kind, RegionKind::BoardCutout);
        assert!(!region.is_locked);
        assert_eq!(region.net, 3);
        assert_eq!(region.subpoly_index, 2);
        assert_eq!(region.keepout_restrictions, DEFAULT_KEEPOUT_RESTRICTIONS);
        assert_eq!(region.outline.len(), 3);
        assert_eq!(region.outline[2].position, Vector2I::new(25_400, -25_400));
        assert_eq!(region.holes.len(), 1);
        assert_eq!(region.holes[0][0].position, Vector2I::new(12_700, -12_700));
        assert_eq!(reader.remaining_bytes(), 0);
    }

    #[test]
    fn test_shape_based_region_has_closing_vertex() {
        let data = RecordBuilder::new()
            .tag(RecordTag::Region)
            .subrecord(|b| {
                header(b, 0);
                b.properties("|KIND=4|ISSHAPEBASED=TRUE").u32(1);
                for round in [1u8, 0u8] {
                    b.u8(round)
                        .i32(10_000)
                        .i32(10_000)
                        .i32(0)
                        .i32(0)
                        .i32(10_000)
                        .f64(0.0)
                        .f64(180.0);
                }
            })
            .build();
        let region = Region::read(&mut BinaryReader::new(data), true).unwrap();
        assert_eq!(region.kind, RegionKind::CavityDefinition);
        assert!(region.is_shape_based);
        assert_eq!(region.subpoly_index, ALTIUM_POLYGON_NONE);
        assert_eq!(region.outline.len(), 2);
        assert!(region.outline[0].is_round);
        assert_eq!(region.outline[0].position, Vector2I::new(25_400, -25_400));
        assert_eq!(region.outline[0].radius, 25_400);
        assert_eq!(region.outline[0].end_angle, 180.0);
        assert!(!region.outline[1].is_round);
    }

    #[test]
    fn test_region_without_properties() {
        let data = RecordBuilder::new()
            .tag(RecordTag::Region)
            .subrecord(|b| {
                header(b, 0);
                b.u32(0).u32(0);
            })
            .build();
        assert!(matches!(
            Region::read(&mut BinaryReader::new(data), false),
            Err(AltiumError::NoProperties { stream: "Regions6" })
        ));
    }
}
