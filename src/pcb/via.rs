//! Via primitive (`Vias6`).

use super::enums::PadMode;
use super::flags::{PrimitiveFlags1, PrimitiveFlags2};
use super::{check_parsed, expect_tag, AltiumLayer, RecordTag};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::Vector2I;

const STREAM: &str = "Vias6";

/// A plated via between two copper layers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Via {
    pub is_locked: bool,
    pub is_tent_top: bool,
    pub is_tent_bottom: bool,
    pub is_test_fab_top: bool,
    pub is_test_fab_bottom: bool,
    pub net: u16,
    pub position: Vector2I,
    pub diameter: i32,
    pub hole_size: i32,
    pub layer_start: AltiumLayer,
    pub layer_end: AltiumLayer,
    pub via_mode: PadMode,
    pub soldermask_expansion_manual: bool,
    pub soldermask_expansion_linked: bool,
    pub soldermask_expansion_front: i32,
    pub soldermask_expansion_back: i32,
    /// Only meaningful for full-stack vias.
    pub diameter_by_layer: [i32; 32],
}

type ViaExtension = fn(&mut Via, &mut BinaryReader);

/// Fields appended by newer versions, applied in order when the record is at
/// least the given length. Records of 74 bytes or less are simple vias.
const EXTENSIONS: &[(usize, ViaExtension)] = &[
    (75, read_mask_and_mode),
    (203, read_diameter_by_layer),
    (246, read_back_mask),
];

fn read_mask_and_mode(via: &mut Via, reader: &mut BinaryReader) {
    via.soldermask_expansion_manual = reader.read_u8() & 0x02 != 0;
    via.soldermask_expansion_front = reader.read_kicad_unit();
    reader.read_kicad_unit();
    reader.skip(2);
    reader.skip(32);
    via.via_mode = PadMode::from(reader.read_u8());
}

fn read_diameter_by_layer(via: &mut Via, reader: &mut BinaryReader) {
    for diameter in via.diameter_by_layer.iter_mut() {
        *diameter = reader.read_kicad_unit();
    }
}

fn read_back_mask(via: &mut Via, reader: &mut BinaryReader) {
    reader.skip(38);
    via.soldermask_expansion_linked = reader.read_u8() & 0x01 != 0;
    via.soldermask_expansion_back = reader.read_kicad_unit();
}

impl Via {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        expect_tag(reader, RecordTag::Via, STREAM)?;

        let length = reader.begin_subrecord();
        reader.skip(1);

        let flags1 = PrimitiveFlags1::from_byte(reader.read_u8());
        let flags2 = PrimitiveFlags2::from_byte(reader.read_u8());
        let mut via = Via {
            is_locked: flags1.is_locked(),
            is_tent_top: flags1.contains(PrimitiveFlags1::TENT_TOP),
            is_tent_bottom: flags1.contains(PrimitiveFlags1::TENT_BOTTOM),
            is_test_fab_top: flags1.contains(PrimitiveFlags1::TEST_FAB_TOP),
            is_test_fab_bottom: flags2.contains(PrimitiveFlags2::TEST_FAB_BOTTOM),
            ..Default::default()
        };

        via.net = reader.read_u16();
        reader.skip(8);
        via.position = reader.read_position();
        via.diameter = reader.read_kicad_unit();
        via.hole_size = reader.read_kicad_unit();
        via.layer_start = AltiumLayer(reader.read_u8());
        via.layer_end = AltiumLayer(reader.read_u8());

        for &(min_length, extension) in EXTENSIONS {
            if length >= min_length {
                extension(&mut via, reader);
            }
        }

        reader.skip_subrecord();
        check_parsed(reader, STREAM)?;
        Ok(via)
    }
}
