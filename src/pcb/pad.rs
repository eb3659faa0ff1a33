//! Pad primitive (`Pads6`).
//!
//! A pad record is a tag byte and six sub-records:
//!
//! 1. the pad name
//! 2. - 4. unknown, skipped
//! 5. geometry; at least 110 bytes, newer files append fields
//! 6. optional full-stack sizes and shapes per layer

use log::trace;

use super::enums::{ExpansionMode, PadHoleShape, PadMode, PadShape, PadShapeAlt};
use super::flags::{PrimitiveFlags1, PrimitiveFlags2};
use super::{check_parsed, expect_tag, AltiumLayer, RecordTag};
use crate::error::{AltiumError, Result};
use crate::io::altium::BinaryReader;
use crate::types::Vector2I;

const STREAM: &str = "Pads6";

/// Smallest known geometry sub-record.
pub const MIN_GEOMETRY_LENGTH: usize = 110;

/// Size of the per-layer size/shape sub-record this decoder understands.
pub const SIZE_AND_SHAPE_LENGTH: usize = 596;

/// Inner layers with their own pad size.
pub const INNER_LAYER_COUNT: usize = 29;

/// Layers with their own hole offset, shape and corner radius.
pub const LAYER_COUNT: usize = 32;

/// Per-layer geometry of full-stack pads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PadSizeAndShape {
    pub hole_shape: PadHoleShape,
    pub slot_size: i32,
    pub slot_rotation: f64,
    pub inner_size: [Vector2I; INNER_LAYER_COUNT],
    pub inner_shape: [PadShape; INNER_LAYER_COUNT],
    pub hole_offset: [Vector2I; LAYER_COUNT],
    pub alt_shape: [PadShapeAlt; LAYER_COUNT],
    /// Percent of the smaller pad side.
    pub corner_radius: [u8; LAYER_COUNT],
}

/// A through-hole or SMD pad.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pad {
    pub name: String,
    pub layer: AltiumLayer,
    pub is_locked: bool,
    pub is_tent_top: bool,
    pub is_tent_bottom: bool,
    pub is_test_fab_top: bool,
    pub is_test_fab_bottom: bool,
    pub net: u16,
    pub component: u16,
    pub position: Vector2I,
    pub top_size: Vector2I,
    pub mid_size: Vector2I,
    pub bot_size: Vector2I,
    pub hole_size: i32,
    pub top_shape: PadShape,
    pub mid_shape: PadShape,
    pub bot_shape: PadShape,
    /// Rotation in degrees.
    pub direction: f64,
    pub plated: bool,
    pub pad_mode: PadMode,
    pub pastemask_expansion_mode: ExpansionMode,
    pub soldermask_expansion_mode: ExpansionMode,
    pub pastemask_expansion_manual: i32,
    pub soldermask_expansion_manual: i32,
    pub hole_rotation: f64,
    pub to_layer: AltiumLayer,
    pub from_layer: AltiumLayer,
    pub pad_to_die_length: i32,
    pub pad_to_die_delay: i32,
    pub size_and_shape: Option<Box<PadSizeAndShape>>,
}

/// Reads fields appended to the geometry sub-record by a newer version.
type GeometryExtension = fn(&mut Pad, &mut BinaryReader);

/// Optional geometry fields, applied in order when the sub-record is at
/// least the given length.
const GEOMETRY_EXTENSIONS: &[(usize, GeometryExtension)] = &[
    (114, read_hole_rotation),
    (120, read_layer_span),
    (202, read_pad_to_die),
];

fn read_hole_rotation(pad: &mut Pad, reader: &mut BinaryReader) {
    pad.hole_rotation = reader.read_f64();
}

fn read_layer_span(pad: &mut Pad, reader: &mut BinaryReader) {
    pad.to_layer = AltiumLayer(reader.read_u8());
    reader.skip(2);
    pad.from_layer = AltiumLayer(reader.read_u8());
}

fn read_pad_to_die(pad: &mut Pad, reader: &mut BinaryReader) {
    reader.skip(40);
    pad.pad_to_die_length = reader.read_kicad_unit();
    reader.skip(32);
    pad.pad_to_die_delay = reader.read_kicad_unit();
}

impl Pad {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        expect_tag(reader, RecordTag::Pad, STREAM)?;

        let mut pad = Pad::default();

        // Sub-record 1: name
        if reader.begin_subrecord() == 0 {
            return Err(AltiumError::InvalidLength {
                stream: STREAM,
                message: "subrecord1 is empty".into(),
            });
        }
        pad.name = reader.read_legacy_string();
        if reader.remaining_subrecord_bytes() != 0 {
            return Err(AltiumError::InvalidLength {
                stream: STREAM,
                message: "subrecord1 holds more than the pad name".into(),
            });
        }
        reader.skip_subrecord();

        // Sub-records 2 to 4
        for _ in 0..3 {
            reader.begin_subrecord();
            reader.skip_subrecord();
        }

        // Sub-record 5: geometry
        let geometry_length = reader.begin_subrecord();
        if geometry_length < MIN_GEOMETRY_LENGTH {
            return Err(AltiumError::InvalidLength {
                stream: STREAM,
                message: format!(
                    "subrecord5 has length {} < {}",
                    geometry_length, MIN_GEOMETRY_LENGTH
                ),
            });
        }
        pad.read_geometry(reader);
        for &(min_length, extension) in GEOMETRY_EXTENSIONS {
            if geometry_length >= min_length {
                extension(&mut pad, reader);
            }
        }
        reader.skip_subrecord();

        // Sub-record 6: per-layer sizes, known lengths 596, 628 and 651
        let stack_length = reader.begin_subrecord();
        if stack_length >= SIZE_AND_SHAPE_LENGTH {
            pad.size_and_shape = Some(Box::new(read_size_and_shape(reader)));
        } else if stack_length != 0 {
            trace!("Pads6 stream has unexpected length for subrecord 6: {}", stack_length);
        }
        reader.skip_subrecord();

        check_parsed(reader, STREAM)?;
        Ok(pad)
    }

    /// The 106 bytes every geometry sub-record carries.
    fn read_geometry(&mut self, reader: &mut BinaryReader) {
        self.layer = AltiumLayer(reader.read_u8());
        let flags1 = PrimitiveFlags1::from_byte(reader.read_u8());
        self.is_test_fab_top = flags1.contains(PrimitiveFlags1::TEST_FAB_TOP);
        self.is_tent_bottom = flags1.contains(PrimitiveFlags1::TENT_BOTTOM);
        self.is_tent_top = flags1.contains(PrimitiveFlags1::TENT_TOP);
        self.is_locked = flags1.is_locked();
        let flags2 = PrimitiveFlags2::from_byte(reader.read_u8());
        self.is_test_fab_bottom = flags2.contains(PrimitiveFlags2::TEST_FAB_BOTTOM);

        self.net = reader.read_u16();
        reader.skip(2);
        self.component = reader.read_u16();
        reader.skip(4);

        self.position = reader.read_position();
        self.top_size = reader.read_size();
        self.mid_size = reader.read_size();
        self.bot_size = reader.read_size();
        self.hole_size = reader.read_kicad_unit();
        self.top_shape = PadShape::from(reader.read_u8());
        self.mid_shape = PadShape::from(reader.read_u8());
        self.bot_shape = PadShape::from(reader.read_u8());
        self.direction = reader.read_f64();
        self.plated = reader.read_u8() != 0;
        reader.skip(1);
        self.pad_mode = PadMode::from(reader.read_u8());
        reader.skip(23);
        self.pastemask_expansion_manual = reader.read_kicad_unit();
        self.soldermask_expansion_manual = reader.read_kicad_unit();
        reader.skip(7);
        self.pastemask_expansion_mode = ExpansionMode::from(reader.read_u8());
        self.soldermask_expansion_mode = ExpansionMode::from(reader.read_u8());
        reader.skip(3);
    }
}

fn read_size_and_shape(reader: &mut BinaryReader) -> PadSizeAndShape {
    let mut stack = PadSizeAndShape::default();

    for size in stack.inner_size.iter_mut() {
        size.x = reader.read_kicad_unit();
    }
    for size in stack.inner_size.iter_mut() {
        size.y = reader.read_kicad_unit();
    }
    for shape in stack.inner_shape.iter_mut() {
        *shape = PadShape::from(reader.read_u8());
    }
    reader.skip(1);
    stack.hole_shape = PadHoleShape::from(reader.read_u8());
    stack.slot_size = reader.read_kicad_unit();
    stack.slot_rotation = reader.read_f64();
    for offset in stack.hole_offset.iter_mut() {
        offset.x = reader.read_kicad_unit_x();
    }
    for offset in stack.hole_offset.iter_mut() {
        offset.y = reader.read_kicad_unit_y();
    }
    reader.skip(1);
    for shape in stack.alt_shape.iter_mut() {
        *shape = PadShapeAlt::from(reader.read_u8());
    }
    for radius in stack.corner_radius.iter_mut() {
        *radius = reader.read_u8();
    }

    stack
}
