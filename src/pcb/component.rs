//! Footprint placements (`Components6`).

use super::enums::TextPosition;
use super::{check_parsed, read_record_properties, AltiumLayer};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::Vector2I;

const STREAM: &str = "Components6";

/// A placed footprint. Primitives refer to it by record index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    pub layer: AltiumLayer,
    pub position: Vector2I,
    pub rotation: f64,
    pub locked: bool,
    pub name_on: bool,
    pub comment_on: bool,
    pub source_designator: String,
    pub source_footprint_library: String,
    pub pattern: String,
    pub source_component_library: String,
    pub source_lib_reference: String,
    pub name_auto_position: TextPosition,
    pub comment_auto_position: TextPosition,
}

impl Component {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let props = read_record_properties(reader, STREAM)?;
        check_parsed(reader, STREAM)?;

        Ok(Component {
            layer: AltiumLayer::from_name(&props.read_string("LAYER", "")),
            position: Vector2I::new(
                props.read_kicad_unit("X", "0mil"),
                -props.read_kicad_unit("Y", "0mil"),
            ),
            rotation: props.read_double("ROTATION", 0.0),
            locked: props.read_bool("LOCKED", false),
            name_on: props.read_bool("NAMEON", true),
            comment_on: props.read_bool("COMMENTON", false),
            source_designator: props.read_string("SOURCEDESIGNATOR", ""),
            source_footprint_library: props.read_unicode_string("SOURCEFOOTPRINTLIBRARY", ""),
            pattern: props.read_unicode_string("PATTERN", ""),
            source_component_library: props.read_string("SOURCECOMPONENTLIBRARY", ""),
            source_lib_reference: props.read_string("SOURCELIBREFERENCE", ""),
            name_auto_position: TextPosition::from(props.read_int("NAMEAUTOPOSITION", 0)),
            comment_auto_position: TextPosition::from(props.read_int("COMMENTAUTOPOSITION", 0)),
        })
    }
}
