//! Placed or library symbols (`RECORD=1`).

use super::enums::{read_enum, Orientation, RecordId};
use super::{expect_record, read_point};
use crate::error::Result;
use crate::io::altium::PropertyMap;
use crate::types::Vector2I;

/// Owner of the pins, graphics and parameters that follow it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Symbol {
    pub current_part_id: i32,
    pub lib_reference: String,
    pub source_library_name: String,
    pub component_description: String,
    pub orientation: Orientation,
    pub is_mirrored: bool,
    pub location: Vector2I,
    /// Number of parts plus one; multi-part symbols count from 1.
    pub part_count: i32,
    pub display_mode_count: i32,
    pub display_mode: i32,
    pub index_in_sheet: i32,
}

impl Symbol {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Component)?;

        // DISPLAYMODE may hold a non-numeric value in some files
        let display_mode = props
            .read_string("DISPLAYMODE", "0")
            .parse::<i32>()
            .unwrap_or(0);

        Ok(Symbol {
            current_part_id: props.read_int("CURRENTPARTID", 0),
            lib_reference: props.read_string("LIBREFERENCE", ""),
            source_library_name: props.read_string("SOURCELIBRARYNAME", ""),
            component_description: props.read_string("COMPONENTDESCRIPTION", ""),
            orientation: read_enum(props, "ORIENTATION", Orientation::Rightwards),
            is_mirrored: props.read_bool("ISMIRRORED", false),
            location: read_point(props, "LOCATION"),
            part_count: props.read_int("PARTCOUNT", 0),
            display_mode_count: props.read_int("DISPLAYMODECOUNT", 0),
            display_mode,
            index_in_sheet: props.read_int("INDEXINSHEET", -1),
        })
    }
}
