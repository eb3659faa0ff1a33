//! Copper pours (`Polygons6`).

use super::enums::PolygonHatchStyle;
use super::vertex::Vertex;
use super::{check_parsed, read_record_properties, AltiumLayer, ALTIUM_NET_UNCONNECTED};
use crate::error::Result;
use crate::io::altium::BinaryReader;

const STREAM: &str = "Polygons6";

/// Pour outline and settings. The poured copper itself is stored as regions
/// and tracks that refer back to this record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub layer: AltiumLayer,
    pub net: u16,
    pub locked: bool,
    pub grid_size: i32,
    pub track_width: i32,
    pub min_prim_length: i32,
    pub use_octagons: bool,
    /// Pour order; lower pours first.
    pub pour_index: i32,
    pub hatch_style: PolygonHatchStyle,
    pub vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let props = read_record_properties(reader, STREAM)?;
        check_parsed(reader, STREAM)?;

        Ok(Polygon {
            layer: AltiumLayer::from_name(&props.read_string("LAYER", "")),
            net: props.read_int("NET", ALTIUM_NET_UNCONNECTED as i32) as u16,
            locked: props.read_bool("LOCKED", false),
            grid_size: props.read_kicad_unit("GRIDSIZE", "0mil"),
            track_width: props.read_kicad_unit("TRACKWIDTH", "0mil"),
            min_prim_length: props.read_kicad_unit("MINPRIMLENGTH", "0mil"),
            use_octagons: props.read_bool("USEOCTAGONS", false),
            pour_index: props.read_int("POURINDEX", 0),
            hatch_style: PolygonHatchStyle::from_name(&props.read_string("HATCHSTYLE", "")),
            vertices: Vertex::read_list(&props),
        })
    }
}
