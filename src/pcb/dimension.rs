//! Dimension annotations (`Dimensions6`).

use super::enums::{DimensionKind, DimensionUnit};
use super::{check_parsed, read_record_properties, AltiumLayer};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::Vector2I;

const STREAM: &str = "Dimensions6";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dimension {
    pub kind: DimensionKind,
    pub layer: AltiumLayer,
    pub xy1: Vector2I,
    pub height: i32,
    pub angle: f64,
    pub line_width: i32,
    pub text_height: i32,
    pub text_line_width: i32,
    pub text_precision: i32,
    pub text_bold: bool,
    pub text_italic: bool,
    pub text_gap: i32,
    pub arrow_size: i32,
    /// Raw `TEXTPOSITION` value.
    pub text_position: String,
    pub text_format: String,
    pub text_prefix: String,
    pub text_suffix: String,
    pub text_unit: DimensionUnit,
    pub reference_points: Vec<Vector2I>,
    pub text_points: Vec<Vector2I>,
}

impl Dimension {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        reader.skip(2);
        let props = read_record_properties(reader, STREAM)?;

        let point = |x: &str, y: &str| {
            Vector2I::new(
                props.read_kicad_unit(x, "0mil"),
                -props.read_kicad_unit(y, "0mil"),
            )
        };

        let reference_count = props.read_int("REFERENCES_COUNT", 0).max(0);
        let reference_points = (0..reference_count)
            .map(|i| {
                point(
                    &format!("REFERENCE{}POINTX", i),
                    &format!("REFERENCE{}POINTY", i),
                )
            })
            .collect();

        let mut text_points = Vec::new();
        for i in 1.. {
            let x = format!("TEXT{}X", i);
            let y = format!("TEXT{}Y", i);
            if !props.contains_key(&x) || !props.contains_key(&y) {
                break;
            }
            text_points.push(point(&x, &y));
        }

        let dimension = Dimension {
            kind: DimensionKind::from(props.read_int("DIMENSIONKIND", 0)),
            layer: AltiumLayer::from_name(&props.read_string("LAYER", "")),
            xy1: point("X1", "Y1"),
            height: props.read_kicad_unit("HEIGHT", "0mil"),
            angle: props.read_double("ANGLE", 0.0),
            line_width: props.read_kicad_unit("LINEWIDTH", "10mil"),
            text_height: props.read_kicad_unit("TEXTHEIGHT", "10mil"),
            text_line_width: props.read_kicad_unit("TEXTLINEWIDTH", "6mil"),
            text_precision: props.read_int("TEXTPRECISION", 2),
            text_bold: props.read_bool("TEXTBOLD", false),
            text_italic: props.read_bool("ITALIC", false),
            text_gap: props.read_kicad_unit("TEXTGAP", "10mil"),
            arrow_size: props.read_kicad_unit("ARROWSIZE", "60mil"),
            text_position: props.read_string("TEXTPOSITION", ""),
            text_format: props.read_string("TEXTFORMAT", ""),
            text_prefix: props.read_string("TEXTPREFIX", ""),
            text_suffix: props.read_string("TEXTSUFFIX", ""),
            text_unit: DimensionUnit::from_name(&props.read_string("TEXTDIMENSIONUNIT", "Millimeters")),
            reference_points,
            text_points,
        };

        check_parsed(reader, STREAM)?;
        Ok(dimension)
    }
}
