//! Graphical records drawn in symbols and on sheets.

use super::enums::{read_enum, LineShape, LineStyle, LineWidth, RecordId, SchEnum};
use super::{
    expect_record, read_color, read_owner_index, read_owner_part_id, read_point,
    read_point_list, read_unit_frac,
};
use crate::error::{AltiumError, Result};
use crate::io::altium::PropertyMap;
use crate::types::{Color, Vector2I};

/// Ownership and fill settings shared by every shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeStyle {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub owner_part_display_mode: i32,
    pub line_width: i32,
    pub is_solid: bool,
    pub is_transparent: bool,
    pub color: Color,
    pub area_color: Color,
}

impl ShapeStyle {
    pub fn from_properties(props: &PropertyMap) -> Self {
        ShapeStyle {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            owner_part_display_mode: props.read_int("OWNERPARTDISPLAYMODE", 0),
            line_width: read_unit_frac(props, "LINEWIDTH"),
            is_solid: props.read_bool("ISSOLID", false),
            is_transparent: props.read_bool("TRANSPARENT", false),
            color: read_color(props, "COLOR"),
            area_color: read_color(props, "AREACOLOR"),
        }
    }
}

/// Cubic Bezier curves; points come in groups of four sharing end points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bezier {
    pub style: ShapeStyle,
    pub points: Vec<Vector2I>,
}

impl Bezier {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Bezier)?;
        Ok(Bezier {
            style: ShapeStyle::from_properties(props),
            points: read_point_list(props),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub style: ShapeStyle,
    pub points: Vec<Vector2I>,
    pub line_style: LineStyle,
    pub start_line_shape: LineShape,
    pub end_line_shape: LineShape,
    pub line_shape_size: LineWidth,
}

impl Polyline {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Polyline)?;

        // Newer files add LINESTYLEEXT for styles the old key cannot hold
        let line_style = props
            .read_int("LINESTYLE", 0)
            .max(props.read_int("LINESTYLEEXT", 0));

        Ok(Polyline {
            style: ShapeStyle::from_properties(props),
            points: read_point_list(props),
            line_style: LineStyle::from_i32(line_style).unwrap_or_default(),
            start_line_shape: read_enum(props, "STARTLINESHAPE", LineShape::None),
            end_line_shape: read_enum(props, "ENDLINESHAPE", LineShape::None),
            line_shape_size: read_enum(props, "LINESHAPESIZE", LineWidth::Smallest),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub style: ShapeStyle,
    pub points: Vec<Vector2I>,
}

impl Polygon {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Polygon)?;
        Ok(Polygon {
            style: ShapeStyle::from_properties(props),
            points: read_point_list(props),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ellipse {
    pub style: ShapeStyle,
    pub center: Vector2I,
    pub radius: i32,
    pub secondary_radius: i32,
}

impl Ellipse {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Ellipse)?;
        Ok(Ellipse {
            style: ShapeStyle::from_properties(props),
            center: read_point(props, "LOCATION"),
            radius: read_unit_frac(props, "RADIUS"),
            secondary_radius: read_unit_frac(props, "SECONDARYRADIUS"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoundRectangle {
    pub style: ShapeStyle,
    pub bottom_left: Vector2I,
    pub top_right: Vector2I,
    pub corner_radius: Vector2I,
}

impl RoundRectangle {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::RoundRectangle)?;
        Ok(RoundRectangle {
            style: ShapeStyle::from_properties(props),
            bottom_left: read_point(props, "LOCATION"),
            top_right: read_point(props, "CORNER"),
            corner_radius: Vector2I::new(
                read_unit_frac(props, "CORNERXRADIUS"),
                read_unit_frac(props, "CORNERYRADIUS"),
            ),
        })
    }
}

/// Circular (`RECORD=12`) or elliptical (`RECORD=11`) arc. Angles are in
/// degrees, counter-clockwise from the X axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arc {
    pub style: ShapeStyle,
    pub is_elliptical: bool,
    pub center: Vector2I,
    pub radius: i32,
    /// Equal to `radius` for circular arcs.
    pub secondary_radius: i32,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        let record = props.read_int("RECORD", -1);
        let is_elliptical = match RecordId::from_i32(record) {
            Some(RecordId::Arc) => false,
            Some(RecordId::EllipticalArc) => true,
            _ => {
                return Err(AltiumError::UnexpectedRecord {
                    expected: RecordId::Arc.to_i32(),
                    found: record,
                })
            }
        };

        let radius = read_unit_frac(props, "RADIUS");
        Ok(Arc {
            style: ShapeStyle::from_properties(props),
            is_elliptical,
            center: read_point(props, "LOCATION"),
            radius,
            secondary_radius: if is_elliptical {
                read_unit_frac(props, "SECONDARYRADIUS")
            } else {
                radius
            },
            start_angle: props.read_double("STARTANGLE", 0.0),
            end_angle: props.read_double("ENDANGLE", 0.0),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub style: ShapeStyle,
    pub point1: Vector2I,
    pub point2: Vector2I,
    pub line_style: LineStyle,
}

impl Line {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Line)?;
        Ok(Line {
            style: ShapeStyle::from_properties(props),
            point1: read_point(props, "LOCATION"),
            point2: read_point(props, "CORNER"),
            line_style: read_enum(props, "LINESTYLE", LineStyle::Solid),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rectangle {
    pub style: ShapeStyle,
    pub bottom_left: Vector2I,
    pub top_right: Vector2I,
}

impl Rectangle {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Rectangle)?;
        Ok(Rectangle {
            style: ShapeStyle::from_properties(props),
            bottom_left: read_point(props, "LOCATION"),
            top_right: read_point(props, "CORNER"),
        })
    }
}

/// Bitmap placed on a sheet. Embedded images live in the `Storage` stream
/// under `filename`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub filename: String,
    pub location: Vector2I,
    pub corner: Vector2I,
    pub embed_image: bool,
    pub keep_aspect: bool,
}

impl Image {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Image)?;
        Ok(Image {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            filename: props.read_string("FILENAME", ""),
            location: read_point(props, "LOCATION"),
            corner: read_point(props, "CORNER"),
            embed_image: props.read_bool("EMBEDIMAGE", false),
            keep_aspect: props.read_bool("KEEPASPECT", false),
        })
    }
}
