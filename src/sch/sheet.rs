//! Sheet settings and hierarchical sheet symbols.

use super::enums::{
    read_enum, PortIoType, PortStyle, RecordId, SheetEntrySide, SheetOrientation, SheetSize,
};
use super::{
    expect_record, read_color, read_owner_index, read_owner_part_id, read_point, read_unit_frac,
    read_unit_frac1,
};
use crate::error::Result;
use crate::io::altium::PropertyMap;
use crate::types::{Color, Vector2I};

/// One entry of the sheet font table. Text records select fonts by their
/// 1-based `FONTID`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetFont {
    pub font_name: String,
    /// Height in points.
    pub size: i32,
    pub rotation: i32,
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
}

/// Document settings (`RECORD=31`), one per sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub fonts: Vec<SheetFont>,
    pub use_custom_sheet: bool,
    pub custom_size: Vector2I,
    pub sheet_size: SheetSize,
    pub orientation: SheetOrientation,
}

impl Sheet {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Sheet)?;

        let font_count = props.read_int("FONTIDCOUNT", 0).max(0);
        let fonts = (1..=font_count)
            .map(|i| SheetFont {
                font_name: props.read_string(&format!("FONTNAME{}", i), ""),
                size: props.read_int(&format!("SIZE{}", i), 0),
                rotation: props.read_int(&format!("ROTATION{}", i), 0),
                italic: props.read_bool(&format!("ITALIC{}", i), false),
                bold: props.read_bool(&format!("BOLD{}", i), false),
                underline: props.read_bool(&format!("UNDERLINE{}", i), false),
            })
            .collect();

        Ok(Sheet {
            fonts,
            use_custom_sheet: props.read_bool("USECUSTOMSHEET", false),
            custom_size: Vector2I::new(
                read_unit_frac(props, "CUSTOMX"),
                read_unit_frac(props, "CUSTOMY"),
            ),
            sheet_size: read_enum(props, "SHEETSTYLE", SheetSize::A4),
            orientation: read_enum(props, "WORKSPACEORIENTATION", SheetOrientation::Landscape),
        })
    }

    /// Font selected by a `FONTID` value.
    pub fn font(&self, font_id: i32) -> Option<&SheetFont> {
        let index = usize::try_from(font_id).ok()?.checked_sub(1)?;
        self.fonts.get(index)
    }
}

/// Box standing for a child sheet (`RECORD=15`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetSymbol {
    pub owner_index: i32,
    pub owner_part_id: i32,
    /// Top left corner.
    pub location: Vector2I,
    pub size: Vector2I,
    pub is_solid: bool,
    pub color: Color,
    pub area_color: Color,
}

impl SheetSymbol {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::SheetSymbol)?;
        Ok(SheetSymbol {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            location: read_point(props, "LOCATION"),
            size: Vector2I::new(
                read_unit_frac(props, "XSIZE"),
                read_unit_frac(props, "YSIZE"),
            ),
            is_solid: props.read_bool("ISSOLID", false),
            color: read_color(props, "COLOR"),
            area_color: read_color(props, "AREACOLOR"),
        })
    }
}

/// Port on the edge of a sheet symbol (`RECORD=16`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetEntry {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub distance_from_top: i32,
    pub side: SheetEntrySide,
    pub name: String,
    pub io_type: PortIoType,
    pub style: PortStyle,
}

impl SheetEntry {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::SheetEntry)?;
        Ok(SheetEntry {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            distance_from_top: read_unit_frac1(props, "DISTANCEFROMTOP"),
            side: read_enum(props, "SIDE", SheetEntrySide::Left),
            name: props.read_string("NAME", ""),
            io_type: read_enum(props, "IOTYPE", PortIoType::Unspecified),
            style: read_enum(props, "STYLE", PortStyle::NoneHorizontal),
        })
    }
}
