//! Records that make electrical connections on a sheet.

use super::enums::{
    read_enum, LabelJustification, Orientation, PortIoType, PortStyle, PowerPortStyle, RecordId,
    TextFrameAlignment,
};
use super::{
    expect_record, read_color, read_owner_index, read_owner_part_id, read_point,
    read_point_list, read_unit_frac,
};
use crate::error::Result;
use crate::io::altium::PropertyMap;
use crate::types::{Color, Vector2I};

/// Power or ground symbol naming a global net (`RECORD=17`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PowerPort {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub location: Vector2I,
    pub text: String,
    pub style: PowerPortStyle,
    pub orientation: Orientation,
    pub show_net_name: bool,
    pub font_id: i32,
    pub color: Color,
}

impl PowerPort {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::PowerPort)?;
        Ok(PowerPort {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            location: read_point(props, "LOCATION"),
            text: props.read_string("TEXT", ""),
            style: read_enum(props, "STYLE", PowerPortStyle::Circle),
            orientation: read_enum(props, "ORIENTATION", Orientation::Rightwards),
            show_net_name: props.read_bool("SHOWNETNAME", true),
            font_id: props.read_int("FONTID", 0),
            color: read_color(props, "COLOR"),
        })
    }
}

/// Sheet or harness port (`RECORD=18`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Port {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub location: Vector2I,
    pub name: String,
    pub harness_type: String,
    pub width: i32,
    pub height: i32,
    pub io_type: PortIoType,
    pub style: PortStyle,
    pub alignment: TextFrameAlignment,
    pub font_id: i32,
    pub color: Color,
    pub area_color: Color,
    pub text_color: Color,
}

impl Port {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Port)?;
        Ok(Port {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            location: read_point(props, "LOCATION"),
            name: props.read_string("NAME", ""),
            harness_type: props.read_string("HARNESSTYPE", ""),
            width: read_unit_frac(props, "WIDTH"),
            height: read_unit_frac(props, "HEIGHT"),
            io_type: read_enum(props, "IOTYPE", PortIoType::Unspecified),
            style: read_enum(props, "STYLE", PortStyle::NoneHorizontal),
            alignment: read_enum(props, "ALIGNMENT", TextFrameAlignment::Left),
            font_id: props.read_int("FONTID", 0),
            color: read_color(props, "COLOR"),
            area_color: read_color(props, "AREACOLOR"),
            text_color: read_color(props, "TEXTCOLOR"),
        })
    }
}

/// No-ERC marker (`RECORD=22`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoErc {
    pub location: Vector2I,
    pub is_active: bool,
    pub suppress_all: bool,
}

impl NoErc {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::NoErc)?;
        Ok(NoErc {
            location: read_point(props, "LOCATION"),
            is_active: props.read_bool("ISACTIVE", true),
            suppress_all: props.read_bool("SUPPRESSALL", true),
        })
    }
}

/// Local net name attached to a wire (`RECORD=25`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetLabel {
    pub owner_part_id: i32,
    pub location: Vector2I,
    pub text: String,
    pub orientation: Orientation,
    pub justification: LabelJustification,
    pub font_id: i32,
    pub color: Color,
}

impl NetLabel {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::NetLabel)?;
        Ok(NetLabel {
            owner_part_id: read_owner_part_id(props),
            location: read_point(props, "LOCATION"),
            text: props.read_string("TEXT", ""),
            orientation: read_enum(props, "ORIENTATION", Orientation::Rightwards),
            justification: read_enum(props, "JUSTIFICATION", LabelJustification::BottomLeft),
            font_id: props.read_int("FONTID", 0),
            color: read_color(props, "COLOR"),
        })
    }
}

macro_rules! segment_record {
    ($(#[$meta:meta])* $name:ident, $record:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            pub owner_part_id: i32,
            pub line_width: i32,
            pub points: Vec<Vector2I>,
            pub color: Color,
        }

        impl $name {
            pub fn from_properties(props: &PropertyMap) -> Result<Self> {
                expect_record(props, $record)?;
                Ok($name {
                    owner_part_id: read_owner_part_id(props),
                    line_width: read_unit_frac(props, "LINEWIDTH"),
                    points: read_point_list(props),
                    color: read_color(props, "COLOR"),
                })
            }
        }
    };
}

segment_record! {
    /// Bus drawn as a polyline (`RECORD=26`).
    Bus, RecordId::Bus
}

segment_record! {
    /// Wire drawn as a polyline (`RECORD=27`).
    Wire, RecordId::Wire
}

/// Explicit connection dot (`RECORD=29`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Junction {
    pub owner_part_id: i32,
    pub location: Vector2I,
    pub color: Color,
}

impl Junction {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Junction)?;
        Ok(Junction {
            owner_part_id: read_owner_part_id(props),
            location: read_point(props, "LOCATION"),
            color: read_color(props, "COLOR"),
        })
    }
}

/// Diagonal stub between a wire and a bus (`RECORD=37`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusEntry {
    pub location: Vector2I,
    pub corner: Vector2I,
    pub color: Color,
}

impl BusEntry {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::BusEntry)?;
        Ok(BusEntry {
            location: read_point(props, "LOCATION"),
            corner: read_point(props, "CORNER"),
            color: read_color(props, "COLOR"),
        })
    }
}
