//! Text records: labels, text frames, notes, designators, parameters and
//! the name and file name of sheet symbols.

use super::enums::{
    read_enum, LabelJustification, LineWidth, Orientation, RecordId, SchEnum, TextFrameAlignment,
};
use super::{
    expect_record, read_color, read_owner_index, read_owner_part_id, read_point, read_unit_frac,
};
use crate::error::{AltiumError, Result};
use crate::io::altium::PropertyMap;
use crate::types::{Color, Vector2I};

/// Free text (`RECORD=4`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub location: Vector2I,
    /// Raw text; overbar markup is not converted for labels.
    pub text: String,
    pub font_id: i32,
    pub is_mirrored: bool,
    pub justification: LabelJustification,
    pub orientation: Orientation,
    pub color: Color,
}

impl Label {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Label)?;
        Ok(Label {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            location: read_point(props, "LOCATION"),
            text: props.read_string("TEXT", ""),
            font_id: props.read_int("FONTID", 0),
            is_mirrored: props.read_bool("ISMIRRORED", false),
            justification: read_enum(props, "JUSTIFICATION", LabelJustification::BottomLeft),
            orientation: read_enum(props, "ORIENTATION", Orientation::Rightwards),
            color: read_color(props, "COLOR"),
        })
    }
}

/// Fields only notes carry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteInfo {
    pub author: String,
    pub is_collapsed: bool,
}

/// Multi-line text in a box (`RECORD=28`), or a note (`RECORD=209`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFrame {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub location: Vector2I,
    pub corner: Vector2I,
    pub text: String,
    pub font_id: i32,
    pub word_wrap: bool,
    pub show_border: bool,
    pub text_margin: i32,
    pub is_solid: bool,
    pub border_width: LineWidth,
    pub alignment: TextFrameAlignment,
    pub area_color: Color,
    pub text_color: Color,
    pub border_color: Color,
    /// Present for notes.
    pub note: Option<NoteInfo>,
}

impl TextFrame {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        let record = props.read_int("RECORD", -1);
        let note = match RecordId::from_i32(record) {
            Some(RecordId::TextFrame) => None,
            Some(RecordId::Note) => Some(NoteInfo {
                author: props.read_string("AUTHOR", ""),
                is_collapsed: props.read_bool("COLLAPSED", false),
            }),
            _ => {
                return Err(AltiumError::UnexpectedRecord {
                    expected: RecordId::TextFrame.to_i32(),
                    found: record,
                })
            }
        };

        Ok(TextFrame {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            location: read_point(props, "LOCATION"),
            corner: read_point(props, "CORNER"),
            // `~1` encodes a line break
            text: props.read_string("TEXT", "").replace("~1", "\n"),
            font_id: props.read_int("FONTID", 0),
            word_wrap: props.read_bool("WORDWRAP", false),
            show_border: props.read_bool("SHOWBORDER", false),
            text_margin: read_unit_frac(props, "TEXTMARGIN"),
            is_solid: props.read_bool("ISSOLID", false),
            border_width: read_enum(props, "LINEWIDTH", LineWidth::Smallest),
            alignment: read_enum(props, "ALIGNMENT", TextFrameAlignment::Left),
            area_color: read_color(props, "AREACOLOR"),
            text_color: read_color(props, "TEXTCOLOR"),
            border_color: read_color(props, "COLOR"),
            note,
        })
    }

    pub fn is_note(&self) -> bool {
        self.note.is_some()
    }
}

/// Reference designator of a symbol (`RECORD=34`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Designator {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub name: String,
    pub text: String,
    pub location: Vector2I,
    pub justification: LabelJustification,
    pub orientation: Orientation,
    pub font_id: i32,
    pub color: Color,
}

impl Designator {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Designator)?;
        Ok(Designator {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            name: props.read_string("NAME", ""),
            text: props.read_string("TEXT", ""),
            location: read_point(props, "LOCATION"),
            justification: read_enum(props, "JUSTIFICATION", LabelJustification::BottomLeft),
            orientation: read_enum(props, "ORIENTATION", Orientation::Rightwards),
            font_id: props.read_int("FONTID", 0),
            color: read_color(props, "COLOR"),
        })
    }
}

/// Named value of a symbol or sheet (`RECORD=41`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub location: Vector2I,
    pub justification: LabelJustification,
    pub orientation: Orientation,
    pub name: String,
    pub text: String,
    pub is_hidden: bool,
    pub is_mirrored: bool,
    pub is_show_name: bool,
    pub font_id: i32,
    pub color: Color,
}

impl Parameter {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Parameter)?;
        Ok(Parameter {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            location: read_point(props, "LOCATION"),
            justification: read_enum(props, "JUSTIFICATION", LabelJustification::BottomLeft),
            orientation: read_enum(props, "ORIENTATION", Orientation::Rightwards),
            name: props.read_string("NAME", ""),
            text: props.read_string("TEXT", ""),
            is_hidden: props.read_bool("ISHIDDEN", false),
            is_mirrored: props.read_bool("ISMIRRORED", false),
            is_show_name: props.read_bool("SHOWNAME", false),
            font_id: props.read_int("FONTID", 0),
            color: read_color(props, "COLOR"),
        })
    }
}

/// Sheet name (`RECORD=32`) or file name (`RECORD=33`) of a sheet symbol.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetText {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub text: String,
    pub location: Vector2I,
    pub orientation: Orientation,
    pub font_id: i32,
    pub is_hidden: bool,
    pub color: Color,
}

impl SheetText {
    pub fn from_properties(props: &PropertyMap, kind: RecordId) -> Result<Self> {
        expect_record(props, kind)?;
        Ok(SheetText {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            text: props.read_string("TEXT", ""),
            location: read_point(props, "LOCATION"),
            orientation: read_enum(props, "ORIENTATION", Orientation::Rightwards),
            font_id: props.read_int("FONTID", 0),
            is_hidden: props.read_bool("ISHIDDEN", false),
            color: read_color(props, "COLOR"),
        })
    }
}
