//! Text primitive (`Texts6`).

use super::enums::{StrokeFontType, TextPosition, TextType};
use super::{check_parsed, expect_tag, AltiumLayer, RecordTag};
use crate::error::Result;
use crate::io::altium::{BinaryReader, WideStringTable};
use crate::types::Vector2I;

const STREAM: &str = "Texts6";

/// Bytes of the UTF-16LE font name field.
const FONT_NAME_SIZE: usize = 64;

/// A single or multi-line text on a PCB layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub layer: AltiumLayer,
    pub component: u16,
    pub position: Vector2I,
    pub height: i32,
    pub stroke_font: StrokeFontType,
    pub rotation: f64,
    pub is_mirrored: bool,
    pub stroke_width: i32,
    pub is_comment: bool,
    pub is_designator: bool,
    pub font_type: TextType,
    pub is_bold: bool,
    pub is_italic: bool,
    pub font_name: String,
    pub is_inverted: bool,
    pub margin_border_width: i32,
    /// Key into `WideStrings6`; absent in records predating the table.
    pub widestring_index: Option<u32>,
    pub is_inverted_rect: bool,
    pub textbox_rect_width: i32,
    pub textbox_rect_height: i32,
    pub textbox_rect_justification: TextPosition,
    pub text_offset_width: i32,
    pub is_justification_valid: bool,
    pub text: String,
}

type TextExtension = fn(&mut Text, &mut BinaryReader);

const EXTENSIONS: &[(usize, TextExtension)] = &[
    (123, read_font),
    (137, read_text_box),
    (231, read_justification),
];

fn read_font(text: &mut Text, reader: &mut BinaryReader) {
    text.is_comment = reader.read_u8() != 0;
    text.is_designator = reader.read_u8() != 0;
    reader.skip(1);
    text.font_type = TextType::from(reader.read_u8());
    text.is_bold = reader.read_u8() != 0;
    text.is_italic = reader.read_u8() != 0;
    text.font_name = reader.read_utf16_fixed(FONT_NAME_SIZE);
    text.is_inverted = reader.read_u8() != 0;
    text.margin_border_width = reader.read_kicad_unit();
    text.widestring_index = Some(reader.read_u32());
    reader.skip(4);
}

fn read_text_box(text: &mut Text, reader: &mut BinaryReader) {
    text.is_inverted_rect = reader.read_u8() != 0;
    text.textbox_rect_width = reader.read_kicad_unit();
    text.textbox_rect_height = reader.read_kicad_unit();
    text.textbox_rect_justification = TextPosition::from(reader.read_u8() as i32);
    text.text_offset_width = reader.read_kicad_unit();
}

fn read_justification(text: &mut Text, reader: &mut BinaryReader) {
    reader.skip(93);
    text.is_justification_valid = reader.read_u8() != 0;
}

impl Text {
    /// Read one text record. `wide_strings` is the board's `WideStrings6`
    /// table and takes precedence over the inline string.
    pub fn read(reader: &mut BinaryReader, wide_strings: &WideStringTable) -> Result<Self> {
        expect_tag(reader, RecordTag::Text, STREAM)?;

        // Sub-record 1: properties
        let length = reader.begin_subrecord();
        let mut text = Text {
            layer: AltiumLayer(reader.read_u8()),
            ..Default::default()
        };
        reader.skip(6);
        text.component = reader.read_u16();
        reader.skip(4);
        text.position = reader.read_position();
        text.height = reader.read_kicad_unit();
        text.stroke_font = StrokeFontType::from(reader.read_u16());
        text.rotation = reader.read_f64();
        text.is_mirrored = reader.read_u8() != 0;
        text.stroke_width = reader.read_kicad_unit();

        for &(min_length, extension) in EXTENSIONS {
            if length >= min_length {
                extension(&mut text, reader);
            }
        }
        reader.skip_subrecord();

        // Only TrueType text can be inverted
        if text.font_type != TextType::TrueType {
            text.is_inverted = false;
            text.is_inverted_rect = false;
        }

        // Sub-record 2: inline string, read only without a table entry
        reader.begin_subrecord();
        let raw = match text
            .widestring_index
            .and_then(|index| wide_strings.get(&index))
        {
            Some(wide) => wide.clone(),
            None => reader.read_legacy_string(),
        };
        reader.skip_subrecord();
        text.text = raw.replace("\r\n", "\n");

        check_parsed(reader, STREAM)?;
        Ok(text)
    }
}
