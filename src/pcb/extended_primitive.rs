//! Per-primitive overrides (`ExtendedPrimitiveInformation`).

use super::enums::ExpansionMode;
use super::{check_parsed, read_record_properties};
use crate::error::Result;
use crate::io::altium::{BinaryReader, PropertyMap};

const STREAM: &str = "ExtendedPrimitiveInformation";

/// Kind of primitive an entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveObjectId {
    #[default]
    Unknown,
    Pad,
    Via,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtendedInformationType {
    #[default]
    Unknown,
    Mask,
}

/// Mask expansion settings for one pad or via, which newer files keep out
/// of the binary record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtendedPrimitiveInformation {
    /// Index into `Pads6` or `Vias6`.
    pub primitive_index: i32,
    pub primitive_object_id: PrimitiveObjectId,
    pub info_type: ExtendedInformationType,
    pub pastemask_expansion_mode: ExpansionMode,
    pub pastemask_expansion_manual: i32,
    pub soldermask_expansion_mode: ExpansionMode,
    pub soldermask_expansion_manual: i32,
}

fn expansion_mode(props: &PropertyMap, key: &str) -> ExpansionMode {
    props
        .get(key)
        .map_or(ExpansionMode::Unknown, ExpansionMode::from_name)
}

impl ExtendedPrimitiveInformation {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let props = read_record_properties(reader, STREAM)?;
        check_parsed(reader, STREAM)?;

        let mut info = ExtendedPrimitiveInformation {
            primitive_index: props.read_int("PRIMITIVEINDEX", -1),
            primitive_object_id: match props.read_string("PRIMITIVEOBJECTID", "").as_str() {
                "Pad" => PrimitiveObjectId::Pad,
                "Via" => PrimitiveObjectId::Via,
                _ => PrimitiveObjectId::Unknown,
            },
            ..Default::default()
        };

        if props.read_string("TYPE", "") == "Mask" {
            info.info_type = ExtendedInformationType::Mask;
            info.pastemask_expansion_mode = expansion_mode(&props, "PASTEMASKEXPANSIONMODE");
            info.pastemask_expansion_manual =
                props.read_kicad_unit("PASTEMASKEXPANSION_MANUAL", "0mil");
            info.soldermask_expansion_mode = expansion_mode(&props, "SOLDERMASKEXPANSIONMODE");
            info.soldermask_expansion_manual =
                props.read_kicad_unit("SOLDERMASKEXPANSION_MANUAL", "0mil");
        }

        Ok(info)
    }
}
