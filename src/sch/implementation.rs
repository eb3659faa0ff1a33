//! Model links of a symbol: footprints, simulation and signal integrity
//! models.

use super::enums::RecordId;
use super::{expect_record, read_owner_index};
use crate::error::Result;
use crate::io::altium::PropertyMap;

/// Container of the implementations of one symbol (`RECORD=44`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImplementationList {
    pub owner_index: i32,
}

impl ImplementationList {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::ImplementationList)?;
        Ok(ImplementationList {
            owner_index: read_owner_index(props),
        })
    }
}

/// A single model link (`RECORD=45`). Its owner is the implementation list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Implementation {
    pub owner_index: i32,
    pub name: String,
    /// `PCBLIB` for footprints, `SIM`, `SI`, ...
    pub kind: String,
    /// Library holding the model.
    pub lib_name: String,
    pub description: String,
    pub is_current: bool,
}

impl Implementation {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Implementation)?;
        Ok(Implementation {
            owner_index: read_owner_index(props),
            name: props.read_string("MODELNAME", ""),
            kind: props.read_string("MODELTYPE", ""),
            lib_name: props.read_string("MODELDATAFILE0", ""),
            description: props.read_string("DESCRIPTION", ""),
            is_current: props.read_bool("ISCURRENT", false),
        })
    }

    pub fn is_footprint(&self) -> bool {
        self.kind == "PCBLIB"
    }
}
