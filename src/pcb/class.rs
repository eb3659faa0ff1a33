//! Net, pad, layer and other classes (`Classes6`).

use super::enums::ClassKind;
use super::{check_parsed, read_record_properties};
use crate::error::Result;
use crate::io::altium::BinaryReader;

const STREAM: &str = "Classes6";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Class {
    pub name: String,
    pub unique_id: String,
    pub kind: ClassKind,
    /// Members `M0`, `M1`, ... by name.
    pub members: Vec<String>,
}

impl Class {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let props = read_record_properties(reader, STREAM)?;

        let mut members = Vec::new();
        for i in 0.. {
            match props.get(&format!("M{}", i)) {
                Some(member) => members.push(member.to_string()),
                None => break,
            }
        }

        check_parsed(reader, STREAM)?;
        Ok(Class {
            name: props.read_string("NAME", ""),
            unique_id: props.read_string("UNIQUEID", ""),
            kind: ClassKind::from(props.read_int("KIND", -1)),
            members,
        })
    }
}
