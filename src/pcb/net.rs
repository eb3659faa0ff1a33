//! Net names (`Nets6`). Other records refer to nets by their index here.

use super::{check_parsed, read_record_properties};
use crate::error::Result;
use crate::io::altium::BinaryReader;

const STREAM: &str = "Nets6";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Net {
    pub name: String,
}

impl Net {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let props = read_record_properties(reader, STREAM)?;
        check_parsed(reader, STREAM)?;
        Ok(Net {
            name: props.read_string("NAME", ""),
        })
    }
}
