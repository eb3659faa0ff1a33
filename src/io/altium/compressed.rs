//! Compressed strings of schematic library pin streams.
//!
//! Each entry is a `0xD0` marker, a Pascal string holding a decimal id and
//! an `i32`-length zlib payload.

use super::BinaryReader;
use crate::error::{AltiumError, Result};
use crate::io::compression::inflate_zlib;

/// Marker byte of a compressed string.
pub const COMPRESSED_STRING_MARKER: u8 = 0xD0;

/// Read one compressed string, returning its id and inflated bytes.
pub fn read_compressed_string(reader: &mut BinaryReader) -> Result<(i32, Vec<u8>)> {
    let marker = reader.read_u8();
    if marker != COMPRESSED_STRING_MARKER {
        return Err(AltiumError::InvalidFormat(format!(
            "invalid compressed string marker {:#04X}",
            marker
        )));
    }

    let id_text = reader.read_legacy_string();
    let id = id_text.trim().parse::<i32>().map_err(|_| {
        AltiumError::InvalidFormat(format!("invalid compressed string id '{}'", id_text))
    })?;

    let length = reader.read_i32();
    if length < 0 {
        return Err(AltiumError::InvalidFormat(format!(
            "negative compressed string length {}",
            length
        )));
    }
    let payload = reader.read_bytes(length as usize);
    if reader.has_error() {
        return Err(AltiumError::UnexpectedEof);
    }

    Ok((id, inflate_zlib(&payload)?))
}
