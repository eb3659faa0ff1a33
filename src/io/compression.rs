//! Decompression of zlib payloads embedded in Altium files.
//!
//! Zlib shows up in three places: integrated-library envelopes, embedded 3D
//! models and the compressed strings of schematic library pin streams.

use std::io::Read;

use flate2::read::ZlibDecoder;
use log::trace;

use crate::error::{AltiumError, Result};

/// Trait for decompressing data.
pub trait Decompressor {
    /// Decompress a complete source buffer.
    fn decompress(&self, source: &[u8]) -> Result<Vec<u8>>;
}

/// Zlib (RFC 1950) decompressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibDecompressor;

impl Decompressor for ZlibDecompressor {
    fn decompress(&self, source: &[u8]) -> Result<Vec<u8>> {
        trace!("zlib: decompressing {} bytes", source.len());
        let mut decoder = ZlibDecoder::new(source);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|e| AltiumError::Decompression(format!("zlib: {}", e)))?;
        trace!("zlib: decompressed {} -> {} bytes", source.len(), out.len());
        Ok(out)
    }
}

/// Inflate a zlib buffer.
pub fn inflate_zlib(source: &[u8]) -> Result<Vec<u8>> {
    ZlibDecompressor.decompress(source)
}

/// Envelope around a compound file embedded in an integrated library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntLibEnvelope {
    /// Tag `0x00`: payload is stored verbatim.
    Raw,
    /// Tag `0x02`: payload is zlib-compressed.
    Zlib,
}

impl IntLibEnvelope {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(IntLibEnvelope::Raw),
            0x02 => Some(IntLibEnvelope::Zlib),
            _ => None,
        }
    }
}

/// Strip the 1-byte envelope tag from an integrated library stream and
/// return the inner compound file bytes.
pub fn decode_int_lib_payload(data: &[u8]) -> Result<Vec<u8>> {
    let (&tag, payload) = data
        .split_first()
        .ok_or_else(|| AltiumError::InvalidFormat("empty integrated library stream".into()))?;

    match IntLibEnvelope::from_tag(tag) {
        Some(IntLibEnvelope::Raw) => Ok(payload.to_vec()),
        Some(IntLibEnvelope::Zlib) => inflate_zlib(payload),
        None => Err(AltiumError::InvalidFormat(format!(
            "Altium IntLib unknown header: {:02x}",
            tag
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_inflate() {
        let packed = zlib(b"STEP model body");
        assert_eq!(inflate_zlib(&packed).unwrap(), b"STEP model body");
    }

    #[test]
    fn test_inflate_garbage() {
        assert!(matches!(
            inflate_zlib(&[0x01, 0x02, 0x03]),
            Err(AltiumError::Decompression(_))
        ));
    }

    #[test]
    fn test_int_lib_raw() {
        let payload = decode_int_lib_payload(&[0x00, 0xD0, 0xCF, 0x11]).unwrap();
        assert_eq!(payload, vec![0xD0, 0xCF, 0x11]);
    }

    #[test]
    fn test_int_lib_zlib() {
        let mut data = vec![0x02];
        data.extend(zlib(b"inner container"));
        assert_eq!(decode_int_lib_payload(&data).unwrap(), b"inner container");
    }

    #[test]
    fn test_int_lib_unknown_tag() {
        let err = decode_int_lib_payload(&[0x05, 0x00]).unwrap_err();
        assert!(matches!(err, AltiumError::InvalidFormat(_)));
        assert!(err.to_string().contains("05"));
    }

    #[test]
    fn test_int_lib_empty() {
        assert!(decode_int_lib_payload(&[]).is_err());
    }
}
