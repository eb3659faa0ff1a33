//! Text decoding helpers.

/// Decode legacy 8-bit text as ISO-8859-1, one code point per byte.
pub fn decode_latin1(bytes: &[u8]) -> String {
    encoding_rs::mem::decode_latin1(bytes).into_owned()
}

/// Decode UTF-16LE text.
pub fn decode_utf16le(bytes: &[u8]) -> String {
    let (decoded, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(bytes);
    decoded.into_owned()
}

/// Bytes up to (not including) the first NUL.
pub fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}
