//! `|KEY=VALUE|KEY=VALUE` property lists.
//!
//! Most Altium records that are not fixed binary layouts are stored as a
//! length-prefixed text blob of pipe-separated fields. Keys are matched
//! case-insensitively (they are upper-cased on read); values are Latin-1
//! unless the key carries a `%UTF8%` prefix.

use indexmap::IndexMap;
use log::trace;

use super::text::{decode_latin1, until_nul};
use crate::types::convert_to_kicad_unit;

/// Key prefix marking a UTF-8 encoded value.
pub const UTF8_PREFIX: &str = "%UTF8%";

/// Key prefix of comma-separated UTF-16 code unit lists.
pub const UNICODE_PREFIX: &str = "UNICODE__";

/// Decoded property list. Keys keep their file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: IndexMap<String, String, ahash::RandomState>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize a raw property blob (without length prefix and trailing NUL).
    pub fn parse(raw: &[u8]) -> Self {
        let mut props = PropertyMap::new();
        let is_binary_storage = raw.starts_with(b"|BINARY");

        let find = |byte: u8, from: usize| -> Option<usize> {
            raw.get(from..)?
                .iter()
                .position(|&b| b == byte)
                .map(|i| i + from)
        };

        let mut token_end = 0usize;
        while token_end < raw.len() {
            let pipe = find(b'|', token_end);
            let equal = find(b'=', token_end);

            // A leading `|` is optional on the first field
            let key_start = match (pipe, equal) {
                (None, None) => break,
                (Some(p), Some(e)) if p <= e => p + 1,
                (Some(p), None) => p + 1,
                _ => token_end,
            };

            let next_pipe = find(b'|', key_start);
            let field_end = next_pipe.unwrap_or(raw.len());

            match equal {
                Some(e) if e < field_end => {
                    let key = decode_latin1(until_nul(&raw[key_start..e]));
                    let value = &raw[e + 1..field_end];
                    props.insert_raw(&key, value, is_binary_storage);
                }
                // `=` at or after the terminating `|`: malformed, skipped
                _ => {}
            }

            match next_pipe {
                Some(p) => token_end = p,
                None => break,
            }
        }

        props
    }

    fn insert_raw(&mut self, key: &str, raw_value: &[u8], is_binary_storage: bool) {
        let canonical = key.trim().to_uppercase();
        let raw_value = until_nul(raw_value);

        let mut value = if canonical.starts_with(UTF8_PREFIX) {
            String::from_utf8_lossy(raw_value).into_owned()
        } else {
            decode_latin1(raw_value)
        };

        // ÿ shows up as a placeholder in most strings
        if canonical != "PATTERN" && canonical != "SOURCEFOOTPRINTLIBRARY" {
            value = value.replace('ÿ', " ");
        }

        if !is_binary_storage
            && matches!(canonical.as_str(), "DESIGNATOR" | "NAME" | "TEXT")
            && self.get("RECORD") != Some("4")
        {
            value = altium_property_to_kicad_string(value.trim_end());
        }

        let value = value.trim_end().to_string();
        self.entries.insert(canonical, value);
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ---------------------------------------------------------------
    // Typed readers
    // ---------------------------------------------------------------

    /// Integer value, `atoi` style: leading digits only, 0 if none.
    pub fn read_int(&self, key: &str, default: i32) -> i32 {
        self.get(key).map_or(default, parse_leading_int)
    }

    /// Floating point value, parsed independent of locale.
    pub fn read_double(&self, key: &str, default: f64) -> f64 {
        self.get(key).map_or(default, parse_leading_double)
    }

    /// `T` or `TRUE` are true, anything else is false.
    pub fn read_bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .map_or(default, |value| value == "T" || value == "TRUE")
    }

    /// String value, preferring the `%UTF8%` variant of the key.
    pub fn read_string(&self, key: &str, default: &str) -> String {
        self.get(&format!("{}{}", UTF8_PREFIX, key))
            .or_else(|| self.get(key))
            .unwrap_or(default)
            .to_string()
    }

    /// String value, preferring the `UNICODE__` code unit list when the
    /// record declares `UNICODE=EXISTS`.
    pub fn read_unicode_string(&self, key: &str, default: &str) -> String {
        if self.get("UNICODE").is_some_and(|flag| flag.contains("EXISTS")) {
            if let Some(units) = self.get(&format!("{}{}", UNICODE_PREFIX, key)) {
                let units = units.split(',').map(|part| parse_leading_int(part) as u16);
                return char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect();
            }
        }
        self.read_string(key, default)
    }

    /// Length written as `<number>mil`, converted to nanometres.
    pub fn read_kicad_unit(&self, key: &str, default: &str) -> i32 {
        let value = self.read_string(key, default);
        let Some(prefix) = value.strip_suffix("mil") else {
            trace!("Unit '{}' does not end with 'mil'.", value);
            return 0;
        };
        let prefix = prefix.strip_prefix('+').unwrap_or(prefix);
        match prefix.parse::<f64>() {
            Ok(mils) => convert_to_kicad_unit(mils * 10_000.0),
            Err(_) => {
                trace!("Cannot convert '{}' to double.", prefix);
                0
            }
        }
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Convert Altium overbar markup to `~{...}` markup. In Altium a character
/// followed by `\` is drawn with a bar over it.
pub fn altium_property_to_kicad_string(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_overbar = false;

    let mut i = 0;
    while i < chars.len() {
        if chars.get(i + 1) == Some(&'\\') {
            if !in_overbar {
                out.push_str("~{");
                in_overbar = true;
            }
            out.push(chars[i]);
            i += 2;
        } else {
            if in_overbar {
                out.push('}');
                in_overbar = false;
            }
            out.push(chars[i]);
            i += 1;
        }
    }
    if in_overbar {
        out.push('}');
    }
    out
}

/// `atoi`: optional whitespace and sign, then digits. Saturates on overflow.
pub(crate) fn parse_leading_int(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Longest numeric prefix as `f64`, 0 if there is none.
pub(crate) fn parse_leading_double(text: &str) -> f64 {
    let text = text.trim_start();
    let candidate_len = text
        .bytes()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        .count();
    (1..=candidate_len)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
        .unwrap_or(0.0)
}
