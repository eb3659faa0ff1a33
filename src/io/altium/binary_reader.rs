//! Bounds-checked little-endian reader over one stream.
//!
//! Reads never fail. Reading past the end consumes what is left, returns a
//! zero value and sets a sticky error flag. Record decoders read every field
//! and then check [`BinaryReader::has_error`] once.
//!
//! Records are framed by sub-records: a `u32` byte length followed by the
//! payload. Newer Altium versions append fields to sub-records, so decoders
//! always finish a sub-record with [`BinaryReader::skip_subrecord`].

use std::collections::HashMap;

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use super::properties::PropertyMap;
use super::text::{decode_latin1, decode_utf16le};
use crate::types::{convert_to_kicad_unit, Vector2I};

/// Index -> text table of a `WideStrings6` stream.
pub type WideStringTable = HashMap<u32, String>;

/// A fixed-size little-endian value.
pub trait LePrimitive: Copy + Default {
    const SIZE: usize;
    fn from_le_slice(bytes: &[u8]) -> Self;
}

impl LePrimitive for u8 {
    const SIZE: usize = 1;
    fn from_le_slice(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl LePrimitive for i8 {
    const SIZE: usize = 1;
    fn from_le_slice(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

macro_rules! impl_le_primitive {
    ($($ty:ty => $read:ident),* $(,)?) => {
        $(
            impl LePrimitive for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();
                fn from_le_slice(bytes: &[u8]) -> Self {
                    LittleEndian::$read(bytes)
                }
            }
        )*
    };
}

impl_le_primitive! {
    u16 => read_u16,
    i16 => read_i16,
    u32 => read_u32,
    i32 => read_i32,
    u64 => read_u64,
    i64 => read_i64,
    f32 => read_f32,
    f64 => read_f64,
}

/// Sequential reader over a stream's bytes.
#[derive(Debug, Clone)]
pub struct BinaryReader {
    data: Vec<u8>,
    pos: usize,
    subrecord_end: Option<usize>,
    error: bool,
}

impl BinaryReader {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            subrecord_end: None,
            error: false,
        }
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the buffer.
    pub fn remaining_bytes(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Sticky error flag.
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Move to `position` and clear the error flag. Only record-level
    /// recovery uses this; returns `false` if `position` is out of range.
    pub(crate) fn recover_at(&mut self, position: usize) -> bool {
        self.subrecord_end = None;
        if position > self.data.len() {
            self.pos = self.data.len();
            self.error = true;
            false
        } else {
            self.pos = position;
            self.error = false;
            true
        }
    }

    /// Consume `n` bytes, or everything left with the error flag set.
    fn take(&mut self, n: usize) -> Option<&[u8]> {
        if n <= self.remaining_bytes() {
            let start = self.pos;
            self.pos += n;
            Some(&self.data[start..start + n])
        } else {
            self.pos = self.data.len();
            self.error = true;
            None
        }
    }

    // ---------------------------------------------------------------
    // Primitives
    // ---------------------------------------------------------------

    /// Read a little-endian value; zero on over-read.
    pub fn read<T: LePrimitive>(&mut self) -> T {
        self.take(T::SIZE).map(T::from_le_slice).unwrap_or_default()
    }

    /// Read a value without moving the cursor or touching the error flag.
    pub fn peek<T: LePrimitive>(&mut self) -> T {
        let pos = self.pos;
        let error = self.error;
        let value = self.read::<T>();
        self.pos = pos;
        self.error = error;
        value
    }

    pub fn read_u8(&mut self) -> u8 {
        self.read()
    }

    pub fn read_u16(&mut self) -> u16 {
        self.read()
    }

    pub fn read_u32(&mut self) -> u32 {
        self.read()
    }

    pub fn read_i16(&mut self) -> i16 {
        self.read()
    }

    pub fn read_i32(&mut self) -> i32 {
        self.read()
    }

    pub fn read_f64(&mut self) -> f64 {
        self.read()
    }

    pub fn skip(&mut self, n: usize) {
        self.take(n);
    }

    /// Read `n` raw bytes. Short reads return what was left.
    pub fn read_bytes(&mut self, n: usize) -> Vec<u8> {
        let available = n.min(self.remaining_bytes());
        let bytes = self.data[self.pos..self.pos + available].to_vec();
        self.take(n);
        bytes
    }

    /// Fill `buffer` from the stream. On over-read the buffer is zeroed.
    pub fn read_exact(&mut self, buffer: &mut [u8]) {
        match self.take(buffer.len()) {
            Some(bytes) => buffer.copy_from_slice(bytes),
            None => buffer.fill(0),
        }
    }

    // ---------------------------------------------------------------
    // Strings
    // ---------------------------------------------------------------

    /// A 1-byte length followed by that many bytes.
    pub fn read_pascal_bytes(&mut self) -> Vec<u8> {
        let len = self.read_u8() as usize;
        self.take(len).map(<[u8]>::to_vec).unwrap_or_default()
    }

    /// A Pascal string in Latin-1.
    pub fn read_legacy_string(&mut self) -> String {
        decode_latin1(&self.read_pascal_bytes())
    }

    /// A fixed-size UTF-16LE field, cut at the first NUL code unit.
    pub fn read_utf16_fixed(&mut self, size: usize) -> String {
        let mut raw = vec![0u8; size];
        self.read_exact(&mut raw);
        let units = raw
            .chunks_exact(2)
            .position(|unit| unit[0] == 0 && unit[1] == 0)
            .unwrap_or(size / 2);
        decode_utf16le(&raw[..units * 2])
    }

    /// Decode a `WideStrings6` table: `(index u32, byte length u32, UTF-16LE
    /// text)` triples until fewer than 8 bytes remain. The byte length
    /// includes a NUL terminator; a length below 2 carries no text bytes.
    pub fn read_wide_string_table(&mut self) -> WideStringTable {
        let mut table = WideStringTable::new();
        while self.remaining_bytes() >= 8 {
            let index = self.read_u32();
            let length = self.read_u32() as usize;
            if length < 2 {
                table.insert(index, String::new());
                continue;
            }
            if length > self.remaining_bytes() {
                trace!("wide string {} overruns stream, stopping", index);
                break;
            }
            let start = self.pos;
            let text = decode_utf16le(&self.data[start..start + length - 2]);
            self.pos += length;
            table.insert(index, text);
        }
        table
    }

    // ---------------------------------------------------------------
    // Sub-records
    // ---------------------------------------------------------------

    /// Read a sub-record length and remember where it ends.
    pub fn begin_subrecord(&mut self) -> usize {
        let length = self.read_u32() as usize;
        self.subrecord_end = Some(self.pos + length);
        length
    }

    /// Bytes left in the current sub-record.
    pub fn remaining_subrecord_bytes(&self) -> usize {
        self.subrecord_end
            .map_or(0, |end| end.saturating_sub(self.pos))
    }

    /// Jump to the end of the current sub-record.
    pub fn skip_subrecord(&mut self) {
        match self.subrecord_end {
            Some(end) if end >= self.pos => {
                if end > self.data.len() {
                    self.pos = self.data.len();
                    self.error = true;
                } else {
                    self.pos = end;
                }
            }
            _ => self.error = true,
        }
    }

    // ---------------------------------------------------------------
    // Units
    // ---------------------------------------------------------------

    /// An `i32` Altium length converted to nanometres.
    pub fn read_kicad_unit(&mut self) -> i32 {
        convert_to_kicad_unit(self.read_i32() as f64)
    }

    pub fn read_kicad_unit_x(&mut self) -> i32 {
        self.read_kicad_unit()
    }

    /// Y axis points the other way.
    pub fn read_kicad_unit_y(&mut self) -> i32 {
        -self.read_kicad_unit()
    }

    /// An X/Y coordinate pair.
    pub fn read_position(&mut self) -> Vector2I {
        let x = self.read_kicad_unit_x();
        let y = self.read_kicad_unit_y();
        Vector2I::new(x, y)
    }

    /// A width/height pair (not negated).
    pub fn read_size(&mut self) -> Vector2I {
        let x = self.read_kicad_unit();
        let y = self.read_kicad_unit();
        Vector2I::new(x, y)
    }

    // ---------------------------------------------------------------
    // Property lists
    // ---------------------------------------------------------------

    /// Read a property list; binary payloads yield an empty map.
    pub fn read_properties(&mut self) -> PropertyMap {
        self.read_properties_with(|_| PropertyMap::new())
    }

    /// Read a property list. The `u32` length prefix carries a binary flag
    /// in its top byte; binary payloads go to `handle_binary`.
    pub fn read_properties_with<F>(&mut self, handle_binary: F) -> PropertyMap
    where
        F: FnOnce(&[u8]) -> PropertyMap,
    {
        let raw_length = self.read_u32();
        let is_binary = raw_length & 0xFF00_0000 != 0;
        let length = (raw_length & 0x00FF_FFFF) as usize;

        if length > self.remaining_bytes() {
            self.error = true;
            return PropertyMap::new();
        }
        if length == 0 {
            return PropertyMap::new();
        }

        let start = self.pos;
        self.pos += length;

        if is_binary {
            return handle_binary(&self.data[start..start + length]);
        }

        // Some Board6 streams lose the trailing NUL
        let has_nul = self.data[start + length - 1] == 0;
        if !has_nul {
            trace!("Missing null byte at end of property list. Imported data might be malformed or missing.");
        }
        PropertyMap::parse(&self.data[start..start + length - usize::from(has_nul)])
    }
}
