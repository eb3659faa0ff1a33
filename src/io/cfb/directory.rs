//! Compound file directory entries.
//!
//! The directory is an array of 128-byte entries. Each storage points at one
//! child; siblings hang off each other as a red-black tree through the
//! left/right fields.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::Result;

/// Size of one directory entry on disk.
pub const DIRECTORY_ENTRY_SIZE: usize = 128;

/// Marks an absent sibling/child link.
pub const NO_STREAM: u32 = 0xFFFF_FFFF;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Unused slot.
    Empty,
    /// A directory ("storage") holding further entries.
    Storage,
    /// A named byte stream.
    Stream,
    /// The root storage (entry 0).
    Root,
}

impl EntryKind {
    fn from_byte(value: u8) -> Self {
        match value {
            1 => EntryKind::Storage,
            2 => EntryKind::Stream,
            5 => EntryKind::Root,
            _ => EntryKind::Empty,
        }
    }
}

/// A node of the compound file directory tree.
#[derive(Debug, Clone)]
pub struct CompoundFileEntry {
    /// Index of the entry inside the directory array.
    pub id: u32,
    /// Entry name (at most 31 UTF-16 code units).
    pub name: String,
    pub kind: EntryKind,
    /// Stream size in bytes. For the root this is the mini stream size.
    pub size: u64,
    pub(crate) left_sibling: u32,
    pub(crate) right_sibling: u32,
    pub(crate) child: u32,
    pub(crate) start_sector: u32,
}

impl CompoundFileEntry {
    /// Parse one 128-byte directory entry.
    pub fn parse(id: u32, raw: &[u8], major_version: u16) -> Result<Self> {
        let mut cursor = Cursor::new(raw);

        let mut name_buf = [0u8; 64];
        cursor.read_exact(&mut name_buf)?;
        let name_len = cursor.read_u16::<LittleEndian>()? as usize;
        let kind = EntryKind::from_byte(cursor.read_u8()?);
        let _color = cursor.read_u8()?;
        let left_sibling = cursor.read_u32::<LittleEndian>()?;
        let right_sibling = cursor.read_u32::<LittleEndian>()?;
        let child = cursor.read_u32::<LittleEndian>()?;

        // CLSID, state bits, creation and modification time
        let mut skipped = [0u8; 16 + 4 + 8 + 8];
        cursor.read_exact(&mut skipped)?;

        let start_sector = cursor.read_u32::<LittleEndian>()?;
        let mut size = cursor.read_u64::<LittleEndian>()?;
        if major_version == 3 {
            // Version 3 writers may leave garbage in the high dword
            size &= 0xFFFF_FFFF;
        }

        // name_len counts bytes including the terminating NUL
        let name_bytes = name_len.saturating_sub(2).min(name_buf.len() - 2);
        let (name, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(&name_buf[..name_bytes]);

        Ok(Self {
            id,
            name: name.into_owned(),
            kind,
            size,
            left_sibling,
            right_sibling,
            child,
            start_sector,
        })
    }

    /// Whether this entry is a stream.
    pub fn is_stream(&self) -> bool {
        self.kind == EntryKind::Stream
    }

    /// Whether this entry can hold children (storage or root).
    pub fn is_storage(&self) -> bool {
        matches!(self.kind, EntryKind::Storage | EntryKind::Root)
    }
}
