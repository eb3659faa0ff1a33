//! OLE2 Compound File Binary container.
//!
//! Every Altium document (`.PcbDoc`, `.SchDoc`, `.PcbLib`, `.SchLib`,
//! `.IntLib`) is a compound file: a small FAT file system whose directory
//! holds named storages (directories) and streams (files).
//!
//! The whole file is loaded into memory on open. Lookups hand out borrowed
//! [`CompoundFileEntry`] references valid for the lifetime of the container.

pub mod directory;
pub mod header;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use indexmap::IndexMap;
use log::{debug, trace};
use once_cell::sync::OnceCell;

use crate::error::{AltiumError, Result};
use crate::io::altium::BinaryReader;
use crate::io::compression::{decode_int_lib_payload, inflate_zlib};

pub use directory::{CompoundFileEntry, EntryKind, DIRECTORY_ENTRY_SIZE, NO_STREAM};
pub use header::{CfbHeader, DIFAT_SECTOR, END_OF_CHAIN, FAT_SECTOR, FREE_SECTOR, MAX_REGULAR_SECTOR};

/// Streams a schematic library part may carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolStreams<'a> {
    pub data: Option<&'a CompoundFileEntry>,
    pub pin_frac: Option<&'a CompoundFileEntry>,
    pub pin_wide_text: Option<&'a CompoundFileEntry>,
    pub pin_text_data: Option<&'a CompoundFileEntry>,
}

impl<'a> SymbolStreams<'a> {
    fn is_empty(&self) -> bool {
        self.data.is_none()
            && self.pin_frac.is_none()
            && self.pin_wide_text.is_none()
            && self.pin_text_data.is_none()
    }
}

/// An in-memory compound file.
pub struct CompoundFile {
    data: Vec<u8>,
    header: CfbHeader,
    fat: Vec<u32>,
    mini_fat: Vec<u32>,
    entries: Vec<CompoundFileEntry>,
    mini_stream: Vec<u8>,
    /// Unicode footprint name -> storage entry id.
    footprint_cache: OnceCell<IndexMap<String, u32>>,
}

impl std::fmt::Debug for CompoundFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompoundFile")
            .field("size", &self.data.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl CompoundFile {
    /// Open a compound file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        debug!("opening compound file {}", path.as_ref().display());
        Self::from_bytes(data)
    }

    /// Open a compound file held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let header = CfbHeader::parse(&data)?;

        let mut file = CompoundFile {
            data,
            header,
            fat: Vec::new(),
            mini_fat: Vec::new(),
            entries: Vec::new(),
            mini_stream: Vec::new(),
            footprint_cache: OnceCell::new(),
        };

        file.fat = file.load_fat()?;
        file.entries = file.load_directory()?;
        if file.entries.first().map(|e| e.kind) != Some(EntryKind::Root) {
            return Err(AltiumError::ContainerFormat("missing root entry".into()));
        }
        file.mini_fat = file.load_mini_fat()?;
        file.mini_stream = file.load_mini_stream()?;

        debug!(
            "compound file v{}: {} directory entries, {} FAT entries, {} byte mini stream",
            file.header.major_version,
            file.entries.len(),
            file.fat.len(),
            file.mini_stream.len()
        );
        Ok(file)
    }

    /// Parsed header.
    pub fn header(&self) -> &CfbHeader {
        &self.header
    }

    /// The root storage.
    pub fn root(&self) -> &CompoundFileEntry {
        &self.entries[0]
    }

    /// Look up an entry by its directory index.
    pub fn entry(&self, id: u32) -> Option<&CompoundFileEntry> {
        self.entries.get(id as usize)
    }

    // ---------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------

    /// Bytes of a regular sector. The last sector of a file may be short.
    fn sector(&self, id: u32) -> Result<&[u8]> {
        let size = self.header.sector_size();
        let start = (id as usize + 1)
            .checked_mul(size)
            .ok_or_else(|| AltiumError::ContainerFormat(format!("sector {} out of range", id)))?;
        if start >= self.data.len() {
            return Err(AltiumError::ContainerFormat(format!(
                "sector {} beyond end of file",
                id
            )));
        }
        let end = (start + size).min(self.data.len());
        Ok(&self.data[start..end])
    }

    fn mini_sector(&self, id: u32) -> Result<&[u8]> {
        let size = self.header.mini_sector_size();
        let start = id as usize * size;
        if start >= self.mini_stream.len() {
            return Err(AltiumError::ContainerFormat(format!(
                "mini sector {} beyond end of mini stream",
                id
            )));
        }
        let end = (start + size).min(self.mini_stream.len());
        Ok(&self.mini_stream[start..end])
    }

    /// Follow a sector chain through an allocation table.
    fn chain(table: &[u32], start: u32) -> Result<Vec<u32>> {
        let mut chain = Vec::new();
        let mut current = start;
        while current != END_OF_CHAIN {
            if current > MAX_REGULAR_SECTOR {
                return Err(AltiumError::ContainerFormat(format!(
                    "invalid sector {:#X} in chain starting at {}",
                    current, start
                )));
            }
            if chain.len() > table.len() {
                return Err(AltiumError::ContainerFormat(format!(
                    "sector chain starting at {} loops",
                    start
                )));
            }
            chain.push(current);
            current = *table.get(current as usize).ok_or_else(|| {
                AltiumError::ContainerFormat(format!("sector {} outside allocation table", current))
            })?;
        }
        Ok(chain)
    }

    fn read_u32_table(bytes: &[u8], out: &mut Vec<u32>) {
        out.extend(bytes.chunks_exact(4).map(LittleEndian::read_u32));
    }

    fn load_fat(&self) -> Result<Vec<u32>> {
        let per_sector = self.header.sector_size() / 4;
        let wanted = self.header.num_fat_sectors as usize;

        let mut fat_sectors: Vec<u32> = self
            .header
            .difat
            .iter()
            .copied()
            .filter(|&s| s <= MAX_REGULAR_SECTOR)
            .take(wanted)
            .collect();

        // DIFAT sectors: per_sector - 1 entries, last slot links the next one
        let mut next = self.header.first_difat_sector;
        let mut visited = HashSet::new();
        for _ in 0..self.header.num_difat_sectors {
            if next > MAX_REGULAR_SECTOR || fat_sectors.len() >= wanted {
                break;
            }
            if !visited.insert(next) {
                return Err(AltiumError::ContainerFormat("DIFAT chain loops".into()));
            }
            let mut difat = Vec::with_capacity(per_sector);
            Self::read_u32_table(self.sector(next)?, &mut difat);
            let link = difat.get(per_sector - 1).copied().unwrap_or(END_OF_CHAIN);
            fat_sectors.extend(
                difat
                    .iter()
                    .take(per_sector - 1)
                    .copied()
                    .filter(|&s| s <= MAX_REGULAR_SECTOR),
            );
            next = link;
        }
        fat_sectors.truncate(wanted);

        let mut fat = Vec::with_capacity(fat_sectors.len() * per_sector);
        for sector in fat_sectors {
            Self::read_u32_table(self.sector(sector)?, &mut fat);
        }
        Ok(fat)
    }

    fn load_directory(&self) -> Result<Vec<CompoundFileEntry>> {
        let chain = Self::chain(&self.fat, self.header.first_directory_sector)?;
        let mut raw = Vec::with_capacity(chain.len() * self.header.sector_size());
        for sector in chain {
            raw.extend_from_slice(self.sector(sector)?);
        }

        raw.chunks_exact(DIRECTORY_ENTRY_SIZE)
            .enumerate()
            .map(|(i, chunk)| CompoundFileEntry::parse(i as u32, chunk, self.header.major_version))
            .collect()
    }

    fn load_mini_fat(&self) -> Result<Vec<u32>> {
        if self.header.num_mini_fat_sectors == 0 || self.header.first_mini_fat_sector > MAX_REGULAR_SECTOR {
            return Ok(Vec::new());
        }
        let mut mini_fat = Vec::new();
        for sector in Self::chain(&self.fat, self.header.first_mini_fat_sector)? {
            Self::read_u32_table(self.sector(sector)?, &mut mini_fat);
        }
        Ok(mini_fat)
    }

    fn load_mini_stream(&self) -> Result<Vec<u8>> {
        let root = &self.entries[0];
        if root.size == 0 || root.start_sector > MAX_REGULAR_SECTOR {
            return Ok(Vec::new());
        }
        let size = self.checked_size(root)?;
        let mut stream = Vec::with_capacity(size);
        for sector in Self::chain(&self.fat, root.start_sector)? {
            stream.extend_from_slice(self.sector(sector)?);
        }
        stream.truncate(size);
        Ok(stream)
    }

    /// Entry size as a buffer length. No stream can be larger than the file.
    fn checked_size(&self, entry: &CompoundFileEntry) -> Result<usize> {
        usize::try_from(entry.size)
            .ok()
            .filter(|&size| size <= self.data.len())
            .ok_or_else(|| {
                AltiumError::ContainerFormat(format!(
                    "'{}' size {} exceeds the file size {}",
                    entry.name,
                    entry.size,
                    self.data.len()
                ))
            })
    }

    // ---------------------------------------------------------------
    // Directory tree
    // ---------------------------------------------------------------

    /// Direct children of a storage, in directory (sorted) order.
    pub fn children(&self, entry: &CompoundFileEntry) -> Vec<&CompoundFileEntry> {
        let mut out = Vec::new();
        if !entry.is_storage() {
            return out;
        }

        // In-order walk of the sibling tree
        let mut stack = Vec::new();
        let mut current = entry.child;
        let mut steps = 0usize;
        loop {
            while current != NO_STREAM && steps <= self.entries.len() {
                let Some(node) = self.entries.get(current as usize) else {
                    break;
                };
                steps += 1;
                stack.push(node);
                current = node.left_sibling;
            }
            match stack.pop() {
                Some(node) => {
                    if node.kind != EntryKind::Empty {
                        out.push(node);
                    }
                    current = node.right_sibling;
                }
                None => break,
            }
        }
        out
    }

    /// Find a direct child by name and kind.
    pub fn find_stream_single_level<'a>(
        &'a self,
        entry: &CompoundFileEntry,
        name: &str,
        is_stream: bool,
    ) -> Option<&'a CompoundFileEntry> {
        self.children(entry)
            .into_iter()
            .find(|child| child.is_stream() == is_stream && child.name == name)
    }

    /// Resolve a path of names from the root. Every segment except the last
    /// must be a storage, the last must be a stream.
    pub fn find_stream(&self, path: &[&str]) -> Option<&CompoundFileEntry> {
        self.find_stream_from(self.root(), path)
    }

    /// Resolve a path relative to a storage.
    pub fn find_stream_from<'a>(
        &'a self,
        start: &'a CompoundFileEntry,
        path: &[&str],
    ) -> Option<&'a CompoundFileEntry> {
        let (last, storages) = path.split_last()?;
        let mut current = start;
        for name in storages {
            current = self.find_stream_single_level(current, name, false)?;
        }
        self.find_stream_single_level(current, last, true)
    }

    /// List the streams of a top-level storage.
    pub fn enum_dir(&self, dir: &str) -> IndexMap<String, &CompoundFileEntry> {
        let mut out = IndexMap::new();
        if let Some(storage) = self.find_stream_single_level(self.root(), dir, false) {
            for child in self.children(storage) {
                if child.is_stream() {
                    out.insert(child.name.clone(), child);
                }
            }
        }
        out
    }

    /// Enumerate the parts of a schematic library. Each storage under
    /// `start` (the root by default) that holds at least one of the part
    /// streams yields one entry.
    pub fn lib_symbols<'a>(
        &'a self,
        start: Option<&'a CompoundFileEntry>,
    ) -> IndexMap<String, SymbolStreams<'a>> {
        let start = start.unwrap_or_else(|| self.root());
        let mut symbols = IndexMap::new();

        for storage in self.children(start) {
            if storage.is_stream() {
                continue;
            }
            let mut streams = SymbolStreams::default();
            for child in self.children(storage) {
                if !child.is_stream() {
                    continue;
                }
                match child.name.as_str() {
                    "Data" => streams.data = Some(child),
                    "PinFrac" => streams.pin_frac = Some(child),
                    "PinWideText" => streams.pin_wide_text = Some(child),
                    "PinTextData" => streams.pin_text_data = Some(child),
                    _ => {}
                }
            }
            if !streams.is_empty() {
                symbols.insert(storage.name.clone(), streams);
            }
        }
        symbols
    }

    // ---------------------------------------------------------------
    // Stream data
    // ---------------------------------------------------------------

    /// Copy `buffer.len()` bytes of a stream starting at `offset`.
    pub fn read_file(&self, entry: &CompoundFileEntry, offset: u64, buffer: &mut [u8]) -> Result<()> {
        if !entry.is_stream() {
            return Err(AltiumError::ContainerFormat(format!(
                "'{}' is not a stream",
                entry.name
            )));
        }
        let end = offset
            .checked_add(buffer.len() as u64)
            .ok_or(AltiumError::UnexpectedEof)?;
        if end > entry.size {
            return Err(AltiumError::UnexpectedEof);
        }
        if buffer.is_empty() {
            return Ok(());
        }

        let mini = entry.size < self.header.mini_stream_cutoff as u64;
        let (table, sector_size) = if mini {
            (&self.mini_fat, self.header.mini_sector_size())
        } else {
            (&self.fat, self.header.sector_size())
        };
        let chain = Self::chain(table, entry.start_sector)?;

        let mut copied = 0usize;
        let mut pos = offset as usize;
        while copied < buffer.len() {
            let sector = *chain.get(pos / sector_size).ok_or_else(|| {
                AltiumError::ContainerFormat(format!("stream '{}' chain shorter than its size", entry.name))
            })?;
            let bytes = if mini {
                self.mini_sector(sector)?
            } else {
                self.sector(sector)?
            };
            let within = pos % sector_size;
            let n = (sector_size - within).min(buffer.len() - copied);
            let src = bytes.get(within..within + n).ok_or(AltiumError::UnexpectedEof)?;
            buffer[copied..copied + n].copy_from_slice(src);
            copied += n;
            pos += n;
        }
        Ok(())
    }

    /// Read a whole stream.
    pub fn read_stream(&self, entry: &CompoundFileEntry) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.checked_size(entry)?];
        self.read_file(entry, 0, &mut buffer)?;
        Ok(buffer)
    }

    /// Open a whole stream as a [`BinaryReader`].
    pub fn reader(&self, entry: &CompoundFileEntry) -> Result<BinaryReader> {
        Ok(BinaryReader::new(self.read_stream(entry)?))
    }

    /// Decode an integrated library stream into the compound file it wraps.
    pub fn decode_int_lib_stream(&self, entry: &CompoundFileEntry) -> Result<CompoundFile> {
        let data = self.read_stream(entry)?;
        debug!("decoding integrated library stream '{}' ({} bytes)", entry.name, data.len());
        CompoundFile::from_bytes(decode_int_lib_payload(&data)?)
    }

    /// Inflate an embedded 3D model stream.
    pub fn inflate_model(data: &[u8]) -> Result<Vec<u8>> {
        inflate_zlib(data)
    }

    // ---------------------------------------------------------------
    // Footprint libraries
    // ---------------------------------------------------------------

    fn footprint_index(&self) -> Result<&IndexMap<String, u32>> {
        self.footprint_cache.get_or_try_init(|| {
            let mut index = IndexMap::new();
            for storage in self.children(self.root()) {
                if storage.is_stream() {
                    continue;
                }
                let Some(parameters) = self.find_stream_single_level(storage, "Parameters", true) else {
                    continue;
                };
                let mut reader = self.reader(parameters)?;
                let properties = reader.read_properties();
                let name = properties.read_unicode_string("PATTERN", "");
                trace!("footprint '{}' stored in '{}'", name, storage.name);
                index.insert(name, storage.id);
            }
            Ok(index)
        })
    }

    /// Map unicode footprint names to their storages. Storage names are
    /// limited to 31 characters, the real name lives in `Parameters`.
    pub fn list_lib_footprints(&self) -> Result<IndexMap<String, &CompoundFileEntry>> {
        Ok(self
            .footprint_index()?
            .iter()
            .filter_map(|(name, &id)| self.entry(id).map(|e| (name.clone(), e)))
            .collect())
    }

    /// Storage holding the footprint with the given unicode name.
    pub fn find_lib_footprint_dir(&self, name: &str) -> Result<Option<&CompoundFileEntry>> {
        Ok(self
            .footprint_index()?
            .get(name)
            .and_then(|&id| self.entry(id)))
    }
}
