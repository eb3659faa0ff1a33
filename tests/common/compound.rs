//! In-memory compound file writer.
//!
//! Produces version 3 files: 512-byte sectors, 64-byte mini sectors and a
//! 4096-byte mini stream cutoff. Entries are added by slash separated path;
//! intermediate storages are created on the way. Siblings are linked as a
//! right-leaning chain in insertion order, which the reader walks in order.

const SECTOR: usize = 512;
const MINI_SECTOR: usize = 64;
const MINI_CUTOFF: usize = 4096;
const ENTRY_SIZE: usize = 128;

const FREE_SECTOR: u32 = 0xFFFF_FFFF;
const END_OF_CHAIN: u32 = 0xFFFF_FFFE;
const FAT_SECTOR: u32 = 0xFFFF_FFFD;
const NO_STREAM: u32 = 0xFFFF_FFFF;

const SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, Clone)]
struct Node {
    name: String,
    /// 1 storage, 2 stream, 5 root
    kind: u8,
    data: Vec<u8>,
    children: Vec<usize>,
    start: u32,
}

#[derive(Debug, Clone)]
pub struct CompoundBuilder {
    nodes: Vec<Node>,
}

impl Default for CompoundBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompoundBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "Root Entry".into(),
                kind: 5,
                data: Vec::new(),
                children: Vec::new(),
                start: END_OF_CHAIN,
            }],
        }
    }

    fn child(&mut self, parent: usize, name: &str, kind: u8) -> usize {
        if let Some(&id) = self.nodes[parent]
            .children
            .iter()
            .find(|&&id| self.nodes[id].name == name && self.nodes[id].kind == kind)
        {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            name: name.into(),
            kind,
            data: Vec::new(),
            children: Vec::new(),
            start: END_OF_CHAIN,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Add an empty storage.
    pub fn storage(mut self, path: &str) -> Self {
        let mut current = 0;
        for name in path.split('/') {
            current = self.child(current, name, 1);
        }
        self
    }

    /// Add a stream, creating its storages.
    pub fn stream(mut self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        let mut parts: Vec<&str> = path.split('/').collect();
        let name = parts.pop().unwrap_or_default();
        let mut current = 0;
        for storage in parts {
            current = self.child(current, storage, 1);
        }
        let id = self.child(current, name, 2);
        self.nodes[id].data = data.into();
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        let mut sectors: Vec<[u8; SECTOR]> = Vec::new();
        let mut fat: Vec<u32> = Vec::new();

        // Regular streams and the mini stream payload
        let mut mini_stream: Vec<u8> = Vec::new();
        let mut mini_fat: Vec<u32> = Vec::new();
        for id in 1..self.nodes.len() {
            let node = &self.nodes[id];
            if node.kind != 2 || node.data.is_empty() {
                continue;
            }
            let data = node.data.clone();
            self.nodes[id].start = if data.len() < MINI_CUTOFF {
                append_chain(&mut mini_stream, &mut mini_fat, &data, MINI_SECTOR)
            } else {
                append_sectors(&mut sectors, &mut fat, &data)
            };
        }

        if !mini_stream.is_empty() {
            self.nodes[0].start = append_sectors(&mut sectors, &mut fat, &mini_stream);
            self.nodes[0].data = mini_stream;
        }

        let mut mini_fat_bytes = Vec::new();
        for entry in &mini_fat {
            mini_fat_bytes.extend_from_slice(&entry.to_le_bytes());
        }
        let (first_mini_fat, num_mini_fat) = if mini_fat_bytes.is_empty() {
            (END_OF_CHAIN, 0)
        } else {
            let count = mini_fat_bytes.len().div_ceil(SECTOR) as u32;
            mini_fat_bytes.resize(count as usize * SECTOR, 0xFF);
            (append_sectors(&mut sectors, &mut fat, &mini_fat_bytes), count)
        };

        let directory = self.directory();
        let first_directory = append_sectors(&mut sectors, &mut fat, &directory);

        // FAT sectors describe themselves too
        let per_sector = SECTOR / 4;
        let mut fat_count = 1;
        while (sectors.len() + fat_count) > fat_count * per_sector {
            fat_count += 1;
        }
        let first_fat = sectors.len() as u32;
        for _ in 0..fat_count {
            fat.push(FAT_SECTOR);
            sectors.push([0xFF; SECTOR]);
        }
        fat.resize(fat_count * per_sector, FREE_SECTOR);
        for (i, chunk) in fat.chunks(per_sector).enumerate() {
            let sector = &mut sectors[first_fat as usize + i];
            for (j, entry) in chunk.iter().enumerate() {
                sector[j * 4..j * 4 + 4].copy_from_slice(&entry.to_le_bytes());
            }
        }

        let mut out = header(
            fat_count as u32,
            first_fat,
            first_directory,
            first_mini_fat,
            num_mini_fat,
        );
        for sector in &sectors {
            out.extend_from_slice(sector);
        }
        out
    }

    fn directory(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (id, node) in self.nodes.iter().enumerate() {
            let right = self
                .sibling_after(id)
                .map_or(NO_STREAM, |sibling| sibling as u32);
            let child = node.children.first().map_or(NO_STREAM, |&c| c as u32);
            out.extend(entry(node, right, child));
        }
        while out.len() % SECTOR != 0 {
            out.extend(empty_entry());
        }
        out
    }

    fn sibling_after(&self, id: usize) -> Option<usize> {
        self.nodes.iter().find_map(|parent| {
            let pos = parent.children.iter().position(|&c| c == id)?;
            parent.children.get(pos + 1).copied()
        })
    }
}

/// Append `data` as a chain of regular sectors; returns the first sector.
fn append_sectors(sectors: &mut Vec<[u8; SECTOR]>, fat: &mut Vec<u32>, data: &[u8]) -> u32 {
    let first = sectors.len() as u32;
    let chunks: Vec<&[u8]> = data.chunks(SECTOR).collect();
    for (i, chunk) in chunks.iter().enumerate() {
        let mut sector = [0u8; SECTOR];
        sector[..chunk.len()].copy_from_slice(chunk);
        sectors.push(sector);
        fat.push(if i + 1 == chunks.len() {
            END_OF_CHAIN
        } else {
            first + i as u32 + 1
        });
    }
    first
}

/// Append `data` to the mini stream; returns the first mini sector.
fn append_chain(stream: &mut Vec<u8>, table: &mut Vec<u32>, data: &[u8], size: usize) -> u32 {
    let first = table.len() as u32;
    let count = data.len().div_ceil(size);
    for i in 0..count {
        table.push(if i + 1 == count {
            END_OF_CHAIN
        } else {
            first + i as u32 + 1
        });
    }
    stream.extend_from_slice(data);
    stream.resize((first as usize + count) * size, 0);
    first
}

fn entry(node: &Node, right: u32, child: u32) -> Vec<u8> {
    let mut raw = vec![0u8; ENTRY_SIZE];
    let units: Vec<u16> = node.name.encode_utf16().collect();
    for (i, unit) in units.iter().take(31).enumerate() {
        raw[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    let name_len = ((units.len().min(31) + 1) * 2) as u16;
    raw[64..66].copy_from_slice(&name_len.to_le_bytes());
    raw[66] = node.kind;
    raw[67] = 1;
    raw[68..72].copy_from_slice(&NO_STREAM.to_le_bytes());
    raw[72..76].copy_from_slice(&right.to_le_bytes());
    raw[76..80].copy_from_slice(&child.to_le_bytes());
    raw[116..120].copy_from_slice(&node.start.to_le_bytes());
    raw[120..128].copy_from_slice(&(node.data.len() as u64).to_le_bytes());
    raw
}

fn empty_entry() -> Vec<u8> {
    let mut raw = vec![0u8; ENTRY_SIZE];
    raw[68..80].fill(0xFF);
    raw[116..120].copy_from_slice(&END_OF_CHAIN.to_le_bytes());
    raw
}

fn header(
    num_fat: u32,
    first_fat: u32,
    first_directory: u32,
    first_mini_fat: u32,
    num_mini_fat: u32,
) -> Vec<u8> {
    let mut out = vec![0u8; SECTOR];
    out[..8].copy_from_slice(&SIGNATURE);
    out[0x18..0x1A].copy_from_slice(&0x3Eu16.to_le_bytes());
    out[0x1A..0x1C].copy_from_slice(&3u16.to_le_bytes());
    out[0x1C..0x1E].copy_from_slice(&0xFFFEu16.to_le_bytes());
    out[0x1E..0x20].copy_from_slice(&9u16.to_le_bytes());
    out[0x20..0x22].copy_from_slice(&6u16.to_le_bytes());
    out[0x2C..0x30].copy_from_slice(&num_fat.to_le_bytes());
    out[0x30..0x34].copy_from_slice(&first_directory.to_le_bytes());
    out[0x38..0x3C].copy_from_slice(&(MINI_CUTOFF as u32).to_le_bytes());
    out[0x3C..0x40].copy_from_slice(&first_mini_fat.to_le_bytes());
    out[0x40..0x44].copy_from_slice(&num_mini_fat.to_le_bytes());
    out[0x44..0x48].copy_from_slice(&END_OF_CHAIN.to_le_bytes());
    for i in 0..109 {
        let value = if (i as u32) < num_fat {
            first_fat + i as u32
        } else {
            FREE_SECTOR
        };
        out[0x4C + i * 4..0x50 + i * 4].copy_from_slice(&value.to_le_bytes());
    }
    out
}
