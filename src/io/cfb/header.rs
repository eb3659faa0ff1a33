//! Compound File Binary header.
//!
//! The first 512 bytes of every OLE2 structured-storage file. Sector numbers
//! stored anywhere in the file are relative to the end of this header: sector
//! `n` starts at byte `(n + 1) << sector_shift`.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{AltiumError, Result};

/// Magic bytes every compound file starts with.
pub const SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Size of the fixed header structure.
pub const HEADER_SIZE: usize = 512;

/// Number of DIFAT entries stored inside the header itself.
pub const HEADER_DIFAT_ENTRIES: usize = 109;

/// Unallocated sector.
pub const FREE_SECTOR: u32 = 0xFFFF_FFFF;
/// Terminates a sector chain.
pub const END_OF_CHAIN: u32 = 0xFFFF_FFFE;
/// Sector holds part of the FAT.
pub const FAT_SECTOR: u32 = 0xFFFF_FFFD;
/// Sector holds part of the DIFAT.
pub const DIFAT_SECTOR: u32 = 0xFFFF_FFFC;
/// Largest regular sector number.
pub const MAX_REGULAR_SECTOR: u32 = 0xFFFF_FFFA;

/// Byte order mark stored at offset 0x1C.
const BYTE_ORDER_MARK: u16 = 0xFFFE;

/// Decoded compound file header.
#[derive(Debug, Clone)]
pub struct CfbHeader {
    pub minor_version: u16,
    /// 3 (512-byte sectors) or 4 (4096-byte sectors).
    pub major_version: u16,
    pub sector_shift: u16,
    pub mini_sector_shift: u16,
    pub num_directory_sectors: u32,
    pub num_fat_sectors: u32,
    pub first_directory_sector: u32,
    /// Streams strictly smaller than this live in the mini stream.
    pub mini_stream_cutoff: u32,
    pub first_mini_fat_sector: u32,
    pub num_mini_fat_sectors: u32,
    pub first_difat_sector: u32,
    pub num_difat_sectors: u32,
    /// The first 109 FAT sector locations.
    pub difat: Vec<u32>,
}

impl CfbHeader {
    /// Parse the header from the start of a file buffer.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(AltiumError::ContainerFormat(format!(
                "truncated header: {} bytes, expected at least {}",
                data.len(),
                HEADER_SIZE
            )));
        }
        if data[..SIGNATURE.len()] != SIGNATURE {
            return Err(AltiumError::ContainerFormat("invalid signature".into()));
        }

        let mut cursor = Cursor::new(&data[SIGNATURE.len()..HEADER_SIZE]);

        // 0x08: CLSID, always zero
        let mut clsid = [0u8; 16];
        cursor.read_exact(&mut clsid)?;

        let minor_version = cursor.read_u16::<LittleEndian>()?;
        let major_version = cursor.read_u16::<LittleEndian>()?;
        let byte_order = cursor.read_u16::<LittleEndian>()?;
        if byte_order != BYTE_ORDER_MARK {
            return Err(AltiumError::ContainerFormat(format!(
                "invalid byte order mark {:#06X}",
                byte_order
            )));
        }

        let sector_shift = cursor.read_u16::<LittleEndian>()?;
        let mini_sector_shift = cursor.read_u16::<LittleEndian>()?;
        if !(7..=16).contains(&sector_shift) || mini_sector_shift >= sector_shift {
            return Err(AltiumError::ContainerFormat(format!(
                "unsupported sector shift {} / mini sector shift {}",
                sector_shift, mini_sector_shift
            )));
        }

        // 0x22: reserved
        let mut reserved = [0u8; 6];
        cursor.read_exact(&mut reserved)?;

        let num_directory_sectors = cursor.read_u32::<LittleEndian>()?;
        let num_fat_sectors = cursor.read_u32::<LittleEndian>()?;
        let first_directory_sector = cursor.read_u32::<LittleEndian>()?;
        let _transaction_signature = cursor.read_u32::<LittleEndian>()?;
        let mini_stream_cutoff = cursor.read_u32::<LittleEndian>()?;
        let first_mini_fat_sector = cursor.read_u32::<LittleEndian>()?;
        let num_mini_fat_sectors = cursor.read_u32::<LittleEndian>()?;
        let first_difat_sector = cursor.read_u32::<LittleEndian>()?;
        let num_difat_sectors = cursor.read_u32::<LittleEndian>()?;

        let mut difat = Vec::with_capacity(HEADER_DIFAT_ENTRIES);
        for _ in 0..HEADER_DIFAT_ENTRIES {
            difat.push(cursor.read_u32::<LittleEndian>()?);
        }

        Ok(Self {
            minor_version,
            major_version,
            sector_shift,
            mini_sector_shift,
            num_directory_sectors,
            num_fat_sectors,
            first_directory_sector,
            mini_stream_cutoff,
            first_mini_fat_sector,
            num_mini_fat_sectors,
            first_difat_sector,
            num_difat_sectors,
            difat,
        })
    }

    /// Size of a regular sector in bytes.
    pub fn sector_size(&self) -> usize {
        1usize << self.sector_shift
    }

    /// Size of a mini sector in bytes.
    pub fn mini_sector_size(&self) -> usize {
        1usize << self.mini_sector_shift
    }
}
