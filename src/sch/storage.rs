//! Embedded files of a sheet (`Storage` stream).
//!
//! The stream starts with a property list holding `HEADER` and `WEIGHT`, the
//! number of files. Each file is 5 unknown bytes, a Pascal file name, a
//! `u32` size and the file contents.

use log::trace;

use crate::error::{AltiumError, Result};
use crate::io::altium::BinaryReader;

const STREAM: &str = "Storage";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbeddedFile {
    /// Path the file had when it was embedded.
    pub filename: String,
    pub data: Vec<u8>,
}

impl EmbeddedFile {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        reader.skip(5);
        let filename = reader.read_legacy_string();
        let size = reader.read_u32() as usize;
        let data = reader.read_bytes(size);
        if reader.has_error() {
            return Err(AltiumError::Parse { stream: STREAM });
        }
        Ok(EmbeddedFile { filename, data })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Storage {
    pub header: String,
    pub files: Vec<EmbeddedFile>,
}

impl Storage {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let props = reader.read_properties();
        let header = props.read_string("HEADER", "");
        let weight = props.read_int("WEIGHT", 0);
        if weight < 0 {
            return Err(AltiumError::InvalidLength {
                stream: STREAM,
                message: format!("negative file count {}", weight),
            });
        }

        let files = (0..weight)
            .map(|_| EmbeddedFile::read(reader))
            .collect::<Result<Vec<_>>>()?;

        if reader.remaining_bytes() != 0 {
            trace!(
                "Storage file was not fully parsed as {} bytes are remaining.",
                reader.remaining_bytes()
            );
        }
        Ok(Storage { header, files })
    }

    /// Embedded file by the name an image record refers to.
    pub fn get(&self, filename: &str) -> Option<&EmbeddedFile> {
        self.files.iter().find(|file| file.filename == filename)
    }
}
