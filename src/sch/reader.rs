//! Sheet reader: decodes the records of a `.SchDoc` file.
//!
//! `FileHeader` holds the header record followed by every object of the
//! sheet. `Additional` holds objects added by newer versions (harnesses,
//! notes) after a header of its own. `Storage` holds embedded images.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use super::library::RecordDecoder;
use super::{SchRecord, Sheet, Storage};
use crate::error::Result;
use crate::io::altium::{read_records, ReaderConfiguration, RecordFraming};
use crate::io::cfb::CompoundFile;
use crate::notification::NotificationCollection;

const FILE_HEADER_STREAM: &str = "FileHeader";
const ADDITIONAL_STREAM: &str = "Additional";
const STORAGE_STREAM: &str = "Storage";

/// Decoded records of a sheet. `OWNERINDEX` values index into `records`.
#[derive(Debug, Clone, Default)]
pub struct SchDocument {
    pub records: Vec<SchRecord>,
    pub additional: Vec<SchRecord>,
    pub storage: Option<Storage>,
    pub notifications: NotificationCollection,
}

impl SchDocument {
    /// The sheet settings record.
    pub fn sheet(&self) -> Option<&Sheet> {
        self.records.iter().find_map(|record| match record {
            SchRecord::Sheet(sheet) => Some(sheet.as_ref()),
            _ => None,
        })
    }
}

/// Reads a `.SchDoc` compound file.
#[derive(Debug)]
pub struct SchReader {
    file: CompoundFile,
    config: ReaderConfiguration,
}

impl SchReader {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(CompoundFile::from_file(path)?))
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self::new(CompoundFile::from_bytes(data)?))
    }

    pub fn new(file: CompoundFile) -> Self {
        Self {
            file,
            config: ReaderConfiguration::default(),
        }
    }

    pub fn with_config(mut self, config: ReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn read(&self) -> Result<SchDocument> {
        let file = &self.file;
        let mut doc = SchDocument::default();
        let no_fracs = HashMap::new();

        if let Some(entry) = file.find_stream(&[FILE_HEADER_STREAM]) {
            let mut decoder = RecordDecoder::new(FILE_HEADER_STREAM, &no_fracs);
            doc.records = read_records(
                &mut file.reader(entry)?,
                FILE_HEADER_STREAM,
                RecordFraming::properties(0),
                &self.config,
                &mut doc.notifications,
                |reader| decoder.decode(reader),
            )?;
        }

        if let Some(entry) = file.find_stream(&[ADDITIONAL_STREAM]) {
            let mut reader = file.reader(entry)?;
            // Own header, not an object
            let header = reader.read_properties();
            debug!("{}: {}", ADDITIONAL_STREAM, header.read_string("HEADER", ""));
            let mut decoder = RecordDecoder::new(ADDITIONAL_STREAM, &no_fracs);
            doc.additional = read_records(
                &mut reader,
                ADDITIONAL_STREAM,
                RecordFraming::properties(0),
                &self.config,
                &mut doc.notifications,
                |reader| decoder.decode(reader),
            )?;
        }

        if let Some(entry) = file.find_stream(&[STORAGE_STREAM]) {
            doc.storage = Some(Storage::read(&mut file.reader(entry)?)?);
        }

        debug!(
            "sheet read: {} records, {} additional, {} notifications",
            doc.records.len(),
            doc.additional.len(),
            doc.notifications.len()
        );
        Ok(doc)
    }
}
