//! Footprints of a `.PcbLib` library.
//!
//! Every footprint is a storage under the root holding:
//! - `Data`: a sub-record with the (Latin-1) name, then primitives of any kind
//! - `Parameters`: properties with the unicode `PATTERN` and `DESCRIPTION`
//! - `WideStrings`: optional wide string table for its texts

use log::debug;

use super::PcbPrimitive;
use crate::error::{AltiumError, Result};
use crate::io::altium::{read_tagged_records, ReaderConfiguration, WideStringTable};
use crate::io::cfb::{CompoundFile, CompoundFileEntry};
use crate::notification::NotificationCollection;

const STREAM: &str = "Data";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Footprint {
    /// Unicode name from `Parameters`, or the `Data` name without it.
    pub name: String,
    pub description: String,
    pub primitives: Vec<PcbPrimitive>,
}

impl Footprint {
    /// Read the footprint stored in `storage`.
    pub fn read(
        file: &CompoundFile,
        storage: &CompoundFileEntry,
        config: &ReaderConfiguration,
        notifications: &mut NotificationCollection,
    ) -> Result<Self> {
        let data = file.find_stream_from(storage, &[STREAM]).ok_or_else(|| {
            AltiumError::ContainerFormat(format!("footprint '{}' has no Data stream", storage.name))
        })?;
        let mut reader = file.reader(data)?;

        reader.begin_subrecord();
        let mut name = reader.read_legacy_string();
        reader.skip_subrecord();

        let mut description = String::new();
        if let Some(parameters) = file.find_stream_from(storage, &["Parameters"]) {
            let props = file.reader(parameters)?.read_properties();
            description = props.read_string("DESCRIPTION", "");
            let pattern = props.read_unicode_string("PATTERN", "");
            if !pattern.is_empty() {
                name = pattern;
            }
        }

        let wide_strings = match file.find_stream_from(storage, &["WideStrings"]) {
            Some(entry) => file.reader(entry)?.read_wide_string_table(),
            None => WideStringTable::new(),
        };

        let primitives = read_tagged_records(
            &mut reader,
            STREAM,
            PcbPrimitive::framing,
            config,
            notifications,
            |r| PcbPrimitive::read(r, &wide_strings),
        )?;
        if reader.has_error() {
            return Err(AltiumError::Parse { stream: STREAM });
        }

        debug!("footprint '{}': {} primitives", name, primitives.len());
        Ok(Footprint {
            name,
            description,
            primitives,
        })
    }

    /// Look a footprint up by its unicode name.
    pub fn read_by_name(
        file: &CompoundFile,
        name: &str,
        config: &ReaderConfiguration,
        notifications: &mut NotificationCollection,
    ) -> Result<Option<Self>> {
        match file.find_lib_footprint_dir(name)? {
            Some(storage) => Self::read(file, storage, config, notifications).map(Some),
            None => Ok(None),
        }
    }
}
