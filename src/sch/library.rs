//! Schematic symbol libraries (`.SchLib`).
//!
//! The root holds a `FileHeader` stream listing the symbols, an optional
//! `SectionKeys` stream mapping long library references to their storage
//! names, and one storage per symbol with:
//! - `Data`: the symbol's records; pins are usually binary
//! - `PinFrac`: fractional parts of pin coordinates, keyed by pin index
//! - `PinWideText`, `PinTextData`: pin text overrides, not decoded

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use super::enums::{RecordId, SchEnum};
use super::{Header, Pin, SchRecord, Symbol};
use crate::error::{AltiumError, Result};
use crate::io::altium::{
    read_compressed_string, read_records, BinaryReader, PropertyMap, ReaderConfiguration,
    RecordFraming,
};
use crate::io::cfb::{CompoundFile, SymbolStreams};
use crate::notification::{NotificationCollection, NotificationType};

const DATA_STREAM: &str = "Data";
const PIN_FRAC_STREAM: &str = "PinFrac";

// ---------------------------------------------------------------------------
// Record decoding
// ---------------------------------------------------------------------------

/// Decode the binary form of a pin record into the keys its text form uses.
pub fn read_binary_pin(raw: &[u8]) -> Result<PropertyMap> {
    let mut reader = BinaryReader::new(raw.to_vec());
    let record = reader.read_i32();
    if record != RecordId::Pin.to_i32() {
        return Err(AltiumError::UnexpectedRecord {
            expected: RecordId::Pin.to_i32(),
            found: record,
        });
    }

    let mut props = PropertyMap::new();
    props.insert("RECORD", record.to_string());
    reader.skip(1);
    props.insert("OWNERPARTID", reader.read_i16().to_string());
    props.insert("OWNERPARTDISPLAYMODE", reader.read_u8().to_string());
    props.insert("SYMBOL_INNEREDGE", reader.read_u8().to_string());
    props.insert("SYMBOL_OUTEREDGE", reader.read_u8().to_string());
    props.insert("SYMBOL_INNER", reader.read_u8().to_string());
    props.insert("SYMBOL_OUTER", reader.read_u8().to_string());
    props.insert("TEXT", reader.read_legacy_string());
    reader.skip(1);
    props.insert("ELECTRICAL", reader.read_u8().to_string());
    props.insert("PINCONGLOMERATE", reader.read_u8().to_string());
    props.insert("PINLENGTH", reader.read_i16().to_string());
    props.insert("LOCATION.X", reader.read_i16().to_string());
    props.insert("LOCATION.Y", reader.read_i16().to_string());
    props.insert("COLOR", reader.read_i32().to_string());
    props.insert("NAME", reader.read_legacy_string());
    props.insert("DESIGNATOR", reader.read_legacy_string());
    props.insert("SWAPIDGROUP", reader.read_legacy_string());

    // `<part>|&|<sequence>`
    let part_sequence = reader.read_legacy_string();
    let parts: Vec<&str> = part_sequence.split('|').collect();
    if let [part, _, sequence] = parts.as_slice() {
        props.insert("PART", *part);
        props.insert("SEQ", *sequence);
    }

    if reader.has_error() {
        return Err(AltiumError::Parse { stream: DATA_STREAM });
    }
    Ok(props)
}

/// Fractional parts of a pin's location and length, in 1/10000 mil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinFrac {
    pub x: i32,
    pub y: i32,
    pub length: i32,
}

/// Decode a `PinFrac` stream: compressed strings keyed by pin index, each
/// holding three `i32` fractions.
pub fn read_pin_fracs(reader: &mut BinaryReader) -> Result<HashMap<i32, PinFrac>> {
    let mut fracs = HashMap::new();
    while reader.remaining_bytes() > 0 {
        let (index, payload) = read_compressed_string(reader)?;
        let mut payload = BinaryReader::new(payload);
        let frac = PinFrac {
            x: payload.read_i32(),
            y: payload.read_i32(),
            length: payload.read_i32(),
        };
        if payload.has_error() {
            return Err(AltiumError::Parse {
                stream: PIN_FRAC_STREAM,
            });
        }
        fracs.insert(index, frac);
    }
    Ok(fracs)
}

/// Decodes consecutive property records of one stream, merging pin
/// fractions into the pins in order.
pub(crate) struct RecordDecoder<'a> {
    stream: &'static str,
    pin_fracs: &'a HashMap<i32, PinFrac>,
    pin_index: i32,
}

impl<'a> RecordDecoder<'a> {
    pub(crate) fn new(stream: &'static str, pin_fracs: &'a HashMap<i32, PinFrac>) -> Self {
        Self {
            stream,
            pin_fracs,
            pin_index: 0,
        }
    }

    pub(crate) fn decode(&mut self, reader: &mut BinaryReader) -> Result<SchRecord> {
        let mut binary_error = None;
        let mut props = reader.read_properties_with(|raw| {
            read_binary_pin(raw).unwrap_or_else(|err| {
                binary_error = Some(err);
                PropertyMap::new()
            })
        });
        if let Some(err) = binary_error {
            return Err(err);
        }
        if reader.has_error() {
            return Err(AltiumError::Parse {
                stream: self.stream,
            });
        }
        if props.is_empty() {
            return Err(AltiumError::NoProperties {
                stream: self.stream,
            });
        }

        if props.read_int("RECORD", -1) == RecordId::Pin.to_i32() {
            if let Some(frac) = self.pin_fracs.get(&self.pin_index) {
                props.insert("LOCATION.X_FRAC", frac.x.to_string());
                props.insert("LOCATION.Y_FRAC", frac.y.to_string());
                props.insert("PINLENGTH_FRAC", frac.length.to_string());
            }
            self.pin_index += 1;
        }

        SchRecord::from_properties(props)
    }
}

// ---------------------------------------------------------------------------
// Library symbols
// ---------------------------------------------------------------------------

/// One symbol of a library with all its records in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LibSymbol {
    /// Library reference; the storage name unless `SectionKeys` maps it.
    pub name: String,
    pub records: Vec<SchRecord>,
}

impl LibSymbol {
    /// The symbol record, normally the first one.
    pub fn symbol(&self) -> Option<&Symbol> {
        self.records.iter().find_map(|record| match record {
            SchRecord::Symbol(symbol) => Some(symbol),
            _ => None,
        })
    }

    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.records.iter().filter_map(|record| match record {
            SchRecord::Pin(pin) => Some(pin.as_ref()),
            _ => None,
        })
    }
}

/// Decode the streams of one library symbol.
pub fn read_lib_symbol(
    file: &CompoundFile,
    name: &str,
    streams: &SymbolStreams<'_>,
    config: &ReaderConfiguration,
    notifications: &mut NotificationCollection,
) -> Result<LibSymbol> {
    let data = streams.data.ok_or_else(|| {
        AltiumError::ContainerFormat(format!("symbol '{}' has no Data stream", name))
    })?;

    let pin_fracs = match streams.pin_frac {
        Some(entry) => read_pin_fracs(&mut file.reader(entry)?)?,
        None => HashMap::new(),
    };
    if streams.pin_wide_text.is_some() || streams.pin_text_data.is_some() {
        notifications.notify(
            NotificationType::NotSupported,
            name,
            "PinWideText and PinTextData streams are not decoded",
        );
    }

    let mut decoder = RecordDecoder::new(DATA_STREAM, &pin_fracs);
    let records = read_records(
        &mut file.reader(data)?,
        DATA_STREAM,
        RecordFraming::properties(0),
        config,
        notifications,
        |reader| decoder.decode(reader),
    )?;

    Ok(LibSymbol {
        name: name.to_string(),
        records,
    })
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Decoded contents of a symbol library.
#[derive(Debug, Clone, Default)]
pub struct SchLibrary {
    pub header: Header,
    /// `LIBREF<n>` entries of the file header, in library order.
    pub symbol_names: Vec<String>,
    pub symbols: Vec<LibSymbol>,
    pub notifications: NotificationCollection,
}

impl SchLibrary {
    pub fn symbol(&self, name: &str) -> Option<&LibSymbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }
}

/// Reads a `.SchLib` compound file.
#[derive(Debug)]
pub struct SchLibReader {
    file: CompoundFile,
    config: ReaderConfiguration,
}

impl SchLibReader {
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

    pub fn file(&self) -> &CompoundFile {
        &self.file
    }

    pub fn read(&self) -> Result<SchLibrary> {
        let file = &self.file;
        let mut library = SchLibrary::default();

        if let Some(entry) = file.find_stream(&["FileHeader"]) {
            let props = file.reader(entry)?.read_properties();
            library.header = Header::from_properties(&props)?;
            let count = props.read_int("COMPCOUNT", 0).max(0);
            library.symbol_names = (0..count)
                .map(|i| props.read_string(&format!("LIBREF{}", i), ""))
                .collect();
        }

        let section_keys = match file.find_stream(&["SectionKeys"]) {
            Some(entry) => read_section_keys(&file.reader(entry)?.read_properties()),
            None => HashMap::new(),
        };

        for (storage, streams) in file.lib_symbols(None) {
            let name = section_keys.get(&storage).cloned().unwrap_or(storage);
            if streams.data.is_none() {
                library.notifications.notify(
                    NotificationType::Warning,
                    name,
                    "symbol storage without Data stream skipped",
                );
                continue;
            }
            let symbol = read_lib_symbol(
                file,
                &name,
                &streams,
                &self.config,
                &mut library.notifications,
            )?;
            library.symbols.push(symbol);
        }

        debug!(
            "library read: {} symbols, {} notifications",
            library.symbols.len(),
            library.notifications.len()
        );
        Ok(library)
    }
}

/// Storage name -> library reference for references too long to be
/// storage names.
fn read_section_keys(props: &PropertyMap) -> HashMap<String, String> {
    let count = props.read_int("KEYCOUNT", 0).max(0);
    (0..count)
        .filter_map(|i| {
            let lib_ref = props.read_string(&format!("LIBREF{}", i), "");
            let key = props.read_string(&format!("SECTIONKEY{}", i), "");
            (!lib_ref.is_empty() && !key.is_empty()).then_some((key, lib_ref))
        })
        .collect()
}
