//! PCB records of `.PcbDoc` boards and `.PcbLib` footprint libraries.
//!
//! A board stores each record kind in its own storage (`Arcs6`, `Pads6`,
//! ...) whose `Data` stream is a plain sequence of records. Primitives
//! (arcs, pads, vias, tracks, texts, fills, regions, component bodies) are
//! binary and start with a [`RecordTag`]; everything else is a property list.
//!
//! # Example
//!
//! ```rust,ignore
//! use altium_reader::pcb::PcbReader;
//!
//! let doc = PcbReader::from_file("board.PcbDoc")?.read()?;
//! for pad in &doc.pads {
//!     println!("{} at {}", pad.name, pad.position);
//! }
//! ```

pub mod arc;
pub mod board;
pub mod class;
pub mod component;
pub mod component_body;
pub mod dimension;
pub mod enums;
pub mod extended_primitive;
pub mod fill;
pub mod flags;
pub mod footprint;
pub mod layer;
pub mod model;
pub mod net;
pub mod pad;
pub mod polygon;
pub mod reader;
pub mod region;
pub mod rule;
pub mod text;
pub mod track;
pub mod vertex;
pub mod via;

pub use arc::Arc;
pub use board::{Board, BoardLayer};
pub use class::Class;
pub use component::Component;
pub use component_body::ComponentBody;
pub use dimension::Dimension;
pub use enums::*;
pub use extended_primitive::{ExtendedInformationType, ExtendedPrimitiveInformation, PrimitiveObjectId};
pub use fill::Fill;
pub use flags::{PrimitiveFlags1, PrimitiveFlags2};
pub use footprint::Footprint;
pub use layer::AltiumLayer;
pub use model::Model;
pub use net::Net;
pub use pad::{Pad, PadSizeAndShape};
pub use polygon::Polygon;
pub use reader::{PcbDocument, PcbReader};
pub use region::Region;
pub use rule::{Rule, RuleKind};
pub use text::Text;
pub use track::Track;
pub use vertex::Vertex;
pub use via::Via;

use log::debug;

use crate::error::{AltiumError, Result};
use crate::io::altium::{
    read_records, BinaryReader, PropertyMap, ReaderConfiguration, RecordFraming, WideStringTable,
};
use crate::io::cfb::CompoundFile;
use crate::notification::NotificationCollection;

/// Net index of primitives without a net.
pub const ALTIUM_NET_UNCONNECTED: u16 = 65535;
/// Polygon index of primitives outside any pour.
pub const ALTIUM_POLYGON_NONE: u16 = 65535;
/// Polygon index of primitives belonging to the board outline.
pub const ALTIUM_POLYGON_BOARD: u16 = 65534;
/// Component index of free primitives.
pub const ALTIUM_COMPONENT_NONE: u16 = 65535;

// ---------------------------------------------------------------------------
// Record helpers
// ---------------------------------------------------------------------------

/// Consume the record tag, failing if it is not `tag`.
pub(crate) fn expect_tag(reader: &mut BinaryReader, tag: RecordTag, stream: &'static str) -> Result<()> {
    if reader.read_u8() != u8::from(tag) {
        return Err(AltiumError::InvalidRecordType { stream });
    }
    Ok(())
}

/// Fail the record if the cursor ran past its data.
pub(crate) fn check_parsed(reader: &BinaryReader, stream: &'static str) -> Result<()> {
    if reader.has_error() {
        return Err(AltiumError::Parse { stream });
    }
    Ok(())
}

/// Read the property list of a record; an empty list is an error.
pub(crate) fn read_record_properties(reader: &mut BinaryReader, stream: &'static str) -> Result<PropertyMap> {
    let props = reader.read_properties();
    if props.is_empty() {
        return Err(AltiumError::NoProperties { stream });
    }
    Ok(props)
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

/// Record streams of a board. Each lives in `<name>/Data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcbStream {
    Arcs,
    Board,
    Classes,
    ComponentBodies,
    Components,
    Dimensions,
    ExtendedPrimitiveInformation,
    Fills,
    Models,
    Nets,
    Pads,
    Polygons,
    Regions,
    Rules,
    ShapeBasedRegions,
    Texts,
    Tracks,
    Vias,
}

impl PcbStream {
    pub const ALL: [PcbStream; 18] = [
        PcbStream::Arcs,
        PcbStream::Board,
        PcbStream::Classes,
        PcbStream::ComponentBodies,
        PcbStream::Components,
        PcbStream::Dimensions,
        PcbStream::ExtendedPrimitiveInformation,
        PcbStream::Fills,
        PcbStream::Models,
        PcbStream::Nets,
        PcbStream::Pads,
        PcbStream::Polygons,
        PcbStream::Regions,
        PcbStream::Rules,
        PcbStream::ShapeBasedRegions,
        PcbStream::Texts,
        PcbStream::Tracks,
        PcbStream::Vias,
    ];

    /// Storage name in the compound file.
    pub fn name(&self) -> &'static str {
        match self {
            PcbStream::Arcs => "Arcs6",
            PcbStream::Board => "Board6",
            PcbStream::Classes => "Classes6",
            PcbStream::ComponentBodies => "ComponentBodies6",
            PcbStream::Components => "Components6",
            PcbStream::Dimensions => "Dimensions6",
            PcbStream::ExtendedPrimitiveInformation => "ExtendedPrimitiveInformation",
            PcbStream::Fills => "Fills6",
            PcbStream::Models => "Models",
            PcbStream::Nets => "Nets6",
            PcbStream::Pads => "Pads6",
            PcbStream::Polygons => "Polygons6",
            PcbStream::Regions => "Regions6",
            PcbStream::Rules => "Rules6",
            PcbStream::ShapeBasedRegions => "ShapeBasedRegions6",
            PcbStream::Texts => "Texts6",
            PcbStream::Tracks => "Tracks6",
            PcbStream::Vias => "Vias6",
        }
    }

    /// On-disk layout of one record, used to skip broken records.
    pub fn framing(&self) -> RecordFraming {
        match self {
            PcbStream::Pads => RecordFraming::binary(6),
            PcbStream::Texts => RecordFraming::binary(2),
            PcbStream::Arcs
            | PcbStream::ComponentBodies
            | PcbStream::Fills
            | PcbStream::Regions
            | PcbStream::ShapeBasedRegions
            | PcbStream::Tracks
            | PcbStream::Vias => RecordFraming::binary(1),
            PcbStream::Dimensions | PcbStream::Rules => RecordFraming::properties(2),
            PcbStream::Board
            | PcbStream::Classes
            | PcbStream::Components
            | PcbStream::ExtendedPrimitiveInformation
            | PcbStream::Models
            | PcbStream::Nets
            | PcbStream::Polygons => RecordFraming::properties(0),
        }
    }

    /// Path of the record data.
    pub fn data_path(&self) -> [&'static str; 2] {
        [self.name(), "Data"]
    }
}

/// Storage of the board's wide string table.
pub const WIDE_STRINGS_STREAM: &str = "WideStrings6";

/// Decode every record of `stream`. A board without the stream has no
/// records of that kind.
pub fn read_stream<T, F>(
    file: &CompoundFile,
    stream: PcbStream,
    config: &ReaderConfiguration,
    notifications: &mut NotificationCollection,
    decode: F,
) -> Result<Vec<T>>
where
    F: FnMut(&mut BinaryReader) -> Result<T>,
{
    let Some(entry) = file.find_stream(&stream.data_path()) else {
        debug!("{} not present", stream.name());
        return Ok(Vec::new());
    };
    let mut reader = file.reader(entry)?;
    read_records(
        &mut reader,
        stream.name(),
        stream.framing(),
        config,
        notifications,
        decode,
    )
}

/// The board's wide string table, empty if there is none.
pub fn read_wide_strings(file: &CompoundFile) -> Result<WideStringTable> {
    match file.find_stream(&[WIDE_STRINGS_STREAM, "Data"]) {
        Some(entry) => Ok(file.reader(entry)?.read_wide_string_table()),
        None => Ok(WideStringTable::new()),
    }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Any binary primitive, as found mixed together in a footprint.
#[derive(Debug, Clone, PartialEq)]
pub enum PcbPrimitive {
    Arc(Arc),
    Pad(Box<Pad>),
    Via(Via),
    Track(Track),
    Text(Text),
    Fill(Fill),
    Region(Region),
    ComponentBody(ComponentBody),
}

impl PcbPrimitive {
    /// Decode the next primitive, chosen by its tag byte.
    pub fn read(reader: &mut BinaryReader, wide_strings: &WideStringTable) -> Result<Self> {
        let tag = reader.peek::<u8>();
        match RecordTag::from_byte(tag) {
            Some(RecordTag::Arc) => Ok(PcbPrimitive::Arc(Arc::read(reader)?)),
            Some(RecordTag::Pad) => Ok(PcbPrimitive::Pad(Box::new(Pad::read(reader)?))),
            Some(RecordTag::Via) => Ok(PcbPrimitive::Via(Via::read(reader)?)),
            Some(RecordTag::Track) => Ok(PcbPrimitive::Track(Track::read(reader)?)),
            Some(RecordTag::Text) => Ok(PcbPrimitive::Text(Text::read(reader, wide_strings)?)),
            Some(RecordTag::Fill) => Ok(PcbPrimitive::Fill(Fill::read(reader)?)),
            Some(RecordTag::Region) => Ok(PcbPrimitive::Region(Region::read(reader, false)?)),
            Some(RecordTag::Model) => Ok(PcbPrimitive::ComponentBody(ComponentBody::read(reader)?)),
            None => Err(AltiumError::UnknownRecord {
                stream: "Data",
                record: tag as i32,
            }),
        }
    }

    /// Framing of a primitive with the given tag.
    pub fn framing(tag: u8) -> Option<RecordFraming> {
        match RecordTag::from_byte(tag)? {
            RecordTag::Pad => Some(RecordFraming::binary(6)),
            RecordTag::Text => Some(RecordFraming::binary(2)),
            _ => Some(RecordFraming::binary(1)),
        }
    }

    pub fn tag(&self) -> RecordTag {
        match self {
            PcbPrimitive::Arc(_) => RecordTag::Arc,
            PcbPrimitive::Pad(_) => RecordTag::Pad,
            PcbPrimitive::Via(_) => RecordTag::Via,
            PcbPrimitive::Track(_) => RecordTag::Track,
            PcbPrimitive::Text(_) => RecordTag::Text,
            PcbPrimitive::Fill(_) => RecordTag::Fill,
            PcbPrimitive::Region(_) => RecordTag::Region,
            PcbPrimitive::ComponentBody(_) => RecordTag::Model,
        }
    }
}
