//! Schematic records of `.SchDoc` sheets and `.SchLib` symbol libraries.
//!
//! Every schematic object is a property list whose `RECORD` key selects the
//! kind. Records refer to their owner (the symbol they are drawn in) through
//! `OWNERINDEX`, the record index of the owner in the same stream.
//!
//! Coordinates are stored in units of 10 mil with an optional `_FRAC` key
//! in 1/10000 mil; they are converted to nanometres with Y pointing down.
//!
//! # Example
//!
//! ```rust,ignore
//! use altium_reader::sch::{SchLibReader, SchRecord};
//!
//! let library = SchLibReader::from_file("parts.SchLib")?.read()?;
//! for symbol in &library.symbols {
//!     for record in &symbol.records {
//!         if let SchRecord::Pin(pin) = record {
//!             println!("{}: {}", symbol.name, pin.designator);
//!         }
//!     }
//! }
//! ```

pub mod connectivity;
pub mod enums;
pub mod implementation;
pub mod library;
pub mod pin;
pub mod reader;
pub mod shapes;
pub mod sheet;
pub mod storage;
pub mod symbol;
pub mod text;

pub use connectivity::{Bus, BusEntry, Junction, NetLabel, NoErc, Port, PowerPort, Wire};
pub use enums::*;
pub use implementation::{Implementation, ImplementationList};
pub use library::{read_lib_symbol, LibSymbol, SchLibReader, SchLibrary};
pub use pin::{Pin, PinConglomerate};
pub use reader::{SchDocument, SchReader};
pub use shapes::{
    Arc, Bezier, Ellipse, Image, Line, Polygon, Polyline, Rectangle, RoundRectangle,
};
pub use sheet::{Sheet, SheetFont, SheetEntry, SheetSymbol};
pub use storage::{EmbeddedFile, Storage};
pub use symbol::Symbol;
pub use text::{Designator, Label, Parameter, SheetText, TextFrame};

use crate::error::{AltiumError, Result};
use crate::io::altium::PropertyMap;
use crate::types::{sch_unit_to_kicad, Color, Vector2I};

/// Owner index and part id of records without an owner.
pub const ALTIUM_COMPONENT_NONE: i32 = -1;

// ---------------------------------------------------------------------------
// Property helpers
// ---------------------------------------------------------------------------

/// Fail unless the `RECORD` key holds `expected`.
pub(crate) fn expect_record(props: &PropertyMap, expected: RecordId) -> Result<()> {
    let found = props.read_int("RECORD", -1);
    if found != expected.to_i32() {
        return Err(AltiumError::UnexpectedRecord {
            expected: expected.to_i32(),
            found,
        });
    }
    Ok(())
}

pub(crate) fn read_owner_index(props: &PropertyMap) -> i32 {
    props.read_int("OWNERINDEX", ALTIUM_COMPONENT_NONE)
}

pub(crate) fn read_owner_part_id(props: &PropertyMap) -> i32 {
    props.read_int("OWNERPARTID", ALTIUM_COMPONENT_NONE)
}

/// Length stored as `KEY` (10 mil) plus `KEY_FRAC` (1/10000 mil).
pub(crate) fn read_unit_frac(props: &PropertyMap, key: &str) -> i32 {
    let whole = props.read_int(key, 0);
    let frac = props.read_int(&format!("{}_FRAC", key), 0);
    sch_unit_to_kicad(whole, frac)
}

/// Length stored as `KEY` (100 mil) plus `KEY_FRAC1`.
pub(crate) fn read_unit_frac1(props: &PropertyMap, key: &str) -> i32 {
    let whole = props.read_int(key, 0);
    let frac = props.read_int(&format!("{}_FRAC1", key), 0);
    sch_unit_to_kicad(whole.saturating_mul(10), frac)
}

/// Point stored as `<PREFIX>.X` and `<PREFIX>.Y`, Y negated.
pub(crate) fn read_point(props: &PropertyMap, prefix: &str) -> Vector2I {
    Vector2I::new(
        read_unit_frac(props, &format!("{}.X", prefix)),
        -read_unit_frac(props, &format!("{}.Y", prefix)),
    )
}

/// `LOCATIONCOUNT` points stored as `X1`/`Y1` .. `Xn`/`Yn`.
///
/// The count is capped at the number of properties in the record.
pub(crate) fn read_point_list(props: &PropertyMap) -> Vec<Vector2I> {
    let count = (props.read_int("LOCATIONCOUNT", 0).max(0) as usize).min(props.len());
    (1..=count)
        .map(|i| {
            Vector2I::new(
                read_unit_frac(props, &format!("X{}", i)),
                -read_unit_frac(props, &format!("Y{}", i)),
            )
        })
        .collect()
}

pub(crate) fn read_color(props: &PropertyMap, key: &str) -> Color {
    Color::from_altium(props.read_int(key, 0))
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// The first record of a sheet or symbol stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header {
    /// File format banner, e.g. `Protel for Windows - Schematic Capture Binary File Version 5.0`.
    pub header: String,
    /// Number of records that follow.
    pub weight: i32,
}

impl Header {
    /// Headers usually carry no `RECORD` key at all.
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        if props.contains_key("RECORD") {
            expect_record(props, RecordId::Header)?;
        }
        Ok(Header {
            header: props.read_string("HEADER", ""),
            weight: props.read_int("WEIGHT", 0),
        })
    }
}

/// Any schematic record, chosen by its `RECORD` key.
#[derive(Debug, Clone, PartialEq)]
pub enum SchRecord {
    Header(Header),
    Symbol(Symbol),
    Pin(Box<Pin>),
    Label(Label),
    Bezier(Bezier),
    Polyline(Polyline),
    Polygon(Polygon),
    Ellipse(Ellipse),
    RoundRectangle(RoundRectangle),
    /// Both circular (12) and elliptical (11) arcs.
    Arc(Arc),
    Line(Line),
    Rectangle(Rectangle),
    SheetSymbol(SheetSymbol),
    SheetEntry(SheetEntry),
    PowerPort(PowerPort),
    Port(Port),
    NoErc(NoErc),
    NetLabel(NetLabel),
    Bus(Bus),
    Wire(Wire),
    /// Text frames (28) and notes (209).
    TextFrame(TextFrame),
    Junction(Junction),
    Image(Image),
    Sheet(Box<Sheet>),
    SheetName(SheetText),
    FileName(SheetText),
    Designator(Designator),
    BusEntry(BusEntry),
    Parameter(Parameter),
    ImplementationList(ImplementationList),
    Implementation(Implementation),
    /// A record kind without a decoder, kept as is.
    Unknown(i32, PropertyMap),
}

impl SchRecord {
    pub fn from_properties(props: PropertyMap) -> Result<Self> {
        let id = if props.contains_key("HEADER") {
            props.read_int("RECORD", RecordId::Header.to_i32())
        } else {
            props.read_int("RECORD", -1)
        };
        let Some(kind) = RecordId::from_i32(id) else {
            return Ok(SchRecord::Unknown(id, props));
        };

        let record = match kind {
            RecordId::Header => SchRecord::Header(Header::from_properties(&props)?),
            RecordId::Component => SchRecord::Symbol(Symbol::from_properties(&props)?),
            RecordId::Pin => SchRecord::Pin(Box::new(Pin::from_properties(&props)?)),
            RecordId::Label => SchRecord::Label(Label::from_properties(&props)?),
            RecordId::Bezier => SchRecord::Bezier(Bezier::from_properties(&props)?),
            RecordId::Polyline => SchRecord::Polyline(Polyline::from_properties(&props)?),
            RecordId::Polygon => SchRecord::Polygon(Polygon::from_properties(&props)?),
            RecordId::Ellipse => SchRecord::Ellipse(Ellipse::from_properties(&props)?),
            RecordId::RoundRectangle => {
                SchRecord::RoundRectangle(RoundRectangle::from_properties(&props)?)
            }
            RecordId::EllipticalArc | RecordId::Arc => SchRecord::Arc(Arc::from_properties(&props)?),
            RecordId::Line => SchRecord::Line(Line::from_properties(&props)?),
            RecordId::Rectangle => SchRecord::Rectangle(Rectangle::from_properties(&props)?),
            RecordId::SheetSymbol => SchRecord::SheetSymbol(SheetSymbol::from_properties(&props)?),
            RecordId::SheetEntry => SchRecord::SheetEntry(SheetEntry::from_properties(&props)?),
            RecordId::PowerPort => SchRecord::PowerPort(PowerPort::from_properties(&props)?),
            RecordId::Port => SchRecord::Port(Port::from_properties(&props)?),
            RecordId::NoErc => SchRecord::NoErc(NoErc::from_properties(&props)?),
            RecordId::NetLabel => SchRecord::NetLabel(NetLabel::from_properties(&props)?),
            RecordId::Bus => SchRecord::Bus(Bus::from_properties(&props)?),
            RecordId::Wire => SchRecord::Wire(Wire::from_properties(&props)?),
            RecordId::TextFrame | RecordId::Note => {
                SchRecord::TextFrame(TextFrame::from_properties(&props)?)
            }
            RecordId::Junction => SchRecord::Junction(Junction::from_properties(&props)?),
            RecordId::Image => SchRecord::Image(Image::from_properties(&props)?),
            RecordId::Sheet => SchRecord::Sheet(Box::new(Sheet::from_properties(&props)?)),
            RecordId::SheetName => {
                SchRecord::SheetName(SheetText::from_properties(&props, RecordId::SheetName)?)
            }
            RecordId::FileName => {
                SchRecord::FileName(SheetText::from_properties(&props, RecordId::FileName)?)
            }
            RecordId::Designator => SchRecord::Designator(Designator::from_properties(&props)?),
            RecordId::BusEntry => SchRecord::BusEntry(BusEntry::from_properties(&props)?),
            RecordId::Parameter => SchRecord::Parameter(Parameter::from_properties(&props)?),
            RecordId::ImplementationList => {
                SchRecord::ImplementationList(ImplementationList::from_properties(&props)?)
            }
            RecordId::Implementation => {
                SchRecord::Implementation(Implementation::from_properties(&props)?)
            }
            RecordId::IeeeSymbol
            | RecordId::PieChart
            | RecordId::Template
            | RecordId::ParameterSet => SchRecord::Unknown(id, props),
        };
        Ok(record)
    }

    /// Value of the `RECORD` key this record was read from.
    pub fn record_id(&self) -> i32 {
        match self {
            SchRecord::Header(_) => RecordId::Header.to_i32(),
            SchRecord::Symbol(_) => RecordId::Component.to_i32(),
            SchRecord::Pin(_) => RecordId::Pin.to_i32(),
            SchRecord::Label(_) => RecordId::Label.to_i32(),
            SchRecord::Bezier(_) => RecordId::Bezier.to_i32(),
            SchRecord::Polyline(_) => RecordId::Polyline.to_i32(),
            SchRecord::Polygon(_) => RecordId::Polygon.to_i32(),
            SchRecord::Ellipse(_) => RecordId::Ellipse.to_i32(),
            SchRecord::RoundRectangle(_) => RecordId::RoundRectangle.to_i32(),
            SchRecord::Arc(arc) if arc.is_elliptical => RecordId::EllipticalArc.to_i32(),
            SchRecord::Arc(_) => RecordId::Arc.to_i32(),
            SchRecord::Line(_) => RecordId::Line.to_i32(),
            SchRecord::Rectangle(_) => RecordId::Rectangle.to_i32(),
            SchRecord::SheetSymbol(_) => RecordId::SheetSymbol.to_i32(),
            SchRecord::SheetEntry(_) => RecordId::SheetEntry.to_i32(),
            SchRecord::PowerPort(_) => RecordId::PowerPort.to_i32(),
            SchRecord::Port(_) => RecordId::Port.to_i32(),
            SchRecord::NoErc(_) => RecordId::NoErc.to_i32(),
            SchRecord::NetLabel(_) => RecordId::NetLabel.to_i32(),
            SchRecord::Bus(_) => RecordId::Bus.to_i32(),
            SchRecord::Wire(_) => RecordId::Wire.to_i32(),
            SchRecord::TextFrame(frame) if frame.note.is_some() => RecordId::Note.to_i32(),
            SchRecord::TextFrame(_) => RecordId::TextFrame.to_i32(),
            SchRecord::Junction(_) => RecordId::Junction.to_i32(),
            SchRecord::Image(_) => RecordId::Image.to_i32(),
            SchRecord::Sheet(_) => RecordId::Sheet.to_i32(),
            SchRecord::SheetName(_) => RecordId::SheetName.to_i32(),
            SchRecord::FileName(_) => RecordId::FileName.to_i32(),
            SchRecord::Designator(_) => RecordId::Designator.to_i32(),
            SchRecord::BusEntry(_) => RecordId::BusEntry.to_i32(),
            SchRecord::Parameter(_) => RecordId::Parameter.to_i32(),
            SchRecord::ImplementationList(_) => RecordId::ImplementationList.to_i32(),
            SchRecord::Implementation(_) => RecordId::Implementation.to_i32(),
            SchRecord::Unknown(id, _) => *id,
        }
    }
}
