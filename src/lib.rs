//! # altium-reader
//!
//! A pure Rust library for reading Altium Designer schematic, PCB and
//! library files.
//!
//! Altium stores its documents in OLE2 compound files. Each record kind
//! lives in its own stream, either as a `|KEY=VALUE|` property list or as a
//! tagged binary layout whose sub-record lengths grow with newer versions.
//! This crate decodes those records into plain structs in nanometres, with
//! the Y axis pointing down.
//!
//! ## Features
//!
//! - Compound file container with FAT, mini-FAT and DIFAT support
//! - Integrated library (`.IntLib`) envelopes and embedded 3D models
//! - Boards (`.PcbDoc`) and footprint libraries (`.PcbLib`)
//! - Sheets (`.SchDoc`) and symbol libraries (`.SchLib`)
//! - Failsafe mode: broken records are skipped and reported
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use altium_reader::{PcbReader, ReaderConfiguration};
//!
//! let doc = PcbReader::from_file("board.PcbDoc")?
//!     .with_config(ReaderConfiguration::failsafe())
//!     .read()?;
//!
//! for track in &doc.tracks {
//!     println!("{:?} -> {:?}", track.start, track.end);
//! }
//! for note in doc.notifications.iter() {
//!     eprintln!("{}", note);
//! }
//! # Ok::<(), altium_reader::error::AltiumError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::cfb`] - the compound file container
//! - [`io::altium`] - binary cursor, property lists, record iteration
//! - [`pcb`] - PCB record decoders and the board reader
//! - [`sch`] - schematic record decoders, library and sheet readers
//! - [`types`] - unit conversion and geometry values

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod notification;
pub mod pcb;
pub mod sch;
pub mod types;

// Re-export commonly used types
pub use error::{AltiumError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{convert_to_kicad_unit, sch_unit_to_kicad, Color, Vector2I, Vector3, Vector3I};

// Re-export I/O types
pub use io::{BinaryReader, CompoundFile, CompoundFileEntry, PropertyMap, ReaderConfiguration};

// Re-export readers
pub use pcb::{Footprint, PcbDocument, PcbReader};
pub use sch::{SchDocument, SchLibReader, SchLibrary, SchReader, SchRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
