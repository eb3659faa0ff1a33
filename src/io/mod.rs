//! I/O module: the compound file container and Altium stream decoding

pub mod altium;
pub mod cfb;
pub mod compression;

pub use altium::{BinaryReader, PropertyMap, ReaderConfiguration, RecordFraming};
pub use cfb::{CompoundFile, CompoundFileEntry, SymbolStreams};
