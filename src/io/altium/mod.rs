//! Altium stream decoding primitives: the binary reader, property lists and
//! stream-level record iteration.

pub mod binary_reader;
pub mod compressed;
pub mod properties;
pub mod record_reader;
pub mod text;

#[cfg(test)]
pub mod test_support;

pub use binary_reader::{BinaryReader, LePrimitive, WideStringTable};
pub use compressed::read_compressed_string;
pub use properties::{altium_property_to_kicad_string, PropertyMap};
pub use record_reader::{read_records, read_tagged_records, ReaderConfiguration, RecordFraming};
