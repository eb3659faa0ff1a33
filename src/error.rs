//! Error types for the altium-reader library

use std::io;
use thiserror::Error;

/// Main error type for altium-reader operations
#[derive(Debug, Error)]
pub enum AltiumError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The compound file container is malformed (bad signature, truncated
    /// header, broken sector chain)
    #[error("Invalid compound file: {0}")]
    ContainerFormat(String),

    /// A record started with an unexpected type tag
    #[error("{stream} stream has invalid recordtype")]
    InvalidRecordType { stream: &'static str },

    /// A record tag no decoder is known for
    #[error("{stream} stream has unknown record type {record}")]
    UnknownRecord { stream: &'static str, record: i32 },

    /// A schematic property list holds a different `RECORD` than requested
    #[error("expected RECORD={expected}, found RECORD={found}")]
    UnexpectedRecord { expected: i32, found: i32 },

    /// A property-based record decoded to an empty property list
    #[error("{stream} stream has no properties")]
    NoProperties { stream: &'static str },

    /// The cursor error flag was set while decoding a record
    #[error("{stream} stream was not parsed correctly")]
    Parse { stream: &'static str },

    /// A sub-record is shorter than the smallest known layout
    #[error("{stream} stream has invalid length: {message}")]
    InvalidLength {
        stream: &'static str,
        message: String,
    },

    /// Error during decompression
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// Invalid data format (unknown envelope tag, bad marker byte)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A container read ran past the end of the backing buffer
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for altium-reader operations
pub type Result<T> = std::result::Result<T, AltiumError>;

impl From<String> for AltiumError {
    fn from(s: String) -> Self {
        AltiumError::Custom(s)
    }
}

impl From<&str> for AltiumError {
    fn from(s: &str) -> Self {
        AltiumError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_display() {
        let err = AltiumError::InvalidRecordType { stream: "Arcs6" };
        assert_eq!(err.to_string(), "Arcs6 stream has invalid recordtype");

        let err = AltiumError::Parse { stream: "Pads6" };
        assert_eq!(err.to_string(), "Pads6 stream was not parsed correctly");
    }

    #[test]
    fn test_eof_display() {
        assert_eq!(AltiumError::UnexpectedEof.to_string(), "unexpected end of file");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: AltiumError = io_err.into();
        assert!(matches!(err, AltiumError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let err: AltiumError = "boom".into();
        assert_eq!(err.to_string(), "boom");
    }
}
