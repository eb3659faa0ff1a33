//! Stream-level record iteration with optional failsafe recovery.

use log::debug;

use super::BinaryReader;
use crate::error::{AltiumError, Result};
use crate::notification::{NotificationCollection, NotificationType};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for record decoding.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfiguration {
    /// When `true`, a record that fails to decode is reported as a
    /// notification and skipped using its framing; the rest of the stream is
    /// still read.
    ///
    /// Default: `false` (strict mode).
    pub failsafe: bool,
}

impl ReaderConfiguration {
    pub fn failsafe() -> Self {
        Self { failsafe: true }
    }
}

/// How one record of a stream is laid out on disk: `prefix` fixed bytes
/// (tag byte, unknown header) followed by `subrecords` length-prefixed
/// blocks. Property lists count as one length-prefixed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFraming {
    pub prefix: usize,
    pub subrecords: usize,
}

impl RecordFraming {
    /// Tag byte followed by `subrecords` sub-records.
    pub const fn binary(subrecords: usize) -> Self {
        Self {
            prefix: 1,
            subrecords,
        }
    }

    /// `prefix` bytes followed by one property list.
    pub const fn properties(prefix: usize) -> Self {
        Self {
            prefix,
            subrecords: 1,
        }
    }
}

/// Skip one record by its framing, starting over at `start`.
fn resync(reader: &mut BinaryReader, start: usize, framing: Option<RecordFraming>) -> bool {
    let Some(framing) = framing else {
        return false;
    };
    if !reader.recover_at(start + framing.prefix) {
        return false;
    }
    for _ in 0..framing.subrecords {
        // Property lists keep a flag in the top byte
        let length = (reader.read_u32() & 0x00FF_FFFF) as usize;
        reader.skip(length);
    }
    !reader.has_error()
}

/// Decode every record of a stream.
///
/// Records are read while at least 4 bytes remain. In strict mode the first
/// failure is returned and trailing bytes are an error; in failsafe mode
/// failures become notifications on `notifications`.
pub fn read_records<T, F>(
    reader: &mut BinaryReader,
    stream: &'static str,
    framing: RecordFraming,
    config: &ReaderConfiguration,
    notifications: &mut NotificationCollection,
    decode: F,
) -> Result<Vec<T>>
where
    F: FnMut(&mut BinaryReader) -> Result<T>,
{
    read_tagged_records(reader, stream, |_| Some(framing), config, notifications, decode)
}

/// Decode a stream that mixes record kinds. `framing_of` maps the leading
/// tag byte of a record to its framing; `None` means a failed record of that
/// kind cannot be skipped and ends the stream.
pub fn read_tagged_records<T, F, G>(
    reader: &mut BinaryReader,
    stream: &'static str,
    framing_of: G,
    config: &ReaderConfiguration,
    notifications: &mut NotificationCollection,
    mut decode: F,
) -> Result<Vec<T>>
where
    F: FnMut(&mut BinaryReader) -> Result<T>,
    G: Fn(u8) -> Option<RecordFraming>,
{
    let mut records = Vec::new();
    let mut failed = 0usize;

    while reader.remaining_bytes() >= 4 {
        let start = reader.position();
        let tag = reader.peek::<u8>();
        match decode(reader) {
            Ok(record) => records.push(record),
            Err(err) if config.failsafe => {
                failed += 1;
                notifications.notify(
                    NotificationType::Error,
                    stream,
                    format!("record at offset {} skipped: {}", start, err),
                );
                if !resync(reader, start, framing_of(tag)) {
                    notifications.notify(
                        NotificationType::Warning,
                        stream,
                        "cannot resynchronise after a broken record, rest of stream ignored",
                    );
                    break;
                }
            }
            Err(err) => return Err(err),
        }
        if reader.position() == start {
            break;
        }
    }

    let trailing = reader.remaining_bytes();
    if trailing != 0 && !reader.has_error() {
        if config.failsafe {
            notifications.notify(
                NotificationType::Warning,
                stream,
                format!("{} trailing bytes ignored", trailing),
            );
        } else {
            return Err(AltiumError::InvalidLength {
                stream,
                message: format!("stream is not fully parsed, {} bytes left", trailing),
            });
        }
    }

    debug!("{}: {} records read, {} failed", stream, records.len(), failed);
    Ok(records)
}
