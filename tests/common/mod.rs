//! Shared test utilities for altium-reader integration tests.
//!
//! Provides a little-endian record builder and an in-memory compound file
//! writer so every test can assemble the exact file it needs. All test
//! crates import this via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod compound;

pub use builders::RecordBuilder;
pub use compound::CompoundBuilder;

use altium_reader::{Notification, NotificationCollection, NotificationType};

// ===========================================================================
// Record helpers
// ===========================================================================

/// A `Tracks6` record: layer, net, start, end and width in Altium units.
pub fn track_record(layer: u8, net: u16, start: (i32, i32), end: (i32, i32), width: i32) -> Vec<u8> {
    RecordBuilder::new()
        .u8(4)
        .subrecord(|b| {
            b.u8(layer)
                .u8(0x04)
                .u8(0x00)
                .u16(net)
                .u16(0xFFFF)
                .u16(0xFFFF)
                .zeros(4)
                .i32(start.0)
                .i32(start.1)
                .i32(end.0)
                .i32(end.1)
                .i32(width)
                .u16(0)
                .u8(0);
        })
        .build()
}

/// A property record as stored in `Nets6`, `Classes6`, `FileHeader`, ...
pub fn property_record(text: &str) -> Vec<u8> {
    RecordBuilder::new().properties(text).build()
}

/// Concatenate records into one stream.
pub fn stream_of(records: &[Vec<u8>]) -> Vec<u8> {
    records.concat()
}

// ===========================================================================
// Notification helpers
// ===========================================================================

/// Notifications of one type, for compact assertions.
pub fn messages(notes: &NotificationCollection, nt: NotificationType) -> Vec<String> {
    notes
        .of_type(nt)
        .into_iter()
        .map(|n: &Notification| format!("{}: {}", n.stream, n.message))
        .collect()
}
