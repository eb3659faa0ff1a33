//! Integration tests for reading schematic sheets and symbol libraries

mod common;

use std::io::Write;

use altium_reader::sch::{
    Orientation, PinElectrical, SchLibReader, SchReader, SchRecord, SheetOrientation, SheetSize,
    ALTIUM_COMPONENT_NONE,
};
use altium_reader::types::Vector2I;
use altium_reader::{AltiumError, NotificationType, ReaderConfiguration};
use common::{messages, property_record, stream_of, CompoundBuilder, RecordBuilder};
use flate2::write::ZlibEncoder;
use flate2::Compression;

const LIB_HEADER: &str = "Protel for Windows - Schematic Library Editor Binary File Version 5.0";
const SHEET_HEADER: &str = "Protel for Windows - Schematic Capture Binary File Version 5.0";

// ===========================================================================
// Builders
// ===========================================================================

/// Binary pin record with a given record id, length and location.
fn binary_pin(record: i32, designator: &str, conglomerate: u8, length: i16, x: i16, y: i16) -> Vec<u8> {
    let payload = RecordBuilder::new()
        .i32(record)
        .u8(0)
        .i16(1)
        .u8(0)
        .u8(0)
        .u8(0)
        .u8(0)
        .u8(0)
        .pascal("")
        .u8(0)
        .u8(4)
        .u8(conglomerate)
        .i16(length)
        .i16(x)
        .i16(y)
        .i32(0)
        .pascal(designator)
        .pascal(designator)
        .pascal("")
        .pascal("1|&|1")
        .build();
    RecordBuilder::new().binary_record(&payload).build()
}

/// `PinFrac` entry: marker, decimal id, zlib payload of x, y and length.
fn pin_frac(index: i32, x: i32, y: i32, length: i32) -> Vec<u8> {
    let mut body = Vec::new();
    for value in [x, y, length] {
        body.extend_from_slice(&value.to_le_bytes());
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&body).unwrap();
    let packed = encoder.finish().unwrap();

    let id = index.to_string();
    RecordBuilder::new()
        .u8(0xD0)
        .pascal(&id)
        .i32(packed.len() as i32)
        .bytes(&packed)
        .build()
}

fn library(res_data: Vec<u8>) -> Vec<u8> {
    CompoundBuilder::new()
        .stream(
            "FileHeader",
            property_record(&format!(
                "|HEADER={}|WEIGHT=2|COMPCOUNT=2|LIBREF0=RES|LIBREF1=LONG_NAME_PART",
                LIB_HEADER
            )),
        )
        .stream(
            "SectionKeys",
            property_record("|KEYCOUNT=1|LIBREF0=LONG_NAME_PART|SECTIONKEY0=LONG_NAME~1"),
        )
        .stream("RES/Data", res_data)
        .stream("RES/PinFrac", pin_frac(0, 0, 0, 50_000))
        .stream(
            "LONG_NAME~1/Data",
            property_record("|RECORD=1|LIBREFERENCE=LONG_NAME_PART|PARTCOUNT=2"),
        )
        .stream("LONG_NAME~1/PinTextData", vec![0u8; 8])
        .stream("Orphan/PinWideText", vec![0u8; 8])
        .build()
}

fn resistor_records() -> Vec<Vec<u8>> {
    vec![
        property_record(
            "|RECORD=1|LIBREFERENCE=RES|COMPONENTDESCRIPTION=Resistor|PARTCOUNT=2\
             |DISPLAYMODECOUNT=1|CURRENTPARTID=1",
        ),
        binary_pin(2, "1", 0x18, 10, -20, 0),
        property_record(
            "|RECORD=2|OWNERINDEX=0|OWNERPARTID=1|NAME=2|DESIGNATOR=2|ELECTRICAL=4\
             |PINCONGLOMERATE=2|PINLENGTH=10|LOCATION.X=20",
        ),
        property_record(
            "|RECORD=14|OWNERINDEX=0|OWNERPARTID=1|LOCATION.X=-10|LOCATION.Y=-4\
             |CORNER.X=10|CORNER.Y=4|ISSOLID=T",
        ),
        property_record("|RECORD=3|OWNERINDEX=0|SYMBOL=4"),
        property_record("|RECORD=44|OWNERINDEX=0"),
        property_record(
            "|RECORD=45|OWNERINDEX=5|MODELNAME=R0603|MODELTYPE=PCBLIB|ISCURRENT=T",
        ),
    ]
}

// ===========================================================================
// Symbol libraries
// ===========================================================================

#[test]
fn test_read_symbol_library() {
    let library = SchLibReader::from_bytes(library(stream_of(&resistor_records())))
        .unwrap()
        .read()
        .unwrap();

    assert_eq!(library.header.header, LIB_HEADER);
    assert_eq!(library.header.weight, 2);
    assert_eq!(library.symbol_names, vec!["RES", "LONG_NAME_PART"]);

    let names: Vec<&str> = library.symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["RES", "LONG_NAME_PART"]);

    // Storage without Data is reported, not decoded
    assert_eq!(
        messages(&library.notifications, NotificationType::Warning),
        vec!["Orphan: symbol storage without Data stream skipped".to_string()]
    );

    let res = library.symbol("RES").unwrap();
    assert_eq!(res.records.len(), 7);
    let symbol = res.symbol().unwrap();
    assert_eq!(symbol.lib_reference, "RES");
    assert_eq!(symbol.component_description, "Resistor");
    assert_eq!(symbol.part_count, 2);
    assert_eq!(symbol.index_in_sheet, -1);

    let long = library.symbol("LONG_NAME_PART").unwrap();
    assert_eq!(long.symbol().unwrap().part_count, 2);
    assert_eq!(
        library
            .notifications
            .count_for_stream(NotificationType::NotSupported, "LONG_NAME_PART"),
        1
    );
}

#[test]
fn test_library_pins_with_fractions() {
    let library = SchLibReader::from_bytes(library(stream_of(&resistor_records())))
        .unwrap()
        .read()
        .unwrap();
    let pins: Vec<_> = library.symbol("RES").unwrap().pins().collect();
    assert_eq!(pins.len(), 2);

    // Binary pin, first in the stream, gets PinFrac entry 0
    let first = pins[0];
    assert_eq!(first.designator, "1");
    assert_eq!(first.owner_index, ALTIUM_COMPONENT_NONE);
    assert_eq!(first.owner_part_id, 1);
    assert_eq!(first.electrical, PinElectrical::Passive);
    assert_eq!(first.orientation, Orientation::Rightwards);
    assert!(first.show_pin_name);
    assert!(first.show_designator);
    assert_eq!(first.location, Vector2I::new(-5_080_000, 0));
    assert_eq!(first.length, 2_667_000);
    assert_eq!(first.kicad_location, Vector2I::new(-2_413_000, 0));

    let second = pins[1];
    assert_eq!(second.owner_index, 0);
    assert_eq!(second.orientation, Orientation::Leftwards);
    assert_eq!(second.length, 2_540_000);
    assert_eq!(second.kicad_location, Vector2I::new(2_540_000, 0));
}

#[test]
fn test_library_other_records() {
    let library = SchLibReader::from_bytes(library(stream_of(&resistor_records())))
        .unwrap()
        .read()
        .unwrap();
    let records = &library.symbol("RES").unwrap().records;

    match &records[3] {
        SchRecord::Rectangle(rect) => {
            assert_eq!(rect.bottom_left, Vector2I::new(-2_540_000, 1_016_000));
            assert_eq!(rect.top_right, Vector2I::new(2_540_000, -1_016_000));
            assert!(rect.style.is_solid);
            assert_eq!(rect.style.owner_index, 0);
        }
        other => panic!("expected a rectangle, got {:?}", other),
    }

    match &records[4] {
        SchRecord::Unknown(id, props) => {
            assert_eq!(*id, 3);
            assert_eq!(props.read_int("SYMBOL", 0), 4);
        }
        other => panic!("expected an unknown record, got {:?}", other),
    }

    assert!(matches!(records[5], SchRecord::ImplementationList(_)));
    match &records[6] {
        SchRecord::Implementation(model) => {
            assert_eq!(model.owner_index, 5);
            assert_eq!(model.name, "R0603");
            assert!(model.is_footprint());
            assert!(model.is_current);
        }
        other => panic!("expected an implementation, got {:?}", other),
    }
}

#[test]
fn test_library_broken_binary_pin() {
    let mut records = resistor_records();
    records.insert(2, binary_pin(7, "X", 0, 10, 0, 0));

    let strict = SchLibReader::from_bytes(library(stream_of(&records)))
        .unwrap()
        .read();
    assert!(matches!(
        strict,
        Err(AltiumError::UnexpectedRecord { expected: 2, found: 7 })
    ));

    let library = SchLibReader::from_bytes(library(stream_of(&records)))
        .unwrap()
        .with_config(ReaderConfiguration::failsafe())
        .read()
        .unwrap();
    let res = library.symbol("RES").unwrap();
    assert_eq!(res.records.len(), 7);
    assert_eq!(res.pins().count(), 2);
    assert_eq!(
        library
            .notifications
            .count_for_stream(NotificationType::Error, "Data"),
        1
    );
}

#[test]
fn test_library_without_file_header() {
    let file = CompoundBuilder::new()
        .stream("U1/Data", property_record("|RECORD=1|LIBREFERENCE=U1"))
        .build();
    let library = SchLibReader::from_bytes(file).unwrap().read().unwrap();
    assert!(library.header.header.is_empty());
    assert!(library.symbol_names.is_empty());
    assert_eq!(library.symbols.len(), 1);
    assert_eq!(library.symbols[0].name, "U1");
}

// ===========================================================================
// Sheets
// ===========================================================================

fn sheet_file() -> Vec<u8> {
    let file_header = stream_of(&[
        property_record(&format!("|HEADER={}|WEIGHT=7", SHEET_HEADER)),
        property_record(
            "|RECORD=31|FONTIDCOUNT=2|SIZE1=10|FONTNAME1=Times New Roman\
             |SIZE2=12|FONTNAME2=Arial|BOLD2=T|SHEETSTYLE=5|WORKSPACEORIENTATION=1",
        ),
        property_record(
            "|RECORD=1|LIBREFERENCE=RES|LOCATION.X=100|LOCATION.Y=200|ORIENTATION=1\
             |CURRENTPARTID=1|PARTCOUNT=2",
        ),
        property_record(
            "|RECORD=34|OWNERINDEX=2|OWNERPARTID=-1|TEXT=R1|NAME=Designator\
             |LOCATION.X=100|LOCATION.Y=210",
        ),
        property_record("|RECORD=27|LINEWIDTH=1|LOCATIONCOUNT=2|X1=100|Y1=200|X2=150|Y2=200"),
        property_record("|RECORD=25|TEXT=R\\E\\S\\E\\T\\|LOCATION.X=120|LOCATION.Y=200"),
        property_record("|RECORD=29|LOCATION.X=100|LOCATION.Y=200"),
        property_record(
            "|RECORD=209|TEXT=Check~1this|AUTHOR=Reviewer|COLLAPSED=T\
             |LOCATION.X=10|LOCATION.Y=20|CORNER.X=50|CORNER.Y=0",
        ),
    ]);

    let additional = stream_of(&[
        property_record(&format!("|HEADER={}", SHEET_HEADER)),
        property_record("|RECORD=215|OWNERPARTID=-1|LOCATION.X=300"),
    ]);

    let mut storage = RecordBuilder::new();
    storage
        .properties("|HEADER=Icon storage|WEIGHT=1")
        .zeros(5)
        .pascal("C:\\logo.bmp")
        .u32(4)
        .bytes(b"BM\x00\x01");

    CompoundBuilder::new()
        .stream("FileHeader", file_header)
        .stream("Additional", additional)
        .stream("Storage", storage.build())
        .build()
}

#[test]
fn test_read_sheet_end_to_end() {
    let doc = SchReader::from_bytes(sheet_file()).unwrap().read().unwrap();
    assert!(doc.notifications.is_empty());
    assert_eq!(doc.records.len(), 8);

    match &doc.records[0] {
        SchRecord::Header(header) => {
            assert_eq!(header.header, SHEET_HEADER);
            assert_eq!(header.weight, 7);
        }
        other => panic!("expected the header, got {:?}", other),
    }

    let sheet = doc.sheet().unwrap();
    assert_eq!(sheet.fonts.len(), 2);
    assert_eq!(sheet.font(2).unwrap().font_name, "Arial");
    assert!(sheet.font(2).unwrap().bold);
    assert!(sheet.font(0).is_none());
    assert_eq!(sheet.sheet_size, SheetSize::A);
    assert_eq!(sheet.orientation, SheetOrientation::Portrait);

    match &doc.records[2] {
        SchRecord::Symbol(symbol) => {
            assert_eq!(symbol.location, Vector2I::new(25_400_000, -50_800_000));
            assert_eq!(symbol.orientation, Orientation::Upwards);
        }
        other => panic!("expected a symbol, got {:?}", other),
    }

    match &doc.records[3] {
        SchRecord::Designator(designator) => {
            assert_eq!(designator.owner_index, 2);
            assert_eq!(designator.text, "R1");
        }
        other => panic!("expected a designator, got {:?}", other),
    }

    match &doc.records[4] {
        SchRecord::Wire(wire) => {
            assert_eq!(
                wire.points,
                vec![
                    Vector2I::new(25_400_000, -50_800_000),
                    Vector2I::new(38_100_000, -50_800_000),
                ]
            );
            assert_eq!(wire.owner_part_id, ALTIUM_COMPONENT_NONE);
        }
        other => panic!("expected a wire, got {:?}", other),
    }

    match &doc.records[5] {
        SchRecord::NetLabel(label) => assert_eq!(label.text, "~{RESET}"),
        other => panic!("expected a net label, got {:?}", other),
    }

    assert!(matches!(doc.records[6], SchRecord::Junction(_)));

    match &doc.records[7] {
        SchRecord::TextFrame(note) => {
            assert!(note.is_note());
            assert_eq!(note.text, "Check\nthis");
            let info = note.note.as_ref().unwrap();
            assert_eq!(info.author, "Reviewer");
            assert!(info.is_collapsed);
        }
        other => panic!("expected a note, got {:?}", other),
    }
}

#[test]
fn test_read_sheet_additional_and_storage() {
    let doc = SchReader::from_bytes(sheet_file()).unwrap().read().unwrap();

    assert_eq!(doc.additional.len(), 1);
    match &doc.additional[0] {
        SchRecord::Unknown(id, props) => {
            assert_eq!(*id, 215);
            assert_eq!(props.read_int("LOCATION.X", 0), 300);
        }
        other => panic!("expected an unknown record, got {:?}", other),
    }

    let storage = doc.storage.as_ref().unwrap();
    assert_eq!(storage.header, "Icon storage");
    let logo = storage.get("C:\\logo.bmp").unwrap();
    assert_eq!(logo.data, b"BM\x00\x01");
}

#[test]
fn test_read_sheet_without_streams() {
    let doc = SchReader::from_bytes(CompoundBuilder::new().build())
        .unwrap()
        .read()
        .unwrap();
    assert!(doc.records.is_empty());
    assert!(doc.additional.is_empty());
    assert!(doc.storage.is_none());
    assert!(doc.sheet().is_none());
}

#[test]
fn test_sheet_failsafe_skips_bad_record() {
    let file = CompoundBuilder::new()
        .stream(
            "FileHeader",
            stream_of(&[
                property_record(&format!("|HEADER={}", SHEET_HEADER)),
                RecordBuilder::new().u32(0).build(),
                property_record("|RECORD=29|LOCATION.X=1"),
            ]),
        )
        .build();

    assert!(matches!(
        SchReader::from_bytes(file.clone()).unwrap().read(),
        Err(AltiumError::NoProperties { stream: "FileHeader" })
    ));

    let doc = SchReader::from_bytes(file)
        .unwrap()
        .with_config(ReaderConfiguration::failsafe())
        .read()
        .unwrap();
    assert_eq!(doc.records.len(), 2);
    assert_eq!(
        doc.notifications
            .count_for_stream(NotificationType::Error, "FileHeader"),
        1
    );
}
