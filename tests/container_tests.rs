//! Integration tests for the compound file container

mod common;

use std::io::Write;

use altium_reader::{AltiumError, CompoundFile};
use common::{property_record, CompoundBuilder};
use flate2::write::ZlibEncoder;
use flate2::Compression;

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

// ===========================================================================
// Opening
// ===========================================================================

#[test]
fn test_open_rejects_non_compound_data() {
    let result = CompoundFile::from_bytes(b"PK\x03\x04 definitely not OLE".to_vec());
    assert!(matches!(result, Err(AltiumError::ContainerFormat(_))));

    let mut bad_signature = CompoundBuilder::new().stream("A", b"x".to_vec()).build();
    bad_signature[0] = 0;
    assert!(matches!(
        CompoundFile::from_bytes(bad_signature),
        Err(AltiumError::ContainerFormat(_))
    ));
}

#[test]
fn test_open_from_missing_file() {
    let result = CompoundFile::from_file("does/not/exist.PcbDoc");
    assert!(matches!(result, Err(AltiumError::Io(_))));
}

#[test]
fn test_open_empty_container() {
    let file = CompoundFile::from_bytes(CompoundBuilder::new().build()).unwrap();
    assert!(file.children(file.root()).is_empty());
    assert!(file.find_stream(&["FileHeader"]).is_none());
    assert_eq!(file.header().major_version, 3);
}

// ===========================================================================
// Lookup
// ===========================================================================

#[test]
fn test_find_stream_paths() {
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("FileHeader", b"header".to_vec())
            .stream("Nets6/Header", 1u32.to_le_bytes().to_vec())
            .stream("Nets6/Data", b"nets".to_vec())
            .stream("Library/Footprints/R0603/Data", b"deep".to_vec())
            .build(),
    )
    .unwrap();

    let header = file.find_stream(&["FileHeader"]).unwrap();
    assert!(header.is_stream());
    assert_eq!(file.read_stream(header).unwrap(), b"header");

    let nets = file.find_stream(&["Nets6", "Data"]).unwrap();
    assert_eq!(nets.size, 4);
    assert_eq!(file.read_stream(nets).unwrap(), b"nets");

    let deep = file
        .find_stream(&["Library", "Footprints", "R0603", "Data"])
        .unwrap();
    assert_eq!(file.read_stream(deep).unwrap(), b"deep");

    // Last segment must be a stream, the others storages
    assert!(file.find_stream(&["Nets6"]).is_none());
    assert!(file.find_stream(&["FileHeader", "Data"]).is_none());
    assert!(file.find_stream(&["Nets6", "Missing"]).is_none());
    assert!(file.find_stream(&[]).is_none());
}

#[test]
fn test_find_stream_from_storage() {
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("Pads6/Data", b"pads".to_vec())
            .build(),
    )
    .unwrap();
    let pads = file
        .find_stream_single_level(file.root(), "Pads6", false)
        .unwrap();
    let data = file.find_stream_from(pads, &["Data"]).unwrap();
    assert_eq!(file.read_stream(data).unwrap(), b"pads");
    assert!(file.find_stream_single_level(file.root(), "Pads6", true).is_none());
}

#[test]
fn test_enum_dir_lists_streams_only() {
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("Board6/Header", vec![1, 0, 0, 0])
            .stream("Board6/Data", b"board".to_vec())
            .stream("Board6/Nested/Data", b"x".to_vec())
            .build(),
    )
    .unwrap();

    let listing = file.enum_dir("Board6");
    let names: Vec<&str> = listing.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Header", "Data"]);
    assert_eq!(listing["Data"].size, 5);

    assert!(file.enum_dir("Missing").is_empty());
}

// ===========================================================================
// Stream data
// ===========================================================================

#[test]
fn test_read_regular_stream_across_sectors() {
    let data = pattern(10_000);
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("Small", b"tiny".to_vec())
            .stream("Models/0", data.clone())
            .build(),
    )
    .unwrap();

    let entry = file.find_stream(&["Models", "0"]).unwrap();
    assert_eq!(entry.size, 10_000);
    assert_eq!(file.read_stream(entry).unwrap(), data);

    let mut buffer = [0u8; 100];
    file.read_file(entry, 480, &mut buffer).unwrap();
    assert_eq!(&buffer[..], &data[480..580]);

    // Mini stream data is unaffected by the big stream
    let small = file.find_stream(&["Small"]).unwrap();
    assert_eq!(file.read_stream(small).unwrap(), b"tiny");
}

#[test]
fn test_read_mini_stream_across_mini_sectors() {
    let first = pattern(200);
    let second = pattern(4095);
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("First", first.clone())
            .stream("Second", second.clone())
            .build(),
    )
    .unwrap();

    let entry = file.find_stream(&["Second"]).unwrap();
    let mut buffer = [0u8; 10];
    file.read_file(entry, 60, &mut buffer).unwrap();
    assert_eq!(&buffer[..], &second[60..70]);
    assert_eq!(file.read_stream(entry).unwrap(), second);

    let entry = file.find_stream(&["First"]).unwrap();
    assert_eq!(file.read_stream(entry).unwrap(), first);
}

#[test]
fn test_read_file_bounds() {
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("Data", pattern(300))
            .stream("Empty", Vec::new())
            .build(),
    )
    .unwrap();

    let entry = file.find_stream(&["Data"]).unwrap();
    let mut buffer = [0u8; 10];
    assert!(matches!(
        file.read_file(entry, 295, &mut buffer),
        Err(AltiumError::UnexpectedEof)
    ));
    file.read_file(entry, 290, &mut buffer).unwrap();

    let empty = file.find_stream(&["Empty"]).unwrap();
    assert!(file.read_stream(empty).unwrap().is_empty());

    assert!(matches!(
        file.read_file(file.root(), 0, &mut buffer),
        Err(AltiumError::ContainerFormat(_))
    ));
}

#[test]
fn test_read_stream_rejects_oversized_entry() {
    let mut raw = CompoundBuilder::new().stream("Data", pattern(100)).build();
    // Version 4 keeps the high size dword of directory entries
    raw[0x1A..0x1C].copy_from_slice(&4u16.to_le_bytes());
    let first_directory = u32::from_le_bytes(raw[0x30..0x34].try_into().unwrap()) as usize;
    let size_high = (first_directory + 1) * 512 + 128 + 124;
    raw[size_high..size_high + 4].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());

    let file = CompoundFile::from_bytes(raw).unwrap();
    let entry = file.find_stream(&["Data"]).unwrap();
    assert!(entry.size > u32::MAX as u64);
    assert!(matches!(
        file.read_stream(entry),
        Err(AltiumError::ContainerFormat(_))
    ));
    assert!(file.reader(entry).is_err());
}

// ===========================================================================
// Schematic library parts
// ===========================================================================

#[test]
fn test_lib_symbols_groups_part_streams() {
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("FileHeader", property_record("|HEADER=Protel for Windows"))
            .stream("RES/Data", b"res".to_vec())
            .stream("RES/PinFrac", b"frac".to_vec())
            .stream("CAP/Data", b"cap".to_vec())
            .stream("CAP/PinTextData", b"text".to_vec())
            .stream("Settings/Other", b"ignored".to_vec())
            .storage("EmptyPart")
            .stream("OnlyWide/PinWideText", b"wide".to_vec())
            .build(),
    )
    .unwrap();

    let symbols = file.lib_symbols(None);
    let names: Vec<&str> = symbols.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["RES", "CAP", "OnlyWide"]);

    let res = &symbols["RES"];
    assert_eq!(file.read_stream(res.data.unwrap()).unwrap(), b"res");
    assert!(res.pin_frac.is_some());
    assert!(res.pin_text_data.is_none());

    let cap = &symbols["CAP"];
    assert!(cap.pin_frac.is_none());
    assert!(cap.pin_text_data.is_some());

    let wide = &symbols["OnlyWide"];
    assert!(wide.data.is_none());
    assert!(wide.pin_wide_text.is_some());
}

#[test]
fn test_lib_symbols_from_storage() {
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("SchLib/U1/Data", b"u1".to_vec())
            .stream("Other/Data", b"other".to_vec())
            .build(),
    )
    .unwrap();

    let start = file
        .find_stream_single_level(file.root(), "SchLib", false)
        .unwrap();
    let symbols = file.lib_symbols(Some(start));
    assert_eq!(symbols.len(), 1);
    assert!(symbols.contains_key("U1"));
}

// ===========================================================================
// Integrated libraries
// ===========================================================================

fn inner_library() -> Vec<u8> {
    CompoundBuilder::new()
        .stream("FileHeader", property_record("|HEADER=Inner"))
        .build()
}

#[test]
fn test_decode_int_lib_stream_raw_and_zlib() {
    let inner = inner_library();

    let mut raw = vec![0x00];
    raw.extend_from_slice(&inner);
    let mut packed = vec![0x02];
    packed.extend(zlib(&inner));

    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("SchLib/0", raw)
            .stream("PCBLib/0", packed)
            .build(),
    )
    .unwrap();

    for path in [["SchLib", "0"], ["PCBLib", "0"]] {
        let entry = file.find_stream(&path).unwrap();
        let decoded = file.decode_int_lib_stream(entry).unwrap();
        let header = decoded.find_stream(&["FileHeader"]).unwrap();
        let props = decoded.reader(header).unwrap().read_properties();
        assert_eq!(props.read_string("HEADER", ""), "Inner");
    }
}

#[test]
fn test_decode_int_lib_stream_unknown_tag() {
    let mut tagged = vec![0x01];
    tagged.extend(inner_library());
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("SchLib/0", tagged)
            .stream("SchLib/1", Vec::new())
            .build(),
    )
    .unwrap();

    let entry = file.find_stream(&["SchLib", "0"]).unwrap();
    match file.decode_int_lib_stream(entry) {
        Err(AltiumError::InvalidFormat(message)) => {
            assert!(message.contains("unknown header: 01"), "{}", message)
        }
        other => panic!("expected InvalidFormat, got {:?}", other.map(|_| ())),
    }

    let empty = file.find_stream(&["SchLib", "1"]).unwrap();
    assert!(file.decode_int_lib_stream(empty).is_err());
}

#[test]
fn test_inflate_model() {
    let model = pattern(5000);
    assert_eq!(CompoundFile::inflate_model(&zlib(&model)).unwrap(), model);
    assert!(matches!(
        CompoundFile::inflate_model(b"not zlib"),
        Err(AltiumError::Decompression(_))
    ));
}

// ===========================================================================
// Footprint libraries
// ===========================================================================

#[test]
fn test_list_lib_footprints_uses_unicode_pattern() {
    let file = CompoundFile::from_bytes(
        CompoundBuilder::new()
            .stream("FileHeader", property_record("|HEADER=PCB 6.0 Binary Library File"))
            .stream("R0603/Parameters", property_record("|PATTERN=R0603|DESCRIPTION=Chip"))
            .stream("R0603/Data", Vec::new())
            .stream("Library/Data", Vec::new())
            .stream(
                "LONGNAME~1/Parameters",
                property_record("|PATTERN=LONG|UNICODE=EXISTS|UNICODE__PATTERN=956,945"),
            )
            .storage("NoParameters")
            .build(),
    )
    .unwrap();

    let footprints = file.list_lib_footprints().unwrap();
    let names: Vec<&str> = footprints.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["R0603", "\u{3BC}\u{3B1}"]);
    assert_eq!(footprints["\u{3BC}\u{3B1}"].name, "LONGNAME~1");

    let storage = file.find_lib_footprint_dir("R0603").unwrap().unwrap();
    assert_eq!(storage.name, "R0603");
    assert!(file.find_lib_footprint_dir("R0805").unwrap().is_none());
}
