//! Tests for the Property Map Codec
//!
//! These tests verify:
//! - Entry count and tagged values on the wire
//! - Round trips independent of entry order
//! - Nested property maps
//! - Hard failure on unknown tags and impossible counts
//! - Large maps and the nesting limit

use openwire::config::DEFAULT_MAX_NESTING_DEPTH;
use openwire::message::properties::{decode_properties_at, read_tagged};
use openwire::message::{decode_properties, encode_properties, PropertyMap};
use openwire::schema::messages::WIRE_FORMAT_PROPERTIES;
use openwire::schema::PropertySpec;
use openwire::wire::{ByteOrder, WireReader, WireType, WireValue, WireWriter};
use openwire::WireError;

// =============================================================================
// Helper Functions
// =============================================================================

fn encode(map: &PropertyMap, specs: &[PropertySpec]) -> Vec<u8> {
    let mut writer = WireWriter::new(ByteOrder::Big);
    encode_properties(map, specs, &mut writer).unwrap();
    writer.finish().to_vec()
}

fn decode(bytes: &[u8]) -> PropertyMap {
    let mut reader = WireReader::new(bytes, ByteOrder::Big);
    let map = decode_properties(&mut reader).unwrap();
    assert!(reader.is_empty(), "decoder must consume every entry");
    map
}

/// A map holding one empty-named nested map, `levels` deep
fn nested_map_bytes(levels: usize) -> Vec<u8> {
    let mut bytes = vec![0x00, 0x00, 0x00, 0x00];
    for _ in 0..levels {
        let mut outer = vec![0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x0c];
        outer.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        outer.extend_from_slice(&bytes);
        bytes = outer;
    }
    bytes
}

fn sample() -> PropertyMap {
    let mut map = PropertyMap::new();
    map.insert("TcpNoDelayEnabled", true);
    map.insert("CacheSize", 1024i32);
    map.insert("MaxFrameSize", 104_857_600i64);
    map.insert("ProviderName", "ActiveMQ");
    map
}

// =============================================================================
// Map Behaviour Tests
// =============================================================================

#[test]
fn test_insert_replaces_existing() {
    let mut map = PropertyMap::new();
    assert!(map.insert("a", 1i32).is_none());
    assert_eq!(map.insert("a", 2i32), Some(WireValue::Int(1)));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a"), Some(&WireValue::Int(2)));
}

#[test]
fn test_equality_ignores_order() {
    let forward: PropertyMap = vec![("a", 1i32), ("b", 2i32)].into_iter().collect();
    let backward: PropertyMap = vec![("b", 2i32), ("a", 1i32)].into_iter().collect();
    assert_eq!(forward, backward);
}

#[test]
fn test_remove_keeps_order() {
    let mut map = sample();
    assert_eq!(map.remove("CacheSize"), Some(WireValue::Int(1024)));
    assert!(!map.contains_key("CacheSize"));

    let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["TcpNoDelayEnabled", "MaxFrameSize", "ProviderName"]);
}

#[test]
fn test_replaced_entry_keeps_position() {
    let mut map = sample();
    map.insert("TcpNoDelayEnabled", false);
    assert_eq!(map.iter().next(), Some(("TcpNoDelayEnabled", &WireValue::Bool(false))));
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_empty_map() {
    let bytes = encode(&PropertyMap::new(), &[]);
    assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x00]);
    assert!(decode(&bytes).is_empty());
}

#[test]
fn test_entry_layout() {
    let mut map = PropertyMap::new();
    map.insert("ok", true);

    let bytes = encode(&map, &[]);
    assert_eq!(
        bytes,
        vec![
            0x00, 0x00, 0x00, 0x01, // count
            0x00, 0x02, b'o', b'k', // untagged name
            0x01, 0x01, // tagged bool
        ]
    );
}

#[test]
fn test_round_trip_every_primitive() {
    let mut map = PropertyMap::new();
    map.insert("bool", false);
    map.insert("byte", 255u8);
    map.insert("char", WireValue::Char(0x41));
    map.insert("short", i16::MIN);
    map.insert("int", -1i32);
    map.insert("long", i64::MAX);
    map.insert("float", 1.25f32);
    map.insert("double", -2.5f64);
    map.insert("string", "");

    let decoded = decode(&encode(&map, &[]));
    assert_eq!(decoded, map);
    for (name, value) in map.iter() {
        assert_eq!(decoded.get(name).unwrap().wire_type(), value.wire_type());
    }
}

#[test]
fn test_reencode_preserves_count_and_entries() {
    let bytes = encode(&sample(), &[]);
    let decoded = decode(&bytes);

    // Re-encode in a different insertion order
    let mut reordered: Vec<_> = decoded.iter().map(|(n, v)| (n.to_string(), v.clone())).collect();
    reordered.reverse();
    let reordered: PropertyMap = reordered.into_iter().collect();

    let again = encode(&reordered, &[]);
    assert_eq!(again.len(), bytes.len());
    assert_eq!(&again[..4], &[0x00, 0x00, 0x00, 0x04]);
    assert_eq!(decode(&again), sample());
}

#[test]
fn test_known_specs_coerce_values() {
    let mut map = PropertyMap::new();
    map.insert("MaxFrameSize", 1024i32);
    map.insert("Custom", 7i32);

    let decoded = decode(&encode(&map, WIRE_FORMAT_PROPERTIES));
    assert_eq!(decoded.get("MaxFrameSize"), Some(&WireValue::Long(1024)));
    assert_eq!(decoded.get("Custom"), Some(&WireValue::Int(7)));
}

#[test]
fn test_known_spec_rejects_wrong_type() {
    let mut map = PropertyMap::new();
    map.insert("CacheEnabled", "yes");

    let mut writer = WireWriter::new(ByteOrder::Big);
    let err = encode_properties(&map, WIRE_FORMAT_PROPERTIES, &mut writer).unwrap_err();
    assert!(err.to_string().contains("CacheEnabled"));
    assert!(matches!(err.root(), WireError::TypeMismatch { expected: 0x01, actual: 0x09 }));
}

#[test]
fn test_nested_map() {
    let mut inner = PropertyMap::new();
    inner.insert("depth", 2i32);

    let mut map = PropertyMap::new();
    map.insert("inner", inner.clone());
    map.insert("after", true);

    let bytes = encode(&map, &[]);
    // count, name "inner", tag 0x0c
    assert_eq!(bytes[4 + 2 + 5], WireType::PropertyMap.tag());

    let decoded = decode(&bytes);
    assert_eq!(decoded.get("inner").and_then(|v| v.as_properties()), Some(&inner));
    assert_eq!(decoded.get("after"), Some(&WireValue::Bool(true)));
}

#[test]
fn test_raw_value_not_allowed() {
    let mut map = PropertyMap::new();
    map.insert("blob", &b"xyz"[..]);

    let mut writer = WireWriter::new(ByteOrder::Big);
    let err = encode_properties(&map, &[], &mut writer).unwrap_err();
    assert!(matches!(err.root(), WireError::UnsupportedType(0x0a)));
}

// =============================================================================
// Decoding Error Tests
// =============================================================================

#[test]
fn test_unknown_tag_is_hard_error() {
    let bytes = vec![
        0x00, 0x00, 0x00, 0x02, // count
        0x00, 0x01, b'x', 0x42, 0x00, // unknown tag 0x42
        0x00, 0x01, b'y', 0x01, 0x01, // a valid entry that must never be reached
    ];
    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    let err = decode_properties(&mut reader).unwrap_err();

    assert!(matches!(err.root(), WireError::UnsupportedType(0x42)));
    assert!(err.to_string().contains("'x'"));
}

#[test]
fn test_raw_tag_not_readable_tagged() {
    let bytes = [0x0a, 0x00];
    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    assert!(matches!(read_tagged(&mut reader), Err(WireError::UnsupportedType(0x0a))));
}

#[test]
fn test_impossible_count_fails_fast() {
    let bytes = [0x7f, 0xff, 0xff, 0xff, 0x00, 0x00];
    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    assert!(matches!(
        decode_properties(&mut reader),
        Err(WireError::LengthMismatch { .. })
    ));
}

#[test]
fn test_truncated_entry() {
    let mut bytes = encode(&sample(), &[]);
    bytes.truncate(bytes.len() - 3);

    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    let err = decode_properties(&mut reader).unwrap_err();
    assert!(matches!(err.root(), WireError::LengthMismatch { .. }));
}

#[test]
fn test_duplicate_names_keep_last() {
    let bytes = vec![
        0x00, 0x00, 0x00, 0x02,
        0x00, 0x01, b'k', 0x05, 0x00, 0x00, 0x00, 0x01,
        0x00, 0x01, b'k', 0x05, 0x00, 0x00, 0x00, 0x02,
    ];
    let map = decode(&bytes);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("k"), Some(&WireValue::Int(2)));
}

// =============================================================================
// Size and Nesting Tests
// =============================================================================

#[test]
fn test_many_unique_entries() {
    let count = 100_000u32;
    let mut bytes = count.to_be_bytes().to_vec();
    for i in 0..count {
        let name = format!("k{}", i);
        bytes.extend_from_slice(&(name.len() as u16).to_be_bytes());
        bytes.extend_from_slice(name.as_bytes());
        bytes.extend_from_slice(&[0x01, 0x01]);
    }

    let map = decode(&bytes);
    assert_eq!(map.len(), count as usize);
    assert_eq!(map.get("k99999"), Some(&WireValue::Bool(true)));
    assert_eq!(map.iter().next().map(|(n, _)| n), Some("k0"));
    assert_eq!(encode(&map, &[]), bytes);
}

#[test]
fn test_nesting_up_to_limit() {
    let bytes = nested_map_bytes(DEFAULT_MAX_NESTING_DEPTH);
    let mut map = decode(&bytes);
    for _ in 0..DEFAULT_MAX_NESTING_DEPTH {
        map = map.get("").and_then(|v| v.as_properties()).unwrap().clone();
    }
    assert!(map.is_empty());
}

#[test]
fn test_nesting_past_limit_rejected() {
    let bytes = nested_map_bytes(DEFAULT_MAX_NESTING_DEPTH + 1);
    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    let err = decode_properties(&mut reader).unwrap_err();
    assert!(matches!(
        err.root(),
        WireError::NestingTooDeep { max } if *max == DEFAULT_MAX_NESTING_DEPTH
    ));
}

#[test]
fn test_very_deep_nesting_rejected() {
    let bytes = nested_map_bytes(2_000);
    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    let err = decode_properties(&mut reader).unwrap_err();
    assert!(matches!(err.root(), WireError::NestingTooDeep { .. }));
}

#[test]
fn test_custom_nesting_limit() {
    let bytes = nested_map_bytes(3);

    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    assert!(decode_properties_at(&mut reader, 0, 3).is_ok());

    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    assert!(matches!(
        decode_properties_at(&mut reader, 0, 2).unwrap_err().root(),
        WireError::NestingTooDeep { max: 2 }
    ));
}
