//! Tests for the Primitive Codec
//!
//! These tests verify:
//! - Round trips for every scalar type, including boundaries
//! - Tag verification on tagged reads
//! - Byte order handling
//! - Narrow string encoding limits
//! - Short-buffer handling

use openwire::wire::{ByteOrder, WireReader, WireType, WireValue, WireWriter, MAX_STRING_LEN};
use openwire::WireError;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_with(order: ByteOrder, f: impl FnOnce(&mut WireWriter)) -> Vec<u8> {
    let mut writer = WireWriter::new(order);
    f(&mut writer);
    writer.finish().to_vec()
}

fn big(f: impl FnOnce(&mut WireWriter)) -> Vec<u8> {
    write_with(ByteOrder::Big, f)
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_bool_round_trip() {
    for tagged in [false, true] {
        for value in [false, true] {
            let bytes = big(|w| w.write_bool(value, tagged));
            let mut reader = WireReader::new(&bytes, ByteOrder::Big);
            assert_eq!(reader.read_bool(tagged).unwrap(), value);
            assert!(reader.is_empty());
        }
    }
}

#[test]
fn test_byte_boundaries() {
    for value in [0u8, 1, 127, 128, 255] {
        let bytes = big(|w| w.write_byte(value, true));
        assert_eq!(bytes, vec![0x02, value]);
        let mut reader = WireReader::new(&bytes, ByteOrder::Big);
        assert_eq!(reader.read_byte(true).unwrap(), value);
    }
}

#[test]
fn test_char_is_single_code_unit() {
    let bytes = big(|w| w.write_char(0x00e9, true));
    assert_eq!(bytes, vec![0x03, 0x00, 0xe9]);

    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    assert_eq!(reader.read_char(true).unwrap(), 0x00e9);
    assert!(reader.is_empty());
}

#[test]
fn test_short_boundaries() {
    for value in [0i16, -1, 1, i16::MIN, i16::MAX] {
        let bytes = big(|w| w.write_short(value, false));
        assert_eq!(bytes.len(), 2);
        let mut reader = WireReader::new(&bytes, ByteOrder::Big);
        assert_eq!(reader.read_short(false).unwrap(), value);
    }
}

#[test]
fn test_int_boundaries() {
    for value in [0i32, -1, 1, i32::MIN, i32::MAX] {
        let bytes = big(|w| w.write_int(value, true));
        assert_eq!(bytes.len(), 5);
        let mut reader = WireReader::new(&bytes, ByteOrder::Big);
        assert_eq!(reader.read_int(true).unwrap(), value);
    }
}

#[test]
fn test_long_boundaries() {
    for value in [0i64, -1, 1, i64::MIN, i64::MAX, 104_857_600] {
        let bytes = big(|w| w.write_long(value, true));
        assert_eq!(bytes.len(), 9);
        let mut reader = WireReader::new(&bytes, ByteOrder::Big);
        assert_eq!(reader.read_long(true).unwrap(), value);
    }
}

#[test]
fn test_float_and_double() {
    for value in [0.0f32, -1.5, f32::MIN, f32::MAX, f32::EPSILON] {
        let bytes = big(|w| w.write_float(value, true));
        let mut reader = WireReader::new(&bytes, ByteOrder::Big);
        assert_eq!(reader.read_float(true).unwrap(), value);
    }

    for value in [0.0f64, -1.5, f64::MIN, f64::MAX, std::f64::consts::PI] {
        let bytes = big(|w| w.write_double(value, true));
        let mut reader = WireReader::new(&bytes, ByteOrder::Big);
        assert_eq!(reader.read_double(true).unwrap(), value);
    }
}

#[test]
fn test_string_round_trip() {
    for value in ["", "a", "ActiveMQ", "caf\u{e9}"] {
        let bytes = big(|w| w.write_string(value, true).unwrap());
        assert_eq!(bytes.len(), 3 + value.chars().count());

        let mut reader = WireReader::new(&bytes, ByteOrder::Big);
        assert_eq!(reader.read_string(true).unwrap(), value);
        assert!(reader.is_empty());
    }
}

#[test]
fn test_string_max_length() {
    let value = "x".repeat(MAX_STRING_LEN);
    let bytes = big(|w| w.write_string(&value, false).unwrap());
    assert_eq!(&bytes[..2], &[0xff, 0xff]);

    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    assert_eq!(reader.read_string(false).unwrap(), value);
}

#[test]
fn test_raw_is_untagged() {
    let bytes = big(|w| w.write_raw(b"ActiveMQ"));
    assert_eq!(bytes, b"ActiveMQ".to_vec());

    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    assert_eq!(reader.read_raw(8).unwrap(), b"ActiveMQ");
}

// =============================================================================
// Byte Order Tests
// =============================================================================

#[test]
fn test_big_endian_layout() {
    let bytes = big(|w| w.write_int(0x0102_0304, false));
    assert_eq!(bytes, vec![0x01, 0x02, 0x03, 0x04]);
}

#[test]
fn test_little_endian_layout() {
    let bytes = write_with(ByteOrder::Little, |w| {
        w.write_int(0x0102_0304, false);
        w.write_string("ab", false).unwrap();
    });
    assert_eq!(bytes, vec![0x04, 0x03, 0x02, 0x01, 0x02, 0x00, b'a', b'b']);

    let mut reader = WireReader::new(&bytes, ByteOrder::Little);
    assert_eq!(reader.read_int(false).unwrap(), 0x0102_0304);
    assert_eq!(reader.read_string(false).unwrap(), "ab");
}

#[test]
fn test_finish_prefixed() {
    let mut writer = WireWriter::new(ByteOrder::Big);
    writer.write_bool(true, true);
    let bytes = writer.finish_prefixed().unwrap();
    assert_eq!(bytes.as_ref(), &[0x00, 0x00, 0x00, 0x02, 0x01, 0x01]);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_int_read_as_short_is_type_mismatch() {
    let bytes = big(|w| w.write_int(7, true));
    let mut reader = WireReader::new(&bytes, ByteOrder::Big);

    match reader.read_short(true) {
        Err(WireError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, WireType::Short.tag());
            assert_eq!(actual, WireType::Int.tag());
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }

    // The tag is not consumed on mismatch
    assert_eq!(reader.position(), 0);
}

#[test]
fn test_short_buffer_is_length_mismatch() {
    let bytes = [0x05, 0x00, 0x00];
    let mut reader = WireReader::new(&bytes, ByteOrder::Big);

    match reader.read_int(true) {
        Err(WireError::LengthMismatch { expected, actual }) => {
            assert_eq!(expected, 4);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected LengthMismatch, got {:?}", other),
    }
}

#[test]
fn test_string_declared_length_exceeds_buffer() {
    let bytes = [0x00, 0x10, b'a', b'b'];
    let mut reader = WireReader::new(&bytes, ByteOrder::Big);
    assert!(matches!(
        reader.read_string(false),
        Err(WireError::LengthMismatch { expected: 16, actual: 2 })
    ));
}

#[test]
fn test_wide_string_rejected() {
    let mut writer = WireWriter::new(ByteOrder::Big);
    let result = writer.write_string("\u{263a}", true);
    assert!(matches!(result, Err(WireError::Range { wire_type: WireType::String, .. })));
    assert!(writer.is_empty(), "nothing written on failure");
}

#[test]
fn test_overlong_string_rejected() {
    let value = "x".repeat(MAX_STRING_LEN + 1);
    let mut writer = WireWriter::new(ByteOrder::Big);
    assert!(matches!(
        writer.write_string(&value, false),
        Err(WireError::Range { .. })
    ));
}

#[test]
fn test_peek_tag_does_not_consume() {
    let bytes = big(|w| w.write_long(5, true));
    let reader = WireReader::new(&bytes, ByteOrder::Big);
    assert_eq!(reader.peek_tag().unwrap(), 0x06);
    assert_eq!(reader.remaining(), 9);
}

// =============================================================================
// Value Coercion Tests
// =============================================================================

#[test]
fn test_coerce_in_range() {
    let value = WireValue::Int(200);
    assert_eq!(value.coerce(WireType::Byte).unwrap().into_owned(), WireValue::Byte(200));
    assert_eq!(value.coerce(WireType::Long).unwrap().into_owned(), WireValue::Long(200));
    assert_eq!(
        WireValue::Double(-3.0).coerce(WireType::Short).unwrap().into_owned(),
        WireValue::Short(-3)
    );
    assert_eq!(
        WireValue::from("x").coerce(WireType::Char).unwrap().into_owned(),
        WireValue::Char(0x78)
    );
}

#[test]
fn test_coerce_out_of_range() {
    assert!(matches!(
        WireValue::Int(256).coerce(WireType::Byte),
        Err(WireError::Range { wire_type: WireType::Byte, .. })
    ));
    assert!(matches!(
        WireValue::Int(-1).coerce(WireType::Byte),
        Err(WireError::Range { .. })
    ));
    assert!(matches!(
        WireValue::Int(32768).coerce(WireType::Short),
        Err(WireError::Range { wire_type: WireType::Short, .. })
    ));
    assert!(matches!(
        WireValue::Double(1.5).coerce(WireType::Short),
        Err(WireError::Range { .. })
    ));
    assert!(matches!(
        WireValue::from("ab").coerce(WireType::Char),
        Err(WireError::Range { .. })
    ));
}

#[test]
fn test_coerce_incompatible_type() {
    assert!(matches!(
        WireValue::Bool(true).coerce(WireType::Int),
        Err(WireError::TypeMismatch { expected: 0x05, actual: 0x01 })
    ));
    assert!(matches!(
        WireValue::from("12").coerce(WireType::Int),
        Err(WireError::TypeMismatch { .. })
    ));
}
