//! Integration tests for amqp-types.
//!
//! These tests exercise the public API the way a frame-assembly layer
//! uses it: size, encode into a shared buffer, decode back.

use amqp_types::codec::format_code;
use amqp_types::{
    decode, encode, encode_to_vec, encoded_size, Array, CodecError, Decoder, DecoderConfig,
    Described, Symbol, Timestamp, Value, ValueKind,
};
use uuid::Uuid;

/// One value of every variant.
fn every_variant() -> Vec<Value> {
    vec![
        Value::Null,
        Value::Boolean(true),
        Value::Boolean(false),
        Value::UByte(0xab),
        Value::UShort(0xbeef),
        Value::UInt(300),
        Value::ULong(1 << 40),
        Value::Byte(-3),
        Value::Short(-300),
        Value::Int(-1_000_000),
        Value::Long(i64::MAX),
        Value::Float(1.5),
        Value::Double(std::f64::consts::PI),
        Value::Char('λ'),
        Value::Timestamp(Timestamp::from_millis(1_700_000_000_000)),
        Value::Uuid(Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef)),
        Value::Binary(vec![0, 1, 2, 3]),
        Value::from("hello"),
        Value::Symbol(Symbol::from("amqp:accepted:list")),
        Value::List(vec![Value::UInt(1), Value::from("two")]),
        Value::Map(vec![(Value::Symbol(Symbol::from("key")), Value::Long(-7))]),
        Value::Array(Array::from_values(vec![Value::Int(1), Value::Int(1000)]).unwrap()),
        Value::Described(Described::new(Value::ULong(0x24), Value::List(vec![]))),
    ]
}

/// Test round-trip and size fidelity for every variant.
#[test]
fn test_every_variant_roundtrip() {
    for value in every_variant() {
        let size = encoded_size(&value);
        let mut buf = vec![0u8; size];

        let written = encode(&value, &mut buf, 0, size).unwrap();
        assert_eq!(written, size, "size fidelity for {:?}", value);

        let (decoded, consumed) = decode(&buf, 0).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(consumed, size);
    }
}

/// Test multiple values encoded back to back into one buffer.
#[test]
fn test_sequence_in_shared_buffer() {
    let values = every_variant();
    let total: usize = values.iter().map(Value::encoded_size).sum();
    let mut buf = vec![0u8; total];

    let mut offset = 0;
    for value in &values {
        offset += encode(value, &mut buf, offset, total).unwrap();
    }
    assert_eq!(offset, total);

    // Walk the buffer with the returned consumed counts
    let mut offset = 0;
    let mut decoded = Vec::new();
    while offset < buf.len() {
        let (value, consumed) = decode(&buf, offset).unwrap();
        decoded.push(value);
        offset += consumed;
    }
    assert_eq!(decoded, values);
    assert_eq!(Decoder::new().decode_all(&buf).unwrap(), values);
}

/// Test that a failed encode leaves the target region unchanged.
#[test]
fn test_capacity_atomicity() {
    let value = Value::Map(vec![
        (Value::from("a"), Value::Binary(vec![7; 40])),
        (Value::from("b"), Value::UInt(300)),
    ]);
    let size = value.encoded_size();
    let mut buf = vec![0x5A; size + 8];

    for capacity in 8..size + 7 {
        let err = encode(&value, &mut buf, 8, capacity).unwrap_err();
        assert!(matches!(err, CodecError::InsufficientCapacity { .. }));
        assert!(buf.iter().all(|&b| b == 0x5A));
    }

    assert_eq!(encode(&value, &mut buf, 8, size + 8).unwrap(), size);
}

/// Test narrow-form preference for unsigned integers.
#[test]
fn test_uint_narrow_form_preference() {
    assert_eq!(encode_to_vec(&Value::UInt(0)).unwrap(), vec![format_code::UINT0]);
    assert_eq!(encoded_size(&Value::UInt(0)), 1);

    let wide = encode_to_vec(&Value::UInt(300)).unwrap();
    assert_eq!(wide, vec![format_code::UINT, 0x00, 0x00, 0x01, 0x2c]);
}

/// Test that a list count disagreeing with its span is rejected.
#[test]
fn test_list_count_disagrees_with_span() {
    // Declares 3 elements, span holds 2
    let err = decode(&[0xc0, 0x03, 0x03, 0x41, 0x41], 0).unwrap_err();
    assert!(matches!(err, CodecError::MalformedData(_)));

    // Declares 1 element, span holds 2
    let err = decode(&[0xc0, 0x03, 0x01, 0x41, 0x41], 0).unwrap_err();
    assert!(matches!(err, CodecError::MalformedData(_)));
}

/// Scenario: Boolean(true) is a single byte.
#[test]
fn test_boolean_true_single_byte() {
    let bytes = encode_to_vec(&Value::Boolean(true)).unwrap();
    assert_eq!(bytes, vec![0x41]);
    assert_eq!(decode(&bytes, 0).unwrap(), (Value::Boolean(true), 1));
}

/// Scenario: String("hi") is code, 1-byte length, then the bytes.
#[test]
fn test_short_string_layout() {
    let bytes = encode_to_vec(&Value::from("hi")).unwrap();
    assert_eq!(bytes, vec![format_code::STR8, 0x02, b'h', b'i']);
    assert_eq!(decode(&bytes, 0).unwrap().0.as_str(), Some("hi"));
}

/// Scenario: List([true, 5]) uses the 8-bit list form.
#[test]
fn test_small_list_layout() {
    let value = Value::List(vec![Value::Boolean(true), Value::Int(5)]);
    let bytes = encode_to_vec(&value).unwrap();

    assert_eq!(bytes, vec![format_code::LIST8, 0x04, 0x02, 0x41, 0x54, 0x05]);
    assert_eq!(decode(&bytes, 0).unwrap(), (value, 6));
}

/// Scenario: unregistered leading byte.
#[test]
fn test_unregistered_code() {
    for code in [0x01, 0x74, 0x84, 0x94, 0xff] {
        assert_eq!(
            decode(&[code, 0, 0, 0, 0], 0).unwrap_err(),
            CodecError::UnknownFormatCode(code)
        );
    }
}

/// Scenario: string length beyond the buffer.
#[test]
fn test_string_length_overruns_buffer() {
    let err = decode(&[format_code::STR8, 0x0a, b'h', b'i'], 0).unwrap_err();
    assert!(matches!(err, CodecError::MalformedData(_)));
}

/// Test that an empty buffer and an offset at the end are errors.
#[test]
fn test_no_value_at_offset() {
    assert!(matches!(decode(&[], 0).unwrap_err(), CodecError::MalformedData(_)));
    assert!(matches!(decode(&[0x40, 0x40], 2).unwrap_err(), CodecError::MalformedData(_)));
}

/// Test that clones are independent of the original.
#[test]
fn test_clone_is_independent() {
    let original = Value::List(vec![Value::from("shared"), Value::Binary(vec![1, 2])]);
    let mut copy = original.clone();

    if let Value::List(items) = &mut copy {
        items.push(Value::Null);
        items[0] = Value::from("changed");
    }

    assert_eq!(original, Value::List(vec![Value::from("shared"), Value::Binary(vec![1, 2])]));
    assert_ne!(original, copy);
}

/// Test a message-properties-like structure.
#[test]
fn test_nested_described_structure() {
    let properties = Value::Described(Described::new(
        Value::ULong(0x73),
        Value::List(vec![
            Value::Binary(b"message-1".to_vec()),
            Value::Null,
            Value::from("queue://orders"),
            Value::Symbol(Symbol::from("application/json")),
            Value::Timestamp(Timestamp::from_millis(1_700_000_000_000)),
        ]),
    ));
    let annotations = Value::Map(vec![(
        Value::Symbol(Symbol::from("x-opt-tags")),
        Value::Array(
            Array::new(
                ValueKind::Symbol,
                vec![Value::Symbol(Symbol::from("a")), Value::Symbol(Symbol::from("b"))],
            )
            .unwrap(),
        ),
    )]);

    for value in [properties, annotations] {
        let bytes = encode_to_vec(&value).unwrap();
        assert_eq!(decode(&bytes, 0).unwrap(), (value.clone(), bytes.len()));
    }
}

/// Test that large compounds switch to the 32-bit forms.
#[test]
fn test_large_list_uses_wide_form() {
    let value = Value::List((0..300).map(Value::UInt).collect());
    let bytes = encode_to_vec(&value).unwrap();

    assert_eq!(bytes[0], format_code::LIST32);
    assert_eq!(&bytes[5..9], &300u32.to_be_bytes());
    assert_eq!(decode(&bytes, 0).unwrap(), (value, bytes.len()));
}

/// Test decoding limits from a configuration document.
#[test]
fn test_limits_from_config() {
    let config: DecoderConfig = serde_json::from_str(r#"{ "max_depth": 2 }"#).unwrap();
    let decoder = Decoder::new().with_config(config);

    let shallow = Value::List(vec![Value::List(vec![Value::Null])]);
    let deep = Value::List(vec![Value::List(vec![Value::List(vec![Value::Null])])]);

    assert!(decoder.decode(&encode_to_vec(&shallow).unwrap(), 0).is_ok());
    let err = decoder.decode(&encode_to_vec(&deep).unwrap(), 0).unwrap_err();
    assert!(matches!(err, CodecError::LimitExceeded(_)));
}

/// Test that a tiny array of zero-width elements cannot expand unbounded.
#[test]
fn test_zero_width_array_hits_element_budget() {
    let bytes = [0xf0, 0x00, 0x00, 0x00, 0x05, 0x01, 0x00, 0x00, 0x00, 0x40];
    let err = decode(&bytes, 0).unwrap_err();
    assert!(matches!(err, CodecError::LimitExceeded(_)));

    // Same shape within the budget decodes normally
    let small = [0xe0, 0x02, 0x03, 0x40];
    let (value, consumed) = decode(&small, 0).unwrap();
    assert_eq!(consumed, 4);
    assert_eq!(value.as_array().map(Array::len), Some(3));
}
