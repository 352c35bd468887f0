//! Fixed-width scalars: null, boolean, integers, float/double, char,
//! timestamp and uuid.
//!
//! The payload width of a fixed-width value is implied by its format code.
//! Multi-width integers pick the narrowest form that holds the value:
//!
//! | value            | uint      | ulong      | int      | long      |
//! |------------------|-----------|------------|----------|-----------|
//! | `0`              | `uint0`   | `ulong0`   | smallint | smalllong |
//! | fits in one byte | smalluint | smallulong | smallint | smalllong |
//! | otherwise        | `uint`    | `ulong`    | `int`    | `long`    |

use bytes::BufMut;
use uuid::Uuid;

use super::format_code::*;
use super::reader::Reader;
use super::registry::FormatRegistry;
use crate::error::{CodecError, Result};
use crate::types::{Timestamp, Value, ValueKind};

/// Payload width implied by a fixed-width format code.
pub(crate) fn fixed_width(code: u8) -> usize {
    match code {
        UBYTE | BYTE | SMALL_UINT | SMALL_ULONG | SMALL_INT | SMALL_LONG | BOOLEAN => 1,
        USHORT | SHORT => 2,
        UINT | INT | FLOAT | CHAR => 4,
        ULONG | LONG | DOUBLE | TIMESTAMP => 8,
        UUID => 16,
        _ => 0,
    }
}

#[inline]
pub(crate) fn uint_code(v: u32) -> u8 {
    match v {
        0 => UINT0,
        1..=0xff => SMALL_UINT,
        _ => UINT,
    }
}

#[inline]
pub(crate) fn ulong_code(v: u64) -> u8 {
    match v {
        0 => ULONG0,
        1..=0xff => SMALL_ULONG,
        _ => ULONG,
    }
}

#[inline]
pub(crate) fn int_code(v: i32) -> u8 {
    if i8::try_from(v).is_ok() {
        SMALL_INT
    } else {
        INT
    }
}

#[inline]
pub(crate) fn long_code(v: i64) -> u8 {
    if i8::try_from(v).is_ok() {
        SMALL_LONG
    } else {
        LONG
    }
}

/// Shared array constructor for fixed-width elements of `kind`.
///
/// Zero-width forms (`uint0`, `true`, ...) depend on the individual value
/// and are never used as array constructors.
pub(crate) fn array_element_code(kind: ValueKind, elements: &[Value]) -> Option<u8> {
    let all_small = |f: fn(&Value) -> bool| elements.iter().all(f);

    let code = match kind {
        ValueKind::Null => NULL,
        ValueKind::Boolean => BOOLEAN,
        ValueKind::UByte => UBYTE,
        ValueKind::UShort => USHORT,
        ValueKind::UInt => {
            if all_small(|v| matches!(v, Value::UInt(0..=0xff))) {
                SMALL_UINT
            } else {
                UINT
            }
        }
        ValueKind::ULong => {
            if all_small(|v| matches!(v, Value::ULong(0..=0xff))) {
                SMALL_ULONG
            } else {
                ULONG
            }
        }
        ValueKind::Byte => BYTE,
        ValueKind::Short => SHORT,
        ValueKind::Int => {
            if all_small(|v| matches!(v, Value::Int(-128..=127))) {
                SMALL_INT
            } else {
                INT
            }
        }
        ValueKind::Long => {
            if all_small(|v| matches!(v, Value::Long(-128..=127))) {
                SMALL_LONG
            } else {
                LONG
            }
        }
        ValueKind::Float => FLOAT,
        ValueKind::Double => DOUBLE,
        ValueKind::Char => CHAR,
        ValueKind::Timestamp => TIMESTAMP,
        ValueKind::Uuid => UUID,
        _ => return None,
    };
    Some(code)
}

/// Write the payload of a fixed-width value in the form chosen by `code`.
///
/// The caller guarantees that `code` is a valid form for `value`.
pub(crate) fn write_payload<B: BufMut>(value: &Value, code: u8, buf: &mut B) {
    match value {
        Value::Null => {}
        Value::Boolean(b) => {
            if code == BOOLEAN {
                buf.put_u8(u8::from(*b));
            }
        }
        Value::UByte(v) => buf.put_u8(*v),
        Value::UShort(v) => buf.put_u16(*v),
        Value::UInt(v) => match code {
            SMALL_UINT => buf.put_u8(*v as u8),
            UINT => buf.put_u32(*v),
            _ => {}
        },
        Value::ULong(v) => match code {
            SMALL_ULONG => buf.put_u8(*v as u8),
            ULONG => buf.put_u64(*v),
            _ => {}
        },
        Value::Byte(v) => buf.put_i8(*v),
        Value::Short(v) => buf.put_i16(*v),
        Value::Int(v) => match code {
            SMALL_INT => buf.put_i8(*v as i8),
            _ => buf.put_i32(*v),
        },
        Value::Long(v) => match code {
            SMALL_LONG => buf.put_i8(*v as i8),
            _ => buf.put_i64(*v),
        },
        Value::Float(v) => buf.put_f32(*v),
        Value::Double(v) => buf.put_f64(*v),
        Value::Char(c) => buf.put_u32(u32::from(*c)),
        Value::Timestamp(ts) => buf.put_i64(ts.as_millis()),
        Value::Uuid(id) => buf.put_slice(id.as_bytes()),
        _ => debug_assert!(false, "{} is not a fixed-width kind", value.kind()),
    }
}

pub(crate) fn unexpected_code(code: u8, kind: ValueKind) -> CodecError {
    CodecError::MalformedData(format!(
        "format code 0x{:02x} is not a {} encoding",
        code, kind
    ))
}

fn decode_null(_: &mut Reader<'_>, _: u8) -> Result<Value> {
    Ok(Value::Null)
}

fn decode_boolean(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    let b = match code {
        BOOLEAN_TRUE => true,
        BOOLEAN_FALSE => false,
        BOOLEAN => match r.read_u8()? {
            0x00 => false,
            0x01 => true,
            other => {
                return Err(CodecError::MalformedData(format!(
                    "boolean payload must be 0x00 or 0x01, got 0x{:02x}",
                    other
                )))
            }
        },
        _ => return Err(unexpected_code(code, ValueKind::Boolean)),
    };
    Ok(Value::Boolean(b))
}

fn decode_ubyte(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    Ok(Value::UByte(r.read_u8()?))
}

fn decode_ushort(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    Ok(Value::UShort(u16::from_be_bytes(r.read_array()?)))
}

fn decode_uint(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    let v = match code {
        UINT0 => 0,
        SMALL_UINT => u32::from(r.read_u8()?),
        UINT => u32::from_be_bytes(r.read_array()?),
        _ => return Err(unexpected_code(code, ValueKind::UInt)),
    };
    Ok(Value::UInt(v))
}

fn decode_ulong(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    let v = match code {
        ULONG0 => 0,
        SMALL_ULONG => u64::from(r.read_u8()?),
        ULONG => u64::from_be_bytes(r.read_array()?),
        _ => return Err(unexpected_code(code, ValueKind::ULong)),
    };
    Ok(Value::ULong(v))
}

fn decode_byte(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    Ok(Value::Byte(i8::from_be_bytes(r.read_array()?)))
}

fn decode_short(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    Ok(Value::Short(i16::from_be_bytes(r.read_array()?)))
}

fn decode_int(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    let v = match code {
        SMALL_INT => i32::from(i8::from_be_bytes(r.read_array()?)),
        INT => i32::from_be_bytes(r.read_array()?),
        _ => return Err(unexpected_code(code, ValueKind::Int)),
    };
    Ok(Value::Int(v))
}

fn decode_long(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    let v = match code {
        SMALL_LONG => i64::from(i8::from_be_bytes(r.read_array()?)),
        LONG => i64::from_be_bytes(r.read_array()?),
        _ => return Err(unexpected_code(code, ValueKind::Long)),
    };
    Ok(Value::Long(v))
}

fn decode_float(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    Ok(Value::Float(f32::from_be_bytes(r.read_array()?)))
}

fn decode_double(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    Ok(Value::Double(f64::from_be_bytes(r.read_array()?)))
}

fn decode_char(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    let point = u32::from_be_bytes(r.read_array()?);
    char::from_u32(point)
        .map(Value::Char)
        .ok_or_else(|| CodecError::MalformedData(format!("invalid char code point 0x{:x}", point)))
}

fn decode_timestamp(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    let millis = i64::from_be_bytes(r.read_array()?);
    Ok(Value::Timestamp(Timestamp::from_millis(millis)))
}

fn decode_uuid(r: &mut Reader<'_>, _: u8) -> Result<Value> {
    Ok(Value::Uuid(Uuid::from_bytes(r.read_array()?)))
}

pub(crate) fn register(registry: &mut FormatRegistry) {
    registry.register(NULL, ValueKind::Null, decode_null);
    registry.register(BOOLEAN, ValueKind::Boolean, decode_boolean);
    registry.register(BOOLEAN_TRUE, ValueKind::Boolean, decode_boolean);
    registry.register(BOOLEAN_FALSE, ValueKind::Boolean, decode_boolean);
    registry.register(UBYTE, ValueKind::UByte, decode_ubyte);
    registry.register(USHORT, ValueKind::UShort, decode_ushort);
    registry.register(UINT, ValueKind::UInt, decode_uint);
    registry.register(SMALL_UINT, ValueKind::UInt, decode_uint);
    registry.register(UINT0, ValueKind::UInt, decode_uint);
    registry.register(ULONG, ValueKind::ULong, decode_ulong);
    registry.register(SMALL_ULONG, ValueKind::ULong, decode_ulong);
    registry.register(ULONG0, ValueKind::ULong, decode_ulong);
    registry.register(BYTE, ValueKind::Byte, decode_byte);
    registry.register(SHORT, ValueKind::Short, decode_short);
    registry.register(INT, ValueKind::Int, decode_int);
    registry.register(SMALL_INT, ValueKind::Int, decode_int);
    registry.register(LONG, ValueKind::Long, decode_long);
    registry.register(SMALL_LONG, ValueKind::Long, decode_long);
    registry.register(FLOAT, ValueKind::Float, decode_float);
    registry.register(DOUBLE, ValueKind::Double, decode_double);
    registry.register(CHAR, ValueKind::Char, decode_char);
    registry.register(TIMESTAMP, ValueKind::Timestamp, decode_timestamp);
    registry.register(UUID, ValueKind::Uuid, decode_uuid);
}
