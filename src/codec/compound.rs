//! Compound values (list, map, array) and described values.
//!
//! Compound layout:
//! ```text
//! ┌──────┬──────────┬───────────┬──────────────────────────┐
//! │ Code │ Size     │ Count     │ Elements                 │
//! │ 1    │ 1|4 bytes│ 1|4 bytes │ size - width(count) bytes│
//! └──────┴──────────┴───────────┴──────────────────────────┘
//! ```
//!
//! `size` covers every byte after the size field. A map's count is twice
//! its entry count. An array writes one element constructor after the
//! count and then only the payload of each element. The empty list has
//! its own code (`list0`) with no size or count.
//!
//! Described values are `[0x00][descriptor][value]`; the underlying value's
//! own encoding determines where it ends.

use bytes::BufMut;

use super::format_code::*;
use super::primitive::{self, unexpected_code};
use super::reader::Reader;
use super::registry::FormatRegistry;
use super::variable::{self, prefix_width, put_prefix};
use crate::error::{CodecError, Result};
use crate::types::{Array, Described, Value, ValueKind};

/// Check if a compound with `count` elements and `body` element bytes
/// fits the 8-bit size and count form.
#[inline]
fn fits_narrow(count: usize, body: usize) -> bool {
    count <= NARROW_MAX && 1 + body <= NARROW_MAX
}

fn list_body(items: &[Value]) -> usize {
    items.iter().map(Value::encoded_size).sum()
}

fn map_body(entries: &[(Value, Value)]) -> usize {
    entries
        .iter()
        .map(|(k, v)| k.encoded_size() + v.encoded_size())
        .sum()
}

/// Element constructor byte plus the payload of every element.
fn array_body(elem_code: u8, elements: &[Value]) -> usize {
    1 + elements
        .iter()
        .map(|e| e.payload_size(elem_code))
        .sum::<usize>()
}

/// Narrowest standalone code for a list, with its payload size.
pub(crate) fn list_layout(items: &[Value]) -> (u8, usize) {
    if items.is_empty() {
        return (LIST0, 0);
    }
    let body = list_body(items);
    if fits_narrow(items.len(), body) {
        (LIST8, 2 + body)
    } else {
        (LIST32, 8 + body)
    }
}

pub(crate) fn map_layout(entries: &[(Value, Value)]) -> (u8, usize) {
    let body = map_body(entries);
    if fits_narrow(entries.len() * 2, body) {
        (MAP8, 2 + body)
    } else {
        (MAP32, 8 + body)
    }
}

pub(crate) fn array_layout(array: &Array) -> (u8, usize) {
    let elem_code = element_code(array);
    let body = array_body(elem_code, array.elements());
    if fits_narrow(array.len(), body) {
        (ARRAY8, 2 + body)
    } else {
        (ARRAY32, 8 + body)
    }
}

pub(crate) fn described_layout(described: &Described) -> (u8, usize) {
    (
        DESCRIBED,
        described.descriptor().encoded_size() + described.value().encoded_size(),
    )
}

/// Payload size of a list written with an explicit `code`.
pub(crate) fn list_payload_size(code: u8, items: &[Value]) -> usize {
    if code == LIST0 {
        0
    } else {
        2 * prefix_width(code) + list_body(items)
    }
}

pub(crate) fn map_payload_size(code: u8, entries: &[(Value, Value)]) -> usize {
    2 * prefix_width(code) + map_body(entries)
}

pub(crate) fn array_payload_size(code: u8, array: &Array) -> usize {
    let elem_code = element_code(array);
    2 * prefix_width(code) + array_body(elem_code, array.elements())
}

/// Shared constructor for the elements of `array`.
///
/// Picks the narrowest code valid for every element; see the crate's
/// array rules for each kind.
pub(crate) fn element_code(array: &Array) -> u8 {
    let elements = array.elements();
    if let Some(code) = primitive::array_element_code(array.kind(), elements) {
        return code;
    }

    let all_narrow = |narrow: fn(&Value) -> bool| elements.iter().all(narrow);

    if let Some((narrow, wide)) = variable::codes_for(array.kind()) {
        let fits =
            all_narrow(|v| variable::payload_bytes(v).map_or(false, |b| b.len() <= NARROW_MAX));
        return if fits { narrow } else { wide };
    }

    match array.kind() {
        ValueKind::List => {
            let fits = all_narrow(|v| match v {
                Value::List(items) => fits_narrow(items.len(), list_body(items)),
                _ => false,
            });
            if fits {
                LIST8
            } else {
                LIST32
            }
        }
        ValueKind::Map => {
            let fits = all_narrow(|v| match v {
                Value::Map(entries) => fits_narrow(entries.len() * 2, map_body(entries)),
                _ => false,
            });
            if fits {
                MAP8
            } else {
                MAP32
            }
        }
        ValueKind::Array => {
            let fits = all_narrow(|v| match v {
                Value::Array(inner) => {
                    fits_narrow(inner.len(), array_body(element_code(inner), inner.elements()))
                }
                _ => false,
            });
            if fits {
                ARRAY8
            } else {
                ARRAY32
            }
        }
        // Array::new rejects described elements and every other kind is
        // handled above.
        _ => unreachable!("no array constructor for {}", array.kind()),
    }
}

pub(crate) fn write_list<B: BufMut>(code: u8, items: &[Value], buf: &mut B) {
    if code == LIST0 {
        return;
    }
    let width = prefix_width(code);
    put_prefix(buf, code, width + list_body(items));
    put_prefix(buf, code, items.len());
    for item in items {
        item.write_to(buf);
    }
}

pub(crate) fn write_map<B: BufMut>(code: u8, entries: &[(Value, Value)], buf: &mut B) {
    let width = prefix_width(code);
    put_prefix(buf, code, width + map_body(entries));
    put_prefix(buf, code, entries.len() * 2);
    for (key, value) in entries {
        key.write_to(buf);
        value.write_to(buf);
    }
}

pub(crate) fn write_array<B: BufMut>(code: u8, array: &Array, buf: &mut B) {
    let elem_code = element_code(array);
    let width = prefix_width(code);
    put_prefix(buf, code, width + array_body(elem_code, array.elements()));
    put_prefix(buf, code, array.len());
    buf.put_u8(elem_code);
    for element in array.elements() {
        element.write_payload(elem_code, buf);
    }
}

pub(crate) fn write_described<B: BufMut>(described: &Described, buf: &mut B) {
    described.descriptor().write_to(buf);
    described.value().write_to(buf);
}

/// Read the size of a list8/32, map8/32 or array8/32 and run `f` over
/// exactly that many bytes with the element count as argument.
fn read_compound<T>(
    r: &mut Reader<'_>,
    code: u8,
    f: impl FnOnce(&mut Reader<'_>, usize) -> Result<T>,
) -> Result<T> {
    let narrow = is_narrow(code);
    let size = r.read_length(narrow)?;
    r.check_value_len(size)?;

    r.enter()?;
    let result = r.with_span(size, |r| {
        let count = r.read_length(narrow)?;
        r.check_element_count(count)?;
        r.reserve_elements(count)?;
        f(r, count)
    });
    r.leave();
    result
}

fn decode_list(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    match code {
        LIST0 => Ok(Value::List(Vec::new())),
        LIST8 | LIST32 => read_compound(r, code, |r, count| {
            let mut items = Vec::with_capacity(count.min(r.remaining()));
            for _ in 0..count {
                items.push(r.decode_value()?);
            }
            Ok(Value::List(items))
        }),
        _ => Err(unexpected_code(code, ValueKind::List)),
    }
}

fn decode_map(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    if !matches!(code, MAP8 | MAP32) {
        return Err(unexpected_code(code, ValueKind::Map));
    }
    read_compound(r, code, |r, count| {
        if count % 2 != 0 {
            return Err(CodecError::MalformedData(format!(
                "map has odd element count {}",
                count
            )));
        }
        let mut entries = Vec::with_capacity((count / 2).min(r.remaining()));
        for _ in 0..count / 2 {
            let key = r.decode_value()?;
            let value = r.decode_value()?;
            entries.push((key, value));
        }
        Ok(Value::Map(entries))
    })
}

fn decode_array(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    if !matches!(code, ARRAY8 | ARRAY32) {
        return Err(unexpected_code(code, ValueKind::Array));
    }
    read_compound(r, code, |r, count| {
        let elem_code = r.read_u8()?;
        if elem_code == DESCRIBED {
            return Err(CodecError::MalformedData(
                "described array elements are not supported".to_string(),
            ));
        }
        let entry = r.lookup(elem_code)?;
        if entry.kind == ValueKind::Described {
            return Err(CodecError::MalformedData(format!(
                "element constructor 0x{:02x} decodes described values",
                elem_code
            )));
        }

        let mut elements = Vec::with_capacity(count.min(r.remaining()));
        for _ in 0..count {
            let element = (entry.constructor)(r, elem_code)?;
            if element.kind() != entry.kind {
                return Err(CodecError::MalformedData(format!(
                    "element constructor 0x{:02x} registered as {} produced {}",
                    elem_code,
                    entry.kind,
                    element.kind()
                )));
            }
            elements.push(element);
        }
        Ok(Value::Array(Array::from_decoded(entry.kind, elements)))
    })
}

fn decode_described(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    if code != DESCRIBED {
        return Err(unexpected_code(code, ValueKind::Described));
    }
    r.enter()?;
    let result = r.decode_value().and_then(|descriptor| {
        let value = r.decode_value()?;
        Ok(Value::Described(Described::new(descriptor, value)))
    });
    r.leave();
    result
}

pub(crate) fn register(registry: &mut FormatRegistry) {
    registry.register(LIST0, ValueKind::List, decode_list);
    registry.register(LIST8, ValueKind::List, decode_list);
    registry.register(LIST32, ValueKind::List, decode_list);
    registry.register(MAP8, ValueKind::Map, decode_map);
    registry.register(MAP32, ValueKind::Map, decode_map);
    registry.register(ARRAY8, ValueKind::Array, decode_array);
    registry.register(ARRAY32, ValueKind::Array, decode_array);
    registry.register(DESCRIBED, ValueKind::Described, decode_described);
}
