//! AMQP 1.0 format codes.
//!
//! Every encoded value starts with one of these bytes:
//! ```text
//! ┌─────────────┬──────────────────┬─────────────┐
//! │ Format code │ Size/count/length│ Payload     │
//! │ 1 byte      │ 0, 1 or 4 bytes  │ N bytes     │
//! └─────────────┴──────────────────┴─────────────┘
//! ```
//!
//! The high nibble encodes the width category:
//! `0x4_` no payload, `0x5_` 1 byte, `0x6_` 2, `0x7_` 4, `0x8_` 8,
//! `0x9_` 16, `0xa_`/`0xb_` variable (1/4-byte length),
//! `0xc_`/`0xd_` compound (1/4-byte size and count),
//! `0xe_`/`0xf_` array (1/4-byte size and count).

/// Constructor prefix of a described value.
pub const DESCRIBED: u8 = 0x00;

/// Null value, no payload.
pub const NULL: u8 = 0x40;
/// Boolean `true`, no payload.
pub const BOOLEAN_TRUE: u8 = 0x41;
/// Boolean `false`, no payload.
pub const BOOLEAN_FALSE: u8 = 0x42;
/// The uint `0`, no payload.
pub const UINT0: u8 = 0x43;
/// The ulong `0`, no payload.
pub const ULONG0: u8 = 0x44;
/// Empty list, no payload.
pub const LIST0: u8 = 0x45;

/// Unsigned 8-bit integer.
pub const UBYTE: u8 = 0x50;
/// Signed 8-bit integer.
pub const BYTE: u8 = 0x51;
/// uint in 0..=255, 1-byte payload.
pub const SMALL_UINT: u8 = 0x52;
/// ulong in 0..=255, 1-byte payload.
pub const SMALL_ULONG: u8 = 0x53;
/// int in -128..=127, 1-byte payload.
pub const SMALL_INT: u8 = 0x54;
/// long in -128..=127, 1-byte payload.
pub const SMALL_LONG: u8 = 0x55;
/// Boolean with a 1-byte payload (0x00 false, 0x01 true).
pub const BOOLEAN: u8 = 0x56;

/// Unsigned 16-bit integer.
pub const USHORT: u8 = 0x60;
/// Signed 16-bit integer.
pub const SHORT: u8 = 0x61;

/// Unsigned 32-bit integer.
pub const UINT: u8 = 0x70;
/// Signed 32-bit integer.
pub const INT: u8 = 0x71;
/// IEEE-754 binary32.
pub const FLOAT: u8 = 0x72;
/// UTF-32BE code point.
pub const CHAR: u8 = 0x73;

/// Unsigned 64-bit integer.
pub const ULONG: u8 = 0x80;
/// Signed 64-bit integer.
pub const LONG: u8 = 0x81;
/// IEEE-754 binary64.
pub const DOUBLE: u8 = 0x82;
/// Signed milliseconds since the Unix epoch.
pub const TIMESTAMP: u8 = 0x83;

/// 16-byte UUID.
pub const UUID: u8 = 0x98;

/// Binary, 1-byte length.
pub const VBIN8: u8 = 0xa0;
/// UTF-8 string, 1-byte length.
pub const STR8: u8 = 0xa1;
/// Symbol, 1-byte length.
pub const SYM8: u8 = 0xa3;
/// Binary, 4-byte length.
pub const VBIN32: u8 = 0xb0;
/// UTF-8 string, 4-byte length.
pub const STR32: u8 = 0xb1;
/// Symbol, 4-byte length.
pub const SYM32: u8 = 0xb3;

/// List with 1-byte size and count.
pub const LIST8: u8 = 0xc0;
/// Map with 1-byte size and count.
pub const MAP8: u8 = 0xc1;
/// List with 4-byte size and count.
pub const LIST32: u8 = 0xd0;
/// Map with 4-byte size and count.
pub const MAP32: u8 = 0xd1;

/// Array with 1-byte size and count.
pub const ARRAY8: u8 = 0xe0;
/// Array with 4-byte size and count.
pub const ARRAY32: u8 = 0xf0;

/// Largest length, size or count that fits the 8-bit prefix forms.
pub const NARROW_MAX: usize = u8::MAX as usize;

/// Check if a code uses 1-byte length/size/count prefixes.
///
/// Only meaningful for variable-width and compound codes.
#[inline]
pub fn is_narrow(code: u8) -> bool {
    matches!(code & 0xf0, 0xa0 | 0xc0 | 0xe0)
}

/// Human-readable name of a format code, for diagnostics.
pub fn name(code: u8) -> Option<&'static str> {
    let name = match code {
        DESCRIBED => "described",
        NULL => "null",
        BOOLEAN_TRUE => "true",
        BOOLEAN_FALSE => "false",
        UINT0 => "uint0",
        ULONG0 => "ulong0",
        LIST0 => "list0",
        UBYTE => "ubyte",
        BYTE => "byte",
        SMALL_UINT => "smalluint",
        SMALL_ULONG => "smallulong",
        SMALL_INT => "smallint",
        SMALL_LONG => "smalllong",
        BOOLEAN => "boolean",
        USHORT => "ushort",
        SHORT => "short",
        UINT => "uint",
        INT => "int",
        FLOAT => "float",
        CHAR => "char",
        ULONG => "ulong",
        LONG => "long",
        DOUBLE => "double",
        TIMESTAMP => "timestamp",
        UUID => "uuid",
        VBIN8 => "vbin8",
        STR8 => "str8-utf8",
        SYM8 => "sym8",
        VBIN32 => "vbin32",
        STR32 => "str32-utf8",
        SYM32 => "sym32",
        LIST8 => "list8",
        MAP8 => "map8",
        LIST32 => "list32",
        MAP32 => "map32",
        ARRAY8 => "array8",
        ARRAY32 => "array32",
        _ => return None,
    };
    Some(name)
}
