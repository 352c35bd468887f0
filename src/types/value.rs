//! The [`Value`] enum and its kinds.
//!
//! A `Value` is one wire-representable datum. Every variant owns its
//! payload, so a derived `clone()` is a fully independent copy.

use std::fmt;

use uuid::Uuid;

use super::array::Array;
use super::scalar::{Symbol, Timestamp};

/// One AMQP value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// Unsigned 8-bit integer.
    UByte(u8),
    /// Unsigned 16-bit integer.
    UShort(u16),
    /// Unsigned 32-bit integer.
    UInt(u32),
    /// Unsigned 64-bit integer.
    ULong(u64),
    /// Signed 8-bit integer.
    Byte(i8),
    /// Signed 16-bit integer.
    Short(i16),
    /// Signed 32-bit integer.
    Int(i32),
    /// Signed 64-bit integer.
    Long(i64),
    /// IEEE-754 single precision.
    Float(f32),
    /// IEEE-754 double precision.
    Double(f64),
    /// Unicode scalar value (UTF-32 on the wire).
    Char(char),
    /// Milliseconds since the Unix epoch.
    Timestamp(Timestamp),
    /// RFC-4122 UUID.
    Uuid(Uuid),
    /// Opaque bytes.
    Binary(Vec<u8>),
    /// UTF-8 text.
    String(String),
    /// Symbolic identifier.
    Symbol(Symbol),
    /// Ordered, heterogeneous sequence.
    List(Vec<Value>),
    /// Ordered key/value pairs.
    Map(Vec<(Value, Value)>),
    /// Ordered sequence sharing one element kind.
    Array(Array),
    /// Value annotated with a descriptor.
    Described(Described),
}

/// The variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`].
    Null,
    /// [`Value::Boolean`].
    Boolean,
    /// [`Value::UByte`].
    UByte,
    /// [`Value::UShort`].
    UShort,
    /// [`Value::UInt`].
    UInt,
    /// [`Value::ULong`].
    ULong,
    /// [`Value::Byte`].
    Byte,
    /// [`Value::Short`].
    Short,
    /// [`Value::Int`].
    Int,
    /// [`Value::Long`].
    Long,
    /// [`Value::Float`].
    Float,
    /// [`Value::Double`].
    Double,
    /// [`Value::Char`].
    Char,
    /// [`Value::Timestamp`].
    Timestamp,
    /// [`Value::Uuid`].
    Uuid,
    /// [`Value::Binary`].
    Binary,
    /// [`Value::String`].
    String,
    /// [`Value::Symbol`].
    Symbol,
    /// [`Value::List`].
    List,
    /// [`Value::Map`].
    Map,
    /// [`Value::Array`].
    Array,
    /// [`Value::Described`].
    Described,
}

impl ValueKind {
    /// The AMQP type name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::UByte => "ubyte",
            Self::UShort => "ushort",
            Self::UInt => "uint",
            Self::ULong => "ulong",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::Timestamp => "timestamp",
            Self::Uuid => "uuid",
            Self::Binary => "binary",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::List => "list",
            Self::Map => "map",
            Self::Array => "array",
            Self::Described => "described",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A descriptor paired with the value it describes.
///
/// # Example
///
/// ```
/// use amqp_types::{Described, Value};
///
/// let described = Described::new(Value::ULong(0x24), Value::List(vec![]));
/// assert_eq!(described.descriptor().as_ulong(), Some(0x24));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Described {
    descriptor: Box<Value>,
    value: Box<Value>,
}

impl Described {
    /// Create a described value.
    pub fn new(descriptor: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self {
            descriptor: Box::new(descriptor.into()),
            value: Box::new(value.into()),
        }
    }

    /// The descriptor.
    #[inline]
    pub fn descriptor(&self) -> &Value {
        &self.descriptor
    }

    /// The underlying value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Split into `(descriptor, value)`.
    pub fn into_parts(self) -> (Value, Value) {
        (*self.descriptor, *self.value)
    }
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::UByte(_) => ValueKind::UByte,
            Self::UShort(_) => ValueKind::UShort,
            Self::UInt(_) => ValueKind::UInt,
            Self::ULong(_) => ValueKind::ULong,
            Self::Byte(_) => ValueKind::Byte,
            Self::Short(_) => ValueKind::Short,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Char(_) => ValueKind::Char,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::Binary(_) => ValueKind::Binary,
            Self::String(_) => ValueKind::String,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Array(_) => ValueKind::Array,
            Self::Described(_) => ValueKind::Described,
        }
    }

    /// Check if this is `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The payload if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The payload if this is a `UByte`.
    pub fn as_ubyte(&self) -> Option<u8> {
        match self {
            Self::UByte(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `UShort`.
    pub fn as_ushort(&self) -> Option<u16> {
        match self {
            Self::UShort(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `UInt`.
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `ULong`.
    pub fn as_ulong(&self) -> Option<u64> {
        match self {
            Self::ULong(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `Byte`.
    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `Short`.
    pub fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is an `Int`.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `Long`.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `Float`.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `Double`.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `Char`.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `Timestamp`.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload if this is a `Uuid`.
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(v) => Some(v),
            _ => None,
        }
    }

    /// The payload if this is a `Binary`.
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(v) => Some(v),
            _ => None,
        }
    }

    /// Text of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// The payload if this is a `Symbol`.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(v) => Some(v),
            _ => None,
        }
    }

    /// The payload if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// The payload if this is a `Map`.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    /// The payload if this is an `Array`.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// The payload if this is a `Described`.
    pub fn as_described(&self) -> Option<&Described> {
        match self {
            Self::Described(v) => Some(v),
            _ => None,
        }
    }

    /// Look up a map entry by key (linear scan, first match wins).
    pub fn map_get(&self, key: &Value) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Boolean,
    u8 => UByte,
    u16 => UShort,
    u32 => UInt,
    u64 => ULong,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    Timestamp => Timestamp,
    Uuid => Uuid,
    Vec<u8> => Binary,
    String => String,
    Symbol => Symbol,
    Vec<Value> => List,
    Vec<(Value, Value)> => Map,
    Array => Array,
    Described => Described,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Binary(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
