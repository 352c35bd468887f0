//! Homogeneous arrays.
//!
//! An AMQP array writes one element constructor shared by every element,
//! so all elements must be of the same [`ValueKind`]. [`Array`] checks
//! this when it is built and remembers the kind even when empty.

use super::value::{Value, ValueKind};
use crate::error::{CodecError, Result};

/// Sequence of values of a single kind.
///
/// # Example
///
/// ```
/// use amqp_types::{Array, Value, ValueKind};
///
/// let array = Array::from_values(vec![Value::Int(1), Value::Int(2)]).unwrap();
/// assert_eq!(array.kind(), ValueKind::Int);
///
/// assert!(Array::from_values(vec![Value::Int(1), Value::Long(2)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    kind: ValueKind,
    elements: Vec<Value>,
}

impl Array {
    /// Create an array of `kind` holding `elements`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `kind` is `Described` or an element is of
    /// another kind.
    pub fn new(kind: ValueKind, elements: Vec<Value>) -> Result<Self> {
        if kind == ValueKind::Described {
            return Err(CodecError::InvalidValue(
                "described values cannot be array elements".to_string(),
            ));
        }

        if let Some((index, other)) = elements
            .iter()
            .enumerate()
            .find(|(_, v)| v.kind() != kind)
        {
            return Err(CodecError::InvalidValue(format!(
                "array of {} has {} element at index {}",
                kind,
                other.kind(),
                index
            )));
        }

        Ok(Self { kind, elements })
    }

    /// Create an array whose kind is taken from the first element.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `elements` is empty or not homogeneous.
    pub fn from_values(elements: Vec<Value>) -> Result<Self> {
        let kind = elements.first().map(Value::kind).ok_or_else(|| {
            CodecError::InvalidValue("cannot infer the kind of an empty array".to_string())
        })?;
        Self::new(kind, elements)
    }

    /// Create an empty array of `kind`.
    pub fn empty(kind: ValueKind) -> Result<Self> {
        Self::new(kind, Vec::new())
    }

    /// Decoder-side constructor; elements come from a single constructor.
    pub(crate) fn from_decoded(kind: ValueKind, elements: Vec<Value>) -> Self {
        debug_assert!(elements.iter().all(|v| v.kind() == kind));
        Self { kind, elements }
    }

    /// The shared element kind.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The elements in order.
    #[inline]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the array has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consume the array, returning its elements.
    pub fn into_elements(self) -> Vec<Value> {
        self.elements
    }
}
