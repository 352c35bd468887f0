//! Value types.
//!
//! - [`Value`] - one wire-representable datum
//! - [`ValueKind`] - the variant of a value, without payload
//! - [`Array`] - homogeneous sequence
//! - [`Described`] - descriptor plus value
//! - [`Timestamp`], [`Symbol`] - scalar newtypes

mod array;
mod scalar;
mod value;

pub use array::Array;
pub use scalar::{Symbol, Timestamp};
pub use value::{Described, Value, ValueKind};
