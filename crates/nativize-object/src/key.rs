//! Hashable projection of foreign values.
//!
//! Sets and dicts index their members by [`ForeignKey`]. The projection
//! follows the foreign runtime's equality rules: booleans, integers and
//! integral floats share one key space (`True == 1 == 1.0`), tuples hash
//! structurally and instances hash by identity. Lists, sets and dicts are
//! mutable and therefore unhashable.

use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::error::ObjectError;
use crate::object::{Object, Repr};

/// Hashable wrapper for set elements and dict keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ForeignKey {
    /// The `None` singleton
    None,
    /// Booleans, both integer tags, and floats with an integral value
    Int(i128),
    /// Non-integral floats (uses OrderedFloat for hashing)
    Float(OrderedFloat<f64>),
    /// Byte string
    Bytes(Box<[u8]>),
    /// Text string, as UTF-16 code units
    Text(Box<[u16]>),
    /// Tuple of hashable members
    Tuple(Box<[ForeignKey]>),
    /// Instance, compared by identity
    Identity(usize),
}

impl ForeignKey {
    /// Project a value onto its key.
    ///
    /// Returns `ObjectError::Unhashable` for lists, sets, dicts and tuples
    /// that contain one of those.
    pub fn of(object: &Object) -> Result<Self, ObjectError> {
        match object.repr() {
            Repr::None => Ok(ForeignKey::None),
            Repr::Bool(b) => Ok(ForeignKey::Int(i128::from(*b))),
            Repr::Int(v) => Ok(ForeignKey::Int(i128::from(*v))),
            Repr::Long(v) => Ok(ForeignKey::Int(*v)),
            Repr::Float(v) => Ok(Self::float(*v)),
            Repr::Bytes(b) => Ok(ForeignKey::Bytes(b.clone())),
            Repr::Text(t) => Ok(ForeignKey::Text(t.clone())),
            Repr::Tuple(items) => items
                .iter()
                .map(ForeignKey::of)
                .collect::<Result<Vec<_>, _>>()
                .map(|keys| ForeignKey::Tuple(keys.into_boxed_slice())),
            Repr::Instance(_) => Ok(ForeignKey::Identity(Rc::as_ptr(object.inner()) as usize)),
            Repr::List(_) | Repr::Set(_) | Repr::Dict(_) => Err(ObjectError::Unhashable {
                type_name: object.tag().name(),
            }),
        }
    }

    /// Key for a text value given as a Rust string.
    pub fn text(s: &str) -> Self {
        ForeignKey::Text(s.encode_utf16().collect())
    }

    fn float(v: f64) -> Self {
        // i128 bounds are exact powers of two, so the comparison is exact.
        if v.fract() == 0.0 && v >= i128::MIN as f64 && v < i128::MAX as f64 {
            ForeignKey::Int(v as i128)
        } else {
            ForeignKey::Float(OrderedFloat(v))
        }
    }
}
