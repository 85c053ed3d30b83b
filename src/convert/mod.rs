//! Built-in converters.
//!
//! - `primitive`: `bool`, integers, floats, `OrderedFloat`, identity `Object`
//! - `string`: `String` and [`WideString`]
//! - `tuple`: tuples of arity 1 through 12
//! - `container`: lists, sets and dicts ([`SeqOf`], [`SetOf`], [`MapOf`])

mod container;
mod primitive;
mod string;
mod tuple;

pub use container::{MapOf, SeqOf, SetOf};
pub use string::WideString;

use nativize_object::Object;

use crate::error::{ConversionError, ConvertResult};

/// The members of a tuple with exactly `arity` elements.
///
/// The length is checked before any element is looked at.
pub(crate) fn fixed_items<'a>(
    value: &'a Object,
    arity: usize,
    target: &'static str,
) -> ConvertResult<&'a [Object]> {
    let items = value
        .tuple_items()
        .ok_or_else(|| ConversionError::type_mismatch("tuple", value))?;
    if items.len() != arity {
        return Err(ConversionError::length_mismatch(target, arity, items.len()));
    }
    Ok(items)
}
