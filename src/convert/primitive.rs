//! Primitive converters.
//!
//! ## Supported Types
//!
//! - Boolean: `bool` (only the foreign `bool` tag)
//! - Integers: `i8` through `i128`, `u8` through `u128`, `isize`, `usize`
//!   (the `int` and `long` tags, and `bool`, which is an integer subtype)
//! - Floats: `f32`, `f64`, `OrderedFloat<f32>`, `OrderedFloat<f64>`
//!   (the `float` tag and every integer tag)
//! - `Object`: identity, returns a new handle to the value
//!
//! Eligibility for numbers checks the tag only. A value that is eligible can
//! still fail with `IntegerOverflow` or `FloatOverflow`.

use nativize_object::{Object, Tag};
use ordered_float::OrderedFloat;

use crate::error::{ConversionError, ConvertResult};
use crate::registry::FromForeign;

// ============================================================================
// Bool
// ============================================================================

impl FromForeign for bool {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| ConversionError::type_mismatch("bool", value))
    }

    fn eligible(value: &Object) -> bool {
        value.tag() == Tag::Bool
    }
}

// ============================================================================
// Integers
// ============================================================================

macro_rules! impl_from_foreign_int {
    ($($ty:ty),*) => {
        $(
            impl FromForeign for $ty {
                fn from_foreign(value: &Object) -> ConvertResult<Self> {
                    let Some(v) = value.as_integer() else {
                        return Err(ConversionError::type_mismatch("int", value));
                    };
                    // Unsigned targets reject negatives through the same check
                    <$ty>::try_from(v).map_err(|_| ConversionError::IntegerOverflow {
                        value: v,
                        target_type: stringify!($ty),
                    })
                }

                fn eligible(value: &Object) -> bool {
                    value.tag().is_integer()
                }
            }
        )*
    };
}

impl_from_foreign_int!(i8, i16, i32, i64, i128, isize);
impl_from_foreign_int!(u8, u16, u32, u64, u128, usize);

// ============================================================================
// Floats
// ============================================================================

fn float_payload(value: &Object) -> ConvertResult<f64> {
    if let Some(v) = value.as_float() {
        return Ok(v);
    }
    value
        .as_integer()
        .map(|v| v as f64)
        .ok_or_else(|| ConversionError::type_mismatch("float", value))
}

fn float_eligible(value: &Object) -> bool {
    value.tag() == Tag::Float || value.tag().is_integer()
}

impl FromForeign for f64 {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        let v = float_payload(value)?;
        if v.is_infinite() {
            return Err(ConversionError::FloatOverflow {
                value: v,
                target_type: "f64",
            });
        }
        Ok(v)
    }

    fn eligible(value: &Object) -> bool {
        float_eligible(value)
    }
}

impl FromForeign for f32 {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        let v = float_payload(value)?;
        let narrowed = v as f32;
        if narrowed.is_infinite() {
            return Err(ConversionError::FloatOverflow {
                value: v,
                target_type: "f32",
            });
        }
        Ok(narrowed)
    }

    fn eligible(value: &Object) -> bool {
        float_eligible(value)
    }
}

impl<F: FromForeign> FromForeign for OrderedFloat<F>
where
    OrderedFloat<F>: From<F>,
{
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        F::from_foreign(value).map(OrderedFloat::from)
    }

    fn eligible(value: &Object) -> bool {
        F::eligible(value)
    }
}

// ============================================================================
// Identity
// ============================================================================

impl FromForeign for Object {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        Ok(value.clone())
    }

    fn eligible(_value: &Object) -> bool {
        true
    }
}
