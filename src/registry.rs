//! Type-directed dispatch.
//!
//! Two traits describe how native values are produced from foreign ones:
//!
//! - [`FromForeign`] is implemented by a *target type*. Resolving
//!   `T: FromForeign` selects the converter for `T` at compile time, and
//!   container impls recurse into their element types the same way.
//! - [`Converter`] is implemented by a *converter value*. It carries state
//!   (field mappings, element converters) and is how defaults get
//!   overridden: a `SeqOf::new(point_builder)` converts a list of points with
//!   a builder instead of `Point`'s `FromForeign` impl.
//!
//! [`Native<T>`] bridges the two: it is the stateless converter that defers
//! to `T::from_foreign`.
//!
//! # Example
//!
//! ```ignore
//! let value = Object::list([Object::int(1), Object::int(2)]);
//! let numbers: Vec<i32> = nativize::convert(&value)?;
//!
//! assert!(nativize::eligible::<Vec<u8>>(&value));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use nativize_object::Object;
use tracing::debug;

use crate::error::ConvertResult;

/// A native type that can be built from a foreign value.
pub trait FromForeign: Sized {
    /// Build `Self` from `value`.
    fn from_foreign(value: &Object) -> ConvertResult<Self>;

    /// True if [`from_foreign`](FromForeign::from_foreign) would not fail
    /// with a type or shape error. Never mutates `value`.
    fn eligible(value: &Object) -> bool;
}

/// A converter value producing `Output` from foreign values.
pub trait Converter {
    /// The native type produced.
    type Output;

    /// Convert `value`.
    fn convert(&self, value: &Object) -> ConvertResult<Self::Output>;

    /// True if [`convert`](Converter::convert) would not fail with a type or
    /// shape error. Never mutates `value`.
    fn eligible(&self, value: &Object) -> bool;
}

/// The converter for a [`FromForeign`] type.
pub struct Native<T>(PhantomData<fn() -> T>);

impl<T> Native<T> {
    /// Create the converter.
    pub const fn new() -> Self {
        Native(PhantomData)
    }
}

impl<T> Default for Native<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Native<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Native<T> {}

impl<T> fmt::Debug for Native<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Native<{}>", std::any::type_name::<T>())
    }
}

impl<T: FromForeign> Converter for Native<T> {
    type Output = T;

    fn convert(&self, value: &Object) -> ConvertResult<T> {
        T::from_foreign(value)
    }

    fn eligible(&self, value: &Object) -> bool {
        T::eligible(value)
    }
}

// Shared converters: one builder can feed several composites.

impl<C: Converter + ?Sized> Converter for &C {
    type Output = C::Output;

    fn convert(&self, value: &Object) -> ConvertResult<Self::Output> {
        (**self).convert(value)
    }

    fn eligible(&self, value: &Object) -> bool {
        (**self).eligible(value)
    }
}

impl<C: Converter + ?Sized> Converter for Box<C> {
    type Output = C::Output;

    fn convert(&self, value: &Object) -> ConvertResult<Self::Output> {
        (**self).convert(value)
    }

    fn eligible(&self, value: &Object) -> bool {
        (**self).eligible(value)
    }
}

impl<C: Converter + ?Sized> Converter for Rc<C> {
    type Output = C::Output;

    fn convert(&self, value: &Object) -> ConvertResult<Self::Output> {
        (**self).convert(value)
    }

    fn eligible(&self, value: &Object) -> bool {
        (**self).eligible(value)
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Build a `T` from `value`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn convert<T: FromForeign>(value: &Object) -> ConvertResult<T> {
    T::from_foreign(value).inspect_err(|err| {
        debug!(
            target_type = std::any::type_name::<T>(),
            foreign_type = value.type_name(),
            error = %err,
            "conversion failed"
        );
    })
}

/// True if `value` would convert into a `T` without a type or shape error.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn eligible<T: FromForeign>(value: &Object) -> bool {
    T::eligible(value)
}

/// Build a `T` from a handle received across the runtime boundary.
///
/// # Panics
///
/// Panics if `handle` is `None`. A missing handle is a bug in the caller,
/// not a recoverable conversion failure.
pub fn from_handle<T: FromForeign>(handle: Option<&Object>) -> ConvertResult<T> {
    let Some(value) = handle else {
        panic!(
            "null foreign handle passed where a {} was required",
            std::any::type_name::<T>()
        );
    };
    convert(value)
}
