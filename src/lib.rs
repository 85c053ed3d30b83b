//! # nativize
//!
//! Type-directed conversion of foreign runtime values into native Rust values.
//!
//! A foreign value is an [`Object`]: a reference-counted, dynamically typed
//! handle owned by another runtime. This crate walks such a value guided by
//! the *target* type and produces an owned native value, or a
//! [`ConversionError`] saying what went wrong and where.
//!
//! ## Dispatch
//!
//! - [`FromForeign`] is resolved from the target type. Primitives, strings,
//!   tuples, `Vec`, sets and maps implement it, recursively.
//! - [`Converter`] values carry state. [`SeqOf`], [`SetOf`], [`MapOf`],
//!   tuples of converters, [`PositionalBuilder`] and [`NamedBuilder`] let a
//!   caller replace the default conversion for any element.
//!
//! Every conversion has an eligibility check that predicts type and shape
//! errors without mutating the value. Range overflows and unreadable payloads
//! are only found by converting.
//!
//! ## Example
//!
//! ```ignore
//! use nativize::prelude::*;
//!
//! let value = Object::str_dict([
//!     ("positions", Object::list([Object::str_dict([("x", 5.into())])])),
//! ]);
//! let parsed: BTreeMap<String, Vec<BTreeMap<String, i32>>> = convert(&value)?;
//! ```
//!
//! ## Features
//!
//! - `profiling`: instrument the conversion entry points with the
//!   [`profiling`](https://docs.rs/profiling) crate

mod builder;
mod convert;
mod error;
mod registry;

pub use builder::{Assign, FieldMapping, NamedBuilder, PositionalBuilder};
pub use convert::{MapOf, SeqOf, SetOf, WideString};
pub use error::{ConversionError, ConvertResult, ErrorKind, Location};
pub use registry::{Converter, FromForeign, Native, convert, eligible, from_handle};

pub use nativize_object::{ForeignKey, Object, ObjectError, Tag};
pub use ordered_float::OrderedFloat;

/// Everything needed to write conversions.
pub mod prelude {
    pub use crate::builder::{Assign, NamedBuilder, PositionalBuilder};
    pub use crate::convert::{MapOf, SeqOf, SetOf, WideString};
    pub use crate::error::{ConversionError, ConvertResult, ErrorKind, Location};
    pub use crate::registry::{Converter, FromForeign, Native, convert, eligible, from_handle};
    pub use nativize_object::{Object, Tag};
}
