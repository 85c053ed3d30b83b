//! Foreign object model for `nativize`.
//!
//! This crate plays the part of the foreign runtime: it owns dynamically
//! typed, reference-counted values and exposes the small object protocol
//! that converters rely on.
//!
//! - [`Object`]: a handle to a foreign value. Cloning acquires a reference,
//!   dropping releases it.
//! - [`Tag`]: the runtime type tag of a value.
//! - [`ForeignKey`]: the hashable projection used by sets and dicts.
//! - [`ObjectError`]: contract violations of the object model itself.
//!
//! ```text
//! Object ──tag()──────────▶ Tag
//!        ──as_integer()───▶ i128        (Bool, Int, Long)
//!        ──tuple_items()──▶ &[Object]
//!        ──set_pop()──────▶ Object      (owned, must be added back)
//!        ──dict_get_str()─▶ &Object     (borrowed from the dict)
//!        ──get_attr()─────▶ Object      (owned, released on drop)
//! ```

mod error;
mod key;
mod object;

pub use error::ObjectError;
pub use key::ForeignKey;
pub use object::{Object, Tag};
