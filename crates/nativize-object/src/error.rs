//! Errors raised by the object model itself.

use thiserror::Error;

/// Contract violations reported by [`Object`](crate::Object) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// A value without a hash was used as a set element or dict key.
    #[error("unhashable type: '{type_name}'")]
    Unhashable { type_name: &'static str },

    /// A set operation was applied to something that is not a set.
    #[error("'{type_name}' object is not a set")]
    NotASet { type_name: &'static str },

    /// Attributes were assigned on a value that has no attribute table.
    #[error("'{type_name}' object has no settable attributes")]
    NoAttributes { type_name: &'static str },
}
