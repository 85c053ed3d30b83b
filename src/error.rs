//! Conversion errors.
//!
//! Every converter reports failures through [`ConversionError`]. Errors raised
//! inside a container or aggregate are wrapped in [`ConversionError::Nested`]
//! with the [`Location`] of the failing element, so a deep failure reads like
//! a path:
//!
//! ```text
//! at field 'positions': at index 1: at value for key "x": integer overflow: ...
//! ```
//!
//! [`ConversionError::kind`] classifies an error by its root cause:
//!
//! | kind | variants |
//! |---|---|
//! | `TypeMismatch` | `TypeMismatch` |
//! | `ShapeMismatch` | `LengthMismatch` |
//! | `RangeOverflow` | `IntegerOverflow`, `FloatOverflow` |
//! | `IoFailure` | `Unreadable` |

use std::fmt;

use nativize_object::Object;
use thiserror::Error;

/// Result type returned by every converter.
pub type ConvertResult<T> = Result<T, ConversionError>;

/// Broad classification of a conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value's tag does not fit the requested type or container.
    TypeMismatch,
    /// A fixed-arity structure has the wrong number of elements.
    ShapeMismatch,
    /// A number does not fit the target's range.
    RangeOverflow,
    /// The runtime could not produce a payload for a well-typed value.
    IoFailure,
}

/// Where inside a composite value a nested error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Position in a tuple, list, or positional aggregate; visit order for sets
    Index(usize),
    /// Key of the n-th map entry
    Key(usize),
    /// Value stored under the given key (rendered in foreign syntax)
    Value(String),
    /// Named field of an aggregate
    Field(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Index(i) => write!(f, "index {}", i),
            Location::Key(i) => write!(f, "key of entry {}", i),
            Location::Value(key) => write!(f, "value for key {}", key),
            Location::Field(name) => write!(f, "field '{}'", name),
        }
    }
}

/// Errors that can occur while converting a foreign value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value's tag is incompatible with the requested type
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A fixed-arity structure has the wrong element count
    #[error("length mismatch: {target} expects {expected} elements, got {actual}")]
    LengthMismatch {
        target: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Integer outside the target type's range
    #[error("integer overflow: value {value} does not fit in {target_type}")]
    IntegerOverflow { value: i128, target_type: &'static str },

    /// Float whose conversion yields an infinity
    #[error("float overflow: value {value} cannot be represented as {target_type}")]
    FloatOverflow {
        value: f64,
        target_type: &'static str,
    },

    /// The runtime could not produce the payload of a well-typed value
    #[error("unreadable {what}: {detail}")]
    Unreadable { what: &'static str, detail: String },

    /// Failure inside a composite value
    #[error("at {at}: {source}")]
    Nested {
        at: Location,
        #[source]
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    /// Create a type mismatch error for `value`.
    pub fn type_mismatch(expected: &'static str, value: &Object) -> Self {
        ConversionError::TypeMismatch {
            expected,
            actual: value.type_name(),
        }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(target: &'static str, expected: usize, actual: usize) -> Self {
        ConversionError::LengthMismatch {
            target,
            expected,
            actual,
        }
    }

    /// Wrap this error with the location it occurred at.
    pub fn at(self, at: Location) -> Self {
        ConversionError::Nested {
            at,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping every `Nested` layer.
    pub fn root_cause(&self) -> &ConversionError {
        let mut err = self;
        while let ConversionError::Nested { source, .. } = err {
            err = source;
        }
        err
    }

    /// Locations from the outermost composite down to the failing value.
    pub fn path(&self) -> Vec<&Location> {
        let mut path = Vec::new();
        let mut err = self;
        while let ConversionError::Nested { at, source } = err {
            path.push(at);
            err = source;
        }
        path
    }

    /// Classification of the root cause.
    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            ConversionError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ConversionError::LengthMismatch { .. } => ErrorKind::ShapeMismatch,
            ConversionError::IntegerOverflow { .. } | ConversionError::FloatOverflow { .. } => {
                ErrorKind::RangeOverflow
            }
            ConversionError::Unreadable { .. } => ErrorKind::IoFailure,
            // root_cause never returns a Nested error
            ConversionError::Nested { source, .. } => source.kind(),
        }
    }

    /// True for the kinds an eligibility check is expected to predict.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TypeMismatch | ErrorKind::ShapeMismatch
        )
    }
}
