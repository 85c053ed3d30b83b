//! String converters.
//!
//! Both the `bytes` and `str` tags convert to either string type, so a byte
//! string `b"hello"` and a text string `"hello"` produce the same native
//! value. Byte strings must hold UTF-8; text strings must hold well-formed
//! UTF-16. A payload that fails to decode is reported as `Unreadable`, which
//! eligibility does not predict.

use std::fmt;
use std::ops::Deref;

use nativize_object::{Object, Tag};

use crate::error::{ConversionError, ConvertResult};
use crate::registry::FromForeign;

/// A string held as a sequence of Unicode scalar values.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideString(Vec<char>);

impl WideString {
    /// Create an empty wide string.
    pub fn new() -> Self {
        Self::default()
    }

    /// The code points.
    pub fn as_chars(&self) -> &[char] {
        &self.0
    }

    /// Consume the string, returning its code points.
    pub fn into_chars(self) -> Vec<char> {
        self.0
    }
}

impl Deref for WideString {
    type Target = [char];

    fn deref(&self) -> &[char] {
        &self.0
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        WideString(s.chars().collect())
    }
}

impl From<Vec<char>> for WideString {
    fn from(chars: Vec<char>) -> Self {
        WideString(chars)
    }
}

impl FromIterator<char> for WideString {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        WideString(iter.into_iter().collect())
    }
}

impl fmt::Display for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| fmt::Write::write_char(f, *c))
    }
}

fn string_eligible(value: &Object) -> bool {
    matches!(value.tag(), Tag::Bytes | Tag::Text)
}

fn decode_bytes(bytes: &[u8]) -> ConvertResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| ConversionError::Unreadable {
        what: "bytes",
        detail: e.to_string(),
    })
}

impl FromForeign for String {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        if let Some(bytes) = value.as_bytes() {
            return decode_bytes(bytes).map(str::to_owned);
        }
        if let Some(units) = value.as_text_units() {
            return String::from_utf16(units).map_err(|e| ConversionError::Unreadable {
                what: "str",
                detail: e.to_string(),
            });
        }
        Err(ConversionError::type_mismatch("str", value))
    }

    fn eligible(value: &Object) -> bool {
        string_eligible(value)
    }
}

impl FromForeign for WideString {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        if let Some(bytes) = value.as_bytes() {
            return decode_bytes(bytes).map(WideString::from);
        }
        if let Some(units) = value.as_text_units() {
            return char::decode_utf16(units.iter().copied())
                .collect::<Result<WideString, _>>()
                .map_err(|e| ConversionError::Unreadable {
                    what: "str",
                    detail: e.to_string(),
                });
        }
        Err(ConversionError::type_mismatch("str", value))
    }

    fn eligible(value: &Object) -> bool {
        string_eligible(value)
    }
}
