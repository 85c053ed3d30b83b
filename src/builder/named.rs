//! Builder reading a foreign dict or attribute object by name.

use std::fmt;

use nativize_object::Object;
use tracing::trace;

use super::{Assign, FieldMapping};
use crate::error::{ConvertResult, Location};
use crate::registry::{Converter, FromForeign, Native};

/// Builds a `T` by looking up each mapping's name on the foreign value.
///
/// A `dict` source is read by text key `"x"`, falling back to the byte-string
/// key `b"x"`. Any other source is read by attribute. Names that are absent
/// leave the field at its `Default` value, so a partially populated source is
/// not an error.
/// A name that is present but fails to convert is.
pub struct NamedBuilder<T> {
    mappings: Vec<FieldMapping<T, String>>,
}

impl<T: Default + 'static> NamedBuilder<T> {
    /// Create a builder with no mappings.
    pub fn new() -> Self {
        Self {
            mappings: Vec::new(),
        }
    }

    /// Append a mapping for `name`.
    pub fn field<C>(mut self, name: impl Into<String>, converter: C, assign: Assign<T, C::Output>) -> Self
    where
        C: Converter + 'static,
        C::Output: 'static,
    {
        self.mappings
            .push(FieldMapping::new(name.into(), converter, assign));
        self
    }

    /// Append a field of a [`FromForeign`] type, stored through `accessor`.
    pub fn member<V, M>(self, name: impl Into<String>, accessor: M) -> Self
    where
        V: FromForeign + 'static,
        M: Fn(&mut T) -> &mut V + 'static,
    {
        self.field(name, Native::<V>::new(), Assign::member(accessor))
    }

    /// Append a field of a [`FromForeign`] type, stored by calling `method`.
    pub fn setter<V>(self, name: impl Into<String>, method: fn(&mut T, V)) -> Self
    where
        V: FromForeign + 'static,
    {
        self.field(name, Native::<V>::new(), Assign::setter(method))
    }

    /// Append a field of a [`FromForeign`] type, stored by calling `f`.
    pub fn custom<V, F>(self, name: impl Into<String>, f: F) -> Self
    where
        V: FromForeign + 'static,
        F: Fn(&mut T, V) + 'static,
    {
        self.field(name, Native::<V>::new(), Assign::custom(f))
    }
}

impl<T> NamedBuilder<T> {
    /// The mappings, in declaration order.
    pub fn mappings(&self) -> &[FieldMapping<T, String>] {
        &self.mappings
    }

    /// Names this builder reads, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|m| m.key().as_str())
    }
}

impl<T: Default + 'static> Default for NamedBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for NamedBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedBuilder")
            .field("type", &std::any::type_name::<T>())
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Look up `name` on `value`: by key for dicts, by attribute otherwise.
///
/// Dicts built by older runtimes key fields with byte strings, so `b"x"` is
/// tried when `"x"` is absent.
fn lookup(value: &Object, name: &str) -> Option<Object> {
    if value.dict_entries().is_some() {
        value
            .dict_get_str(name)
            .or_else(|| value.dict_get(&Object::bytes(name)))
            .cloned()
    } else {
        value.get_attr(name)
    }
}

impl<T: Default> Converter for NamedBuilder<T> {
    type Output = T;

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn convert(&self, value: &Object) -> ConvertResult<T> {
        let mut out = T::default();
        for mapping in &self.mappings {
            let name = mapping.key();
            let Some(field) = lookup(value, name) else {
                trace!(name = %name, source = value.type_name(), "field absent, keeping default");
                continue;
            };
            mapping
                .apply(&mut out, &field)
                .map_err(|e| e.at(Location::Field(name.clone())))?;
        }
        Ok(out)
    }

    fn eligible(&self, value: &Object) -> bool {
        self.mappings.iter().all(|mapping| {
            lookup(value, mapping.key()).is_none_or(|field| mapping.eligible(&field))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Default, Debug, PartialEq)]
    struct Point {
        x: f64,
        y: f64,
    }

    fn point_builder() -> NamedBuilder<Point> {
        NamedBuilder::new()
            .member("x", |p: &mut Point| &mut p.x)
            .member("y", |p: &mut Point| &mut p.y)
    }

    #[test]
    fn builds_from_dict() {
        let value = Object::str_dict([("x", Object::float(1.5)), ("y", Object::int(-2))]);
        assert_eq!(point_builder().convert(&value).unwrap(), Point { x: 1.5, y: -2.0 });
    }

    #[test]
    fn builds_from_attributes() {
        let value = Object::instance("Point", [("x", Object::int(3)), ("y", Object::int(4))]);
        assert_eq!(point_builder().convert(&value).unwrap(), Point { x: 3.0, y: 4.0 });
    }

    #[test]
    fn absent_names_keep_defaults() {
        let value = Object::str_dict([("y", Object::int(7))]);
        assert_eq!(point_builder().convert(&value).unwrap(), Point { x: 0.0, y: 7.0 });

        let empty = Object::instance("Point", []);
        assert_eq!(point_builder().convert(&empty).unwrap(), Point::default());
    }

    #[test]
    fn extra_names_are_ignored() {
        let value = Object::str_dict([
            ("x", Object::int(1)),
            ("y", Object::int(2)),
            ("z", Object::text("ignored")),
        ]);
        assert_eq!(point_builder().convert(&value).unwrap(), Point { x: 1.0, y: 2.0 });
    }

    #[test]
    fn byte_keys_match_names() {
        let value = Object::dict([
            (Object::bytes("x"), Object::int(1)),
            (Object::bytes("y"), Object::int(3)),
        ])
        .unwrap();
        assert_eq!(point_builder().convert(&value).unwrap(), Point { x: 1.0, y: 3.0 });
    }

    #[test]
    fn byte_key_errors_are_predicted() {
        let value = Object::dict([(Object::bytes("x"), Object::text("one"))]).unwrap();
        assert!(!point_builder().eligible(&value));
        let err = point_builder().convert(&value).unwrap_err();
        assert_eq!(err.path(), vec![&Location::Field("x".to_string())]);
    }

    #[test]
    fn text_key_wins_over_byte_key() {
        let value = Object::dict([
            (Object::bytes("x"), Object::int(1)),
            (Object::text("x"), Object::int(2)),
        ])
        .unwrap();
        assert_eq!(point_builder().convert(&value).unwrap().x, 2.0);
    }

    #[test]
    fn scalar_source_has_no_fields() {
        assert_eq!(point_builder().convert(&Object::int(1)).unwrap(), Point::default());
        assert!(point_builder().eligible(&Object::int(1)));
    }

    #[test]
    fn present_field_failure_names_field() {
        let value = Object::str_dict([("x", Object::int(1)), ("y", Object::text("two"))]);
        let err = point_builder().convert(&value).unwrap_err();
        assert_eq!(err.path(), vec![&Location::Field("y".to_string())]);
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(!point_builder().eligible(&value));
    }

    #[test]
    fn names_in_declaration_order() {
        let builder = point_builder();
        assert_eq!(builder.names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(format!("{:?}", builder).contains("\"x\""));
    }
}
