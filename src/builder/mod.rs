//! Aggregate builders.
//!
//! A builder turns a foreign value into a user-defined type `T` by running
//! an ordered list of [`FieldMapping`]s against a default-constructed `T`.
//! Each mapping pairs a selector (a position or a name) with a converter
//! and an [`Assign`] rule that stores the converted value into `T`.
//!
//! - [`PositionalBuilder`] reads a foreign `tuple`; mapping i reads position i.
//! - [`NamedBuilder`] reads a foreign `dict` by key, or any other value by
//!   attribute. Missing keys and attributes leave the field at its default.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Default)]
//! struct Point { x: f64, y: f64 }
//!
//! let point = NamedBuilder::<Point>::new()
//!     .member("x", |p: &mut Point| &mut p.x)
//!     .member("y", |p: &mut Point| &mut p.y);
//!
//! #[derive(Default)]
//! struct Path { points: Vec<Point> }
//!
//! let path = PositionalBuilder::<Path>::new()
//!     .field(SeqOf::new(point), Assign::member(|p: &mut Path| &mut p.points));
//!
//! let value = Object::tuple([Object::list([Object::str_dict([("x", 1.into())])])]);
//! let built = path.convert(&value)?;
//! ```

mod named;
mod positional;

pub use named::NamedBuilder;
pub use positional::PositionalBuilder;

use std::fmt;

use nativize_object::Object;

use crate::error::ConvertResult;
use crate::registry::Converter;

/// How a converted value is stored into the aggregate.
///
/// Every rule takes the value by move, so fields that are not `Clone` can be
/// populated.
pub enum Assign<T, V> {
    /// Write through an accessor returning the field
    Member(Box<dyn Fn(&mut T) -> &mut V>),
    /// Call a setter method
    Setter(fn(&mut T, V)),
    /// Call an arbitrary function with the aggregate and the value
    Custom(Box<dyn Fn(&mut T, V)>),
}

impl<T, V> Assign<T, V> {
    /// Store into the field returned by `accessor`.
    pub fn member<M>(accessor: M) -> Self
    where
        M: Fn(&mut T) -> &mut V + 'static,
    {
        Assign::Member(Box::new(accessor))
    }

    /// Store by calling `method`, typically `T::set_field`.
    pub fn setter(method: fn(&mut T, V)) -> Self {
        Assign::Setter(method)
    }

    /// Store by calling `f`.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut T, V) + 'static,
    {
        Assign::Custom(Box::new(f))
    }

    /// Move `value` into `target`.
    pub fn apply(&self, target: &mut T, value: V) {
        match self {
            Assign::Member(accessor) => *accessor(target) = value,
            Assign::Setter(method) => method(target, value),
            Assign::Custom(f) => f(target, value),
        }
    }
}

impl<T, V> fmt::Debug for Assign<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assign::Member(_) => f.write_str("Assign::Member"),
            Assign::Setter(_) => f.write_str("Assign::Setter"),
            Assign::Custom(_) => f.write_str("Assign::Custom"),
        }
    }
}

/// Type-erased converter plus assignment for one field of `T`.
trait FieldRule<T> {
    fn apply(&self, target: &mut T, value: &Object) -> ConvertResult<()>;
    fn eligible(&self, value: &Object) -> bool;
}

struct Field<T, C: Converter> {
    converter: C,
    assign: Assign<T, C::Output>,
}

impl<T, C: Converter> FieldRule<T> for Field<T, C> {
    fn apply(&self, target: &mut T, value: &Object) -> ConvertResult<()> {
        let converted = self.converter.convert(value)?;
        self.assign.apply(target, converted);
        Ok(())
    }

    fn eligible(&self, value: &Object) -> bool {
        self.converter.eligible(value)
    }
}

/// One field of an aggregate: a selector `K`, a converter and an [`Assign`].
///
/// Positional builders use `K = usize`, named builders use `K = String`.
pub struct FieldMapping<T, K> {
    key: K,
    rule: Box<dyn FieldRule<T>>,
}

impl<T: 'static, K> FieldMapping<T, K> {
    /// Create a mapping reading `key` with `converter` and storing via `assign`.
    pub fn new<C>(key: K, converter: C, assign: Assign<T, C::Output>) -> Self
    where
        C: Converter + 'static,
        C::Output: 'static,
    {
        Self {
            key,
            rule: Box::new(Field { converter, assign }),
        }
    }
}

impl<T, K> FieldMapping<T, K> {
    /// The selector.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Convert `value` and store it into `target`.
    pub fn apply(&self, target: &mut T, value: &Object) -> ConvertResult<()> {
        self.rule.apply(target, value)
    }

    /// True if `value` would convert without a type or shape error.
    pub fn eligible(&self, value: &Object) -> bool {
        self.rule.eligible(value)
    }
}

impl<T, K: fmt::Debug> fmt::Debug for FieldMapping<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Native;

    #[derive(Default, Debug, PartialEq)]
    struct Sample {
        a: i32,
        b: String,
        log: Vec<String>,
    }

    impl Sample {
        fn set_b(&mut self, b: String) {
            self.b = b;
        }
    }

    #[test]
    fn assign_member() {
        let assign = Assign::member(|s: &mut Sample| &mut s.a);
        let mut sample = Sample::default();
        assign.apply(&mut sample, 5);
        assert_eq!(sample.a, 5);
    }

    #[test]
    fn assign_setter() {
        let assign = Assign::setter(Sample::set_b);
        let mut sample = Sample::default();
        assign.apply(&mut sample, "b".to_string());
        assert_eq!(sample.b, "b");
    }

    #[test]
    fn assign_custom() {
        let assign = Assign::custom(|s: &mut Sample, v: i32| s.log.push(format!("got {}", v)));
        let mut sample = Sample::default();
        assign.apply(&mut sample, 1);
        assign.apply(&mut sample, 2);
        assert_eq!(sample.log, vec!["got 1", "got 2"]);
    }

    #[test]
    fn field_mapping_converts_then_assigns() {
        let mapping = FieldMapping::new(
            "a".to_string(),
            Native::<i32>::new(),
            Assign::member(|s: &mut Sample| &mut s.a),
        );
        let mut sample = Sample::default();
        mapping.apply(&mut sample, &Object::int(9)).unwrap();
        assert_eq!(sample.a, 9);
        assert_eq!(mapping.key(), "a");

        assert!(mapping.apply(&mut sample, &Object::text("9")).is_err());
        assert_eq!(sample.a, 9);
        assert!(!mapping.eligible(&Object::text("9")));
    }

    #[test]
    fn debug_output() {
        let assign: Assign<Sample, i32> = Assign::member(|s: &mut Sample| &mut s.a);
        assert_eq!(format!("{:?}", assign), "Assign::Member");
        let mapping = FieldMapping::new(0usize, Native::<i32>::new(), assign);
        assert!(format!("{:?}", mapping).contains("key: 0"));
    }
}
