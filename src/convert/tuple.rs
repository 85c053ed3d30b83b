//! Tuple converters.
//!
//! A Rust tuple of arity N converts from a foreign `tuple` of exactly N
//! elements. The length is checked before any element is converted; elements
//! are then converted left to right and the first failure is returned.
//!
//! Tuples of [`Converter`]s are converters themselves, so positions can be
//! given custom converters: `(Native::<String>::new(), point_builder)`.

use nativize_object::Object;

use super::fixed_items;
use crate::error::{ConvertResult, Location};
use crate::registry::{Converter, FromForeign, Native};

macro_rules! impl_tuple {
    ($len:expr; $($name:ident : $idx:tt),+) => {
        impl<$($name: Converter),+> Converter for ($($name,)+) {
            type Output = ($($name::Output,)+);

            fn convert(&self, value: &Object) -> ConvertResult<Self::Output> {
                let items = fixed_items(value, $len, "tuple")?;
                Ok(($(
                    self.$idx
                        .convert(&items[$idx])
                        .map_err(|e| e.at(Location::Index($idx)))?,
                )+))
            }

            fn eligible(&self, value: &Object) -> bool {
                match value.tuple_items() {
                    Some(items) if items.len() == $len => {
                        $(self.$idx.eligible(&items[$idx]))&&+
                    }
                    _ => false,
                }
            }
        }

        impl<$($name: FromForeign),+> FromForeign for ($($name,)+) {
            fn from_foreign(value: &Object) -> ConvertResult<Self> {
                Converter::convert(&($(Native::<$name>::new(),)+), value)
            }

            fn eligible(value: &Object) -> bool {
                Converter::eligible(&($(Native::<$name>::new(),)+), value)
            }
        }
    };
}

impl_tuple!(1; A: 0);
impl_tuple!(2; A: 0, B: 1);
impl_tuple!(3; A: 0, B: 1, C: 2);
impl_tuple!(4; A: 0, B: 1, C: 2, D: 3);
impl_tuple!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuple!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_tuple!(7; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_tuple!(8; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
impl_tuple!(9; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
impl_tuple!(10; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
impl_tuple!(11; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
impl_tuple!(12; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConversionError, ErrorKind};

    fn sample() -> Object {
        Object::tuple([Object::int(1), Object::text("two"), Object::float(3.0)])
    }

    #[test]
    fn tuple_of_three() {
        let (a, b, c) = <(i32, String, f64)>::from_foreign(&sample()).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
        assert_eq!(c, 3.0);
    }

    #[test]
    fn single_element_tuple() {
        let (a,) = <(bool,)>::from_foreign(&Object::tuple([Object::bool(true)])).unwrap();
        assert!(a);
    }

    #[test]
    fn tuple_requires_tuple_tag() {
        let list = Object::list([Object::int(1), Object::int(2)]);
        let err = <(i32, i32)>::from_foreign(&list).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(!<(i32, i32)>::eligible(&list));
    }

    #[test]
    fn length_checked_before_elements() {
        // The first element would fail, but the length mismatch wins.
        let value = Object::tuple([Object::text("x")]);
        let err = <(i32, i32)>::from_foreign(&value).unwrap_err();
        assert_eq!(err, ConversionError::length_mismatch("tuple", 2, 1));
    }

    #[test]
    fn element_failure_reports_position() {
        let err = <(i32, i32, f64)>::from_foreign(&sample()).unwrap_err();
        assert_eq!(err.path(), vec![&Location::Index(1)]);
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn eligibility_checks_elements() {
        assert!(<(i32, String, f64)>::eligible(&sample()));
        assert!(!<(i32, i32, f64)>::eligible(&sample()));
        assert!(!<(i32, String)>::eligible(&sample()));
    }

    #[test]
    fn tuple_of_converters() {
        let conv = (Native::<String>::new(), Native::<u8>::new());
        let value = Object::tuple([Object::bytes("k"), Object::int(7)]);
        assert_eq!(conv.convert(&value).unwrap(), ("k".to_string(), 7u8));
    }

    #[test]
    fn twelve_elements() {
        let value = Object::tuple((0..12).map(Object::int));
        let out = <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8)>::from_foreign(&value).unwrap();
        assert_eq!(out.11, 11);
    }
}
