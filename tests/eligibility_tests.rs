//! Eligibility must agree with conversion: for every value and target,
//! `eligible` is true exactly when converting does not fail with a type or
//! shape error.

use std::collections::{BTreeMap, BTreeSet};

use nativize::{FromForeign, Object, WideString, convert, eligible};

/// Values of every tag, including nested and degenerate ones.
fn corpus() -> Vec<Object> {
    vec![
        Object::none(),
        Object::bool(true),
        Object::bool(false),
        Object::int(0),
        Object::int(-1),
        Object::int(300),
        Object::long(1 << 70),
        Object::float(0.5),
        Object::float(f64::INFINITY),
        Object::float(1e300),
        Object::bytes("abc"),
        Object::bytes(vec![0xff]),
        Object::text("abc"),
        Object::text_units(vec![0xd800]),
        Object::tuple([]),
        Object::tuple([Object::int(1)]),
        Object::tuple([Object::int(1), Object::text("a")]),
        Object::tuple([Object::int(1), Object::int(2)]),
        Object::tuple([Object::int(1), Object::int(2), Object::int(3)]),
        Object::list([]),
        Object::list([Object::int(1), Object::int(2)]),
        Object::list([Object::int(1), Object::text("a")]),
        Object::list([Object::list([Object::int(1)])]),
        Object::set([]).unwrap(),
        Object::set([Object::int(1), Object::int(2)]).unwrap(),
        Object::set([Object::text("a"), Object::text("b")]).unwrap(),
        Object::set([Object::int(1), Object::text("b")]).unwrap(),
        Object::str_dict([]),
        Object::str_dict([("a", Object::int(1)), ("b", Object::int(2))]),
        Object::str_dict([("a", Object::text("x"))]),
        Object::dict([(Object::int(1), Object::int(2))]).unwrap(),
        Object::instance("Thing", [("a", Object::int(1))]),
    ]
}

fn check<T: FromForeign>(name: &str) {
    for value in corpus() {
        let predicted = eligible::<T>(&value);
        let shape_error = match convert::<T>(&value) {
            Ok(_) => false,
            Err(err) => err.is_shape_error(),
        };
        assert_eq!(
            predicted, !shape_error,
            "eligibility of {:?} for {} disagrees with conversion",
            value, name
        );
    }
}

#[test]
fn test_primitive_eligibility() {
    check::<bool>("bool");
    check::<i8>("i8");
    check::<u8>("u8");
    check::<i64>("i64");
    check::<u128>("u128");
    check::<f32>("f32");
    check::<f64>("f64");
    check::<Object>("Object");
}

#[test]
fn test_string_eligibility() {
    check::<String>("String");
    check::<WideString>("WideString");
}

#[test]
fn test_tuple_eligibility() {
    check::<(i32,)>("(i32,)");
    check::<(i32, i32)>("(i32, i32)");
    check::<(i32, String)>("(i32, String)");
    check::<(u8, u8, u8)>("(u8, u8, u8)");
}

#[test]
fn test_container_eligibility() {
    check::<Vec<i32>>("Vec<i32>");
    check::<Vec<Vec<u8>>>("Vec<Vec<u8>>");
    check::<BTreeSet<i64>>("BTreeSet<i64>");
    check::<BTreeSet<String>>("BTreeSet<String>");
    check::<BTreeMap<String, i32>>("BTreeMap<String, i32>");
    check::<BTreeMap<i32, i32>>("BTreeMap<i32, i32>");
}

#[test]
fn test_eligibility_does_not_mutate_sets() {
    let set = Object::set([Object::int(1), Object::int(2), Object::int(3)]).unwrap();
    assert!(eligible::<BTreeSet<u8>>(&set));
    assert!(!eligible::<BTreeSet<String>>(&set));
    assert_eq!(set.len(), Some(3));
    for v in 1..=3 {
        assert!(set.set_contains(&Object::int(v)).unwrap());
    }
}
