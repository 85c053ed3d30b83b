use std::collections::{BTreeMap, BTreeSet};

use nativize::prelude::*;

fn main() {
    let value = Object::str_dict([(
        "positions",
        Object::list([
            Object::str_dict([("x", Object::int(5)), ("y", Object::int(10))]),
            Object::str_dict([("x", Object::int(-1)), ("y", Object::int(2))]),
        ]),
    )]);
    println!("foreign: {:?}", value);

    let parsed: BTreeMap<String, Vec<BTreeMap<String, i32>>> =
        convert(&value).expect("nested positions");
    println!("native: {:?}", parsed);

    // The same value does not fit unsigned coordinates
    match convert::<BTreeMap<String, Vec<BTreeMap<String, u32>>>>(&value) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("error: {}", e),
    }

    // Sets are left as they were found
    let set = Object::set([Object::int(3), Object::int(1), Object::text("x")])
        .expect("hashable members");
    println!("{:?}", convert::<BTreeSet<i64>>(&set));
    println!("set still has {:?} members", set.len());

    // Tuples must match arity exactly
    let triple = Object::tuple([Object::int(1), Object::text("two"), Object::float(3.0)]);
    println!("{:?}", convert::<(i32, String, f64)>(&triple));
    println!("{:?}", convert::<(i32, String)>(&triple));
}
