use nativize::{ConversionError, ErrorKind, Object, OrderedFloat, WideString, convert, eligible};

macro_rules! integer_bounds {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let min = <$ty>::MIN as i128;
                let max = <$ty>::MAX as i128;

                assert_eq!(convert::<$ty>(&Object::long(min)).unwrap(), <$ty>::MIN);
                assert_eq!(convert::<$ty>(&Object::long(max)).unwrap(), <$ty>::MAX);

                let below = convert::<$ty>(&Object::long(min - 1)).unwrap_err();
                assert_eq!(
                    below,
                    ConversionError::IntegerOverflow {
                        value: min - 1,
                        target_type: stringify!($ty),
                    }
                );

                let above = convert::<$ty>(&Object::long(max + 1)).unwrap_err();
                assert_eq!(above.kind(), ErrorKind::RangeOverflow);

                // Out-of-range values are still eligible
                assert!(eligible::<$ty>(&Object::long(max + 1)));
            }
        )*
    };
}

integer_bounds! {
    test_i8_bounds: i8,
    test_i16_bounds: i16,
    test_i32_bounds: i32,
    test_i64_bounds: i64,
    test_u8_bounds: u8,
    test_u16_bounds: u16,
    test_u32_bounds: u32,
    test_u64_bounds: u64,
}

#[test]
fn test_i128_full_range() {
    assert_eq!(convert::<i128>(&Object::long(i128::MIN)).unwrap(), i128::MIN);
    assert_eq!(convert::<i128>(&Object::long(i128::MAX)).unwrap(), i128::MAX);
    assert!(convert::<u128>(&Object::long(-1)).is_err());
    assert_eq!(convert::<u128>(&Object::long(i128::MAX)).unwrap(), i128::MAX as u128);
}

#[test]
fn test_legacy_int_and_long_agree() {
    for v in [0i64, 1, -1, i64::MIN, i64::MAX] {
        let from_int = convert::<i64>(&Object::int(v)).unwrap();
        let from_long = convert::<i64>(&Object::long(v as i128)).unwrap();
        assert_eq!(from_int, from_long);
    }
}

#[test]
fn test_string_normalization() {
    let from_bytes: String = convert(&Object::bytes("hello")).unwrap();
    let from_text: String = convert(&Object::text("hello")).unwrap();
    assert_eq!(from_bytes, from_text);

    let wide_bytes: WideString = convert(&Object::bytes("hello")).unwrap();
    let wide_text: WideString = convert(&Object::text("hello")).unwrap();
    assert_eq!(wide_bytes, wide_text);
    assert_eq!(wide_bytes.to_string(), "hello");
}

#[test]
fn test_empty_strings() {
    assert_eq!(convert::<String>(&Object::bytes("")).unwrap(), "");
    assert!(convert::<WideString>(&Object::text("")).unwrap().is_empty());
}

#[test]
fn test_float_infinity_overflows() {
    for v in [f64::INFINITY, f64::NEG_INFINITY] {
        let value = Object::float(v);
        assert!(eligible::<f64>(&value));
        assert_eq!(convert::<f64>(&value).unwrap_err().kind(), ErrorKind::RangeOverflow);
        assert_eq!(convert::<f32>(&value).unwrap_err().kind(), ErrorKind::RangeOverflow);
    }
}

#[test]
fn test_float_from_integers() {
    assert_eq!(convert::<f64>(&Object::long(1 << 40)).unwrap(), (1u64 << 40) as f64);
    assert_eq!(convert::<f32>(&Object::int(-3)).unwrap(), -3.0);
    assert_eq!(
        convert::<OrderedFloat<f64>>(&Object::float(0.25)).unwrap(),
        OrderedFloat(0.25)
    );
}

#[test]
fn test_none_converts_only_to_object() {
    let none = Object::none();
    assert!(convert::<i32>(&none).is_err());
    assert!(convert::<String>(&none).is_err());
    assert!(convert::<bool>(&none).is_err());
    assert!(convert::<Object>(&none).unwrap().is(&none));
}

#[test]
fn test_type_mismatch_names_both_types() {
    let err = convert::<i32>(&Object::text("1")).unwrap_err();
    assert_eq!(
        err,
        ConversionError::TypeMismatch {
            expected: "int",
            actual: "str",
        }
    );
}

#[test]
fn test_conversion_does_not_leak_references() {
    let value = Object::list([Object::int(1), Object::int(2)]);
    let before = value.ref_count();
    let _: Vec<i32> = convert(&value).unwrap();
    let _ = convert::<Vec<String>>(&value);
    assert_eq!(value.ref_count(), before);
}
