//! The structural engine.

use bytes::Bytes;
use shapeshift::{
    Def, Peek, PointerAccess, PointerDef, Poke, Reason, Reflect, Shape, Shaped, ShiftError,
    TargetError, Value, assign, from_value, value,
};
use shapeshift_testhelpers::{IPanic, test};

#[test]
fn identity_for_scalars() -> Result<(), IPanic> {
    let mut i = 0i32;
    assign(&Value::I32(-5), &mut i)?;
    assert_eq!(i, -5);

    let mut s = String::new();
    assign(&Value::from("hello"), &mut s)?;
    assert_eq!(s, "hello");

    let mut f = 0.0f64;
    assign(&Value::F64(2.5), &mut f)?;
    assert_eq!(f, 2.5);

    let mut b = false;
    assign(&Value::Bool(true), &mut b)?;
    assert!(b);
    Ok(())
}

#[test]
fn identity_for_same_length_sequences() -> Result<(), IPanic> {
    let mut v: Vec<i64> = Vec::new();
    assign(&value!([1, 2, 3]), &mut v)?;
    assert_eq!(v, [1, 2, 3]);

    let mut a = [0u8; 3];
    assign(&value!([7, 8, 9]), &mut a)?;
    assert_eq!(a, [7, 8, 9]);
    Ok(())
}

#[test]
fn scalars_convert_on_the_way_in() -> Result<(), IPanic> {
    let mut n = 0u32;
    assign(&Value::from("42"), &mut n)?;
    assert_eq!(n, 42);

    let mut s = String::new();
    assign(&Value::F64(1.0), &mut s)?;
    assert_eq!(s, "1");

    let mut bytes = Bytes::new();
    assign(&Value::I8(-1), &mut bytes)?;
    assert_eq!(&bytes[..], b"-1");
    Ok(())
}

#[test]
fn null_yields_zero_for_every_shape() -> Result<(), IPanic> {
    #[derive(Shaped, Debug, PartialEq)]
    struct Point {
        x: i32,
        label: String,
    }

    let mut n = 9u8;
    let mut s = String::from("x");
    let mut v: Vec<i32> = vec![1, 2];
    let mut a = [1.5f32, 2.5];
    let mut p = Point {
        x: 3,
        label: "p".into(),
    };
    let mut o = Some(4i16);
    let mut b = Box::new(5u64);
    let mut any = Value::from("still here");

    assign(&Value::Null, &mut n)?;
    assign(&Value::Null, &mut s)?;
    assign(&Value::Null, &mut v)?;
    assign(&Value::Null, &mut a)?;
    assign(&Value::Null, &mut p)?;
    assign(&Value::Null, &mut o)?;
    assign(&Value::Null, &mut b)?;
    assign(&Value::Null, &mut any)?;

    assert_eq!(n, 0);
    assert_eq!(s, "");
    assert!(v.is_empty());
    assert_eq!(a, [0.0, 0.0]);
    assert_eq!(
        p,
        Point {
            x: 0,
            label: String::new()
        }
    );
    assert_eq!(o, None);
    assert_eq!(*b, 0);
    assert!(any.is_null());
    Ok(())
}

#[test]
fn vec_targets_take_the_source_length() -> Result<(), IPanic> {
    let mut v: Vec<i32> = vec![10, 20, 30, 40, 50];
    assign(&value!(["1", 2]), &mut v)?;
    assert_eq!(v, [1, 2]);

    assign(&value!([]), &mut v)?;
    assert!(v.is_empty());

    let mut grow = vec![1u8];
    assign(&value!([1, 2, 3, 4]), &mut grow)?;
    assert_eq!(grow, [1, 2, 3, 4]);
    Ok(())
}

#[test]
fn array_length_mismatch_fails_and_leaves_target_alone() {
    let mut a = [1i32, 2, 3];

    let err = assign(&value!([4, 5]), &mut a).unwrap_err();
    assert_eq!(
        err.reason(),
        Some(&Reason::LengthMismatch {
            expected: 3,
            actual: 2
        })
    );
    assert_eq!(a, [1, 2, 3]);

    let err = assign(&value!([4, 5, 6, 7]), &mut a).unwrap_err();
    assert!(matches!(err.reason(), Some(Reason::LengthMismatch { .. })));
    assert_eq!(a, [1, 2, 3]);
}

#[test]
fn strings_are_sequences_of_chars() -> Result<(), IPanic> {
    let mut codes: Vec<i32> = Vec::new();
    assign(&Value::from("123"), &mut codes)?;
    assert_eq!(codes, [49, 50, 51]);

    let mut raw: Vec<u8> = Vec::new();
    assign(&Value::from("34"), &mut raw)?;
    assert_eq!(raw, b"34");

    let mut chars = ['\0'; 2];
    assign(&Value::from("hé"), &mut chars)?;
    assert_eq!(chars, ['h', 'é']);

    let mut text = String::new();
    assign(&Value::from("123"), &mut text)?;
    assert_eq!(text, "123");
    Ok(())
}

#[test]
fn bytes_are_sequences_of_u8() -> Result<(), IPanic> {
    let mut v: Vec<u16> = Vec::new();
    assign(&Value::from(&b"\x01\xff"[..]), &mut v)?;
    assert_eq!(v, [1, 255]);
    Ok(())
}

#[test]
fn non_sequences_are_rejected() {
    let mut v: Vec<i32> = vec![1];
    let err = assign(&Value::I32(5), &mut v).unwrap_err();
    assert_eq!(err.reason(), Some(&Reason::NotASequence));
    assert_eq!(v, [1]);
}

#[test]
fn element_failure_aborts_with_its_index() {
    let mut v: Vec<u8> = Vec::new();
    let err = assign(&value!([1, "two", 3]), &mut v).unwrap_err();
    assert_eq!(err.path_string(), "[1]");
    assert_eq!(err.reason(), Some(&Reason::Unparsable));
    assert_eq!(v, [1, 0, 0]);
}

#[test]
fn nested_sequences() -> Result<(), IPanic> {
    let grid: Vec<[i32; 2]> = from_value(&value!([[1, 2], ["3", 4.5]]))?;
    assert_eq!(grid, [[1, 2], [3, 4]]);

    let err = from_value::<Vec<[i32; 2]>>(&value!([[1, 2], [3]])).unwrap_err();
    assert_eq!(err.path_string(), "[1]");
    Ok(())
}

#[test]
fn options_and_boxes_are_followed() -> Result<(), IPanic> {
    let mut o: Option<Vec<String>> = None;
    assign(&value!(["a", 1, true]), &mut o)?;
    assert_eq!(o.as_deref(), Some(&["a".to_string(), "1".into(), "true".into()][..]));

    let mut nested: Option<Option<u8>> = Some(None);
    assign(&Value::from("7"), &mut nested)?;
    assert_eq!(nested, Some(Some(7)));

    let mut b: Box<[u8; 2]> = Box::new([0, 0]);
    assign(&value!([1, 2]), &mut b)?;
    assert_eq!(*b, [1, 2]);
    Ok(())
}

#[test]
fn value_targets_take_anything() -> Result<(), IPanic> {
    let source = value!({"a": [1, null]});
    let mut target = Value::Null;
    assign(&source, &mut target)?;
    assert_eq!(target, source);

    let mut items: Vec<Value> = Vec::new();
    assign(&value!([1, "x", null]), &mut items)?;
    assert_eq!(items, [Value::I32(1), Value::from("x"), Value::Null]);
    Ok(())
}

#[test]
fn opaque_targets_need_a_shared_representation() -> Result<(), IPanic> {
    use core::net::{IpAddr, Ipv4Addr};

    let mut ip = IpAddr::zeroed();
    assign(&Value::from("192.168.0.1"), &mut ip)?;
    assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1)));

    let mut v4 = Ipv4Addr::UNSPECIFIED;
    assign(&Value::opaque(Ipv4Addr::LOCALHOST), &mut v4)?;
    assert_eq!(v4, Ipv4Addr::LOCALHOST);

    let err = assign(&Value::U32(1), &mut v4).unwrap_err();
    assert_eq!(err.reason(), Some(&Reason::Unsupported));
    assert_eq!(v4, Ipv4Addr::LOCALHOST);
    Ok(())
}

#[test]
fn user_opaques() -> Result<(), IPanic> {
    #[derive(Clone, Debug, PartialEq)]
    struct Celsius(f64);
    shapeshift::opaque!(Celsius, zero = Celsius(0.0));

    #[derive(Shaped, Debug)]
    struct Reading {
        at: Celsius,
    }

    let mut r = <Reading as Shaped>::zeroed();
    let source: Value = [("at".to_string(), Value::opaque(Celsius(21.5)))]
        .into_iter()
        .collect();
    assign(&source, &mut r)?;
    assert_eq!(r.at, Celsius(21.5));

    let err = assign(&value!({"at": 3.0}), &mut r).unwrap_err();
    assert_eq!(err.path_string(), ".at");
    Ok(())
}

#[test]
fn from_value_builds_fresh_targets() -> Result<(), IPanic> {
    let n: u64 = from_value(&Value::from("18446744073709551615"))?;
    assert_eq!(n, u64::MAX);

    let words: Vec<String> = from_value(&value!(["a", 'b', 3]))?;
    assert_eq!(words, ["a", "b", "3"]);

    let err: ShiftError = from_value::<i8>(&value!([1])).unwrap_err();
    assert_eq!(err.reason(), Some(&Reason::Unsupported));
    Ok(())
}

#[test]
fn records_reject_non_maps() {
    #[derive(Shaped, Debug)]
    struct Unit {
        a: u8,
    }

    let mut u = Unit { a: 1 };
    let err = assign(&value!([1]), &mut u).unwrap_err();
    assert_eq!(err.reason(), Some(&Reason::NotAMap));
    assert!(err.as_target().is_none());
    assert_eq!(u.a, 1);
}

/// A nullable indirection that never allocates on its own.
struct Handle(Option<u32>);

impl Shaped for Handle {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Handle",
        def: Def::Pointer(PointerDef {
            pointee: <u32 as Shaped>::SHAPE,
            nullable: true,
        }),
    };

    fn zeroed() -> Self {
        Handle(None)
    }
}

impl Reflect for Handle {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Pointer(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Pointer(self)
    }

    fn set_zero(&mut self) {
        self.0 = None;
    }
}

impl PointerAccess for Handle {
    fn pointee(&self) -> Option<&dyn Reflect> {
        self.0.as_ref().map(|v| v as &dyn Reflect)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.0.as_mut().map(|v| v as &mut dyn Reflect)
    }

    fn set_null(&mut self) {
        self.0 = None;
    }
}

#[test]
fn null_indirections_that_cannot_allocate_are_invalid_targets() -> Result<(), IPanic> {
    let mut handle = Handle(None);
    let err = assign(&Value::from("7"), &mut handle).unwrap_err();
    assert!(matches!(
        err.as_target(),
        Some(TargetError::NullPointer { shape }) if shape.type_identifier == "Handle"
    ));
    assert_eq!(err.to_string(), "invalid target: Handle<u32> is null");

    let mut handle = Handle(Some(1));
    assign(&Value::from("7"), &mut handle)?;
    assert_eq!(handle.0, Some(7));

    assign(&Value::Null, &mut handle)?;
    assert_eq!(handle.0, None);
    Ok(())
}
