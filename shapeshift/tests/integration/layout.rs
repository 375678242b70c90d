//! Flattened field layouts.

use shapeshift::{Shaped, Value, value};
use shapeshift_testhelpers::test;

#[derive(Shaped, Debug, Default, PartialEq)]
struct Inner {
    a: u8,
    b: u8,
}

#[derive(Shaped, Debug, Default, PartialEq)]
struct Deep {
    #[shaped(flatten)]
    inner: Inner,
    c: u8,
}

#[derive(Shaped, Debug, Default, PartialEq)]
struct Other {
    a: u8,
    d: u8,
}

#[derive(Shaped, Debug, Default, PartialEq)]
struct Outer {
    #[shaped(flatten)]
    deep: Deep,
    #[shaped(flatten)]
    other: Other,
    b: u8,
}

fn names<T: Shaped>() -> Vec<&'static str> {
    T::SHAPE
        .record()
        .map(|def| def.layout().iter().map(|f| f.name).collect())
        .unwrap_or_default()
}

#[test]
fn promoted_fields_follow_their_embedding() {
    assert_eq!(names::<Deep>(), ["inner", "a", "b", "c"]);
}

#[test]
fn shallowest_wins_and_ties_are_unreachable() {
    // `b` is direct on Outer and shadows Inner's `b`; `a` sits two levels
    // deep in Deep but one level in Other, so Other's wins
    assert_eq!(names::<Outer>(), ["deep", "inner", "c", "other", "a", "d", "b"]);

    let layout = <Outer as Shaped>::SHAPE.record().map(|def| def.layout());
    let a = layout.and_then(|l| l.find("a"));
    assert_eq!(a.map(|f| (f.path.clone(), f.depth)), Some((vec![1, 0], 1)));
    assert!(layout.is_some_and(|l| l.find("inner").is_some_and(|f| f.embedded)));
}

#[test]
fn fills_follow_the_layout() {
    let mut o = Outer::default();
    shapeshift::assign(&value!({"a": 1, "b": 2, "c": 3, "d": 4}), &mut o).unwrap();
    assert_eq!(o.deep.inner, Inner { a: 0, b: 0 });
    assert_eq!(o.deep.c, 3);
    assert_eq!(o.other, Other { a: 1, d: 4 });
    assert_eq!(o.b, 2);

    let map = shapeshift::record_to_map(&o, None).unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), ["c", "a", "d", "b"]);
    assert_eq!(map["a"], Value::U8(1));
}

#[test]
fn ambiguous_names_are_skipped() {
    #[derive(Shaped, Debug, Default)]
    struct Left {
        x: u8,
    }

    #[derive(Shaped, Debug, Default)]
    struct Right {
        x: u8,
    }

    #[derive(Shaped, Debug, Default)]
    struct Both {
        #[shaped(flatten)]
        left: Left,
        #[shaped(flatten)]
        right: Right,
    }

    assert_eq!(names::<Both>(), ["left", "right"]);

    let mut both = Both::default();
    shapeshift::assign(&value!({"x": 5}), &mut both).unwrap();
    assert_eq!((both.left.x, both.right.x), (0, 0));
}

#[test]
fn shapes_describe_themselves() {
    assert_eq!(<Vec<u32> as Shaped>::SHAPE.to_string(), "Vec<u32>");
    assert_eq!(<[String; 4] as Shaped>::SHAPE.to_string(), "[String; 4]");
    assert_eq!(<Option<Outer> as Shaped>::SHAPE.to_string(), "Option<Outer>");
    insta::assert_snapshot!(
        format!("{:?}", <Inner as Shaped>::SHAPE.record().map(|d| d.fields)),
        @r#"Some([Field { name: "a", shape: u8, flatten: false, readonly: false }, Field { name: "b", shape: u8, flatten: false, readonly: false }])"#
    );
}
