use shapeshift::{Reason, Value, must_slice, to_slice, to_slice_of, to_slice_or, value};
use shapeshift_testhelpers::{IPanic, test};

#[test]
fn arrays_pass_through() -> Result<(), IPanic> {
    let items = to_slice(&value!([1, "a", null, [true]]))?;
    assert_eq!(
        items,
        [
            Value::I32(1),
            Value::from("a"),
            Value::Null,
            value!([true])
        ]
    );
    Ok(())
}

#[test]
fn text_and_bytes_split_into_elements() -> Result<(), IPanic> {
    assert_eq!(
        to_slice(&Value::from("123"))?,
        [Value::Char('1'), Value::Char('2'), Value::Char('3')]
    );
    assert_eq!(
        to_slice(&Value::from(&b"123"[..]))?,
        [Value::U8(49), Value::U8(50), Value::U8(51)]
    );
    Ok(())
}

#[test]
fn typed_slices_convert_each_element() -> Result<(), IPanic> {
    let n: Vec<u32> = to_slice_of(&value!(["1", 2.0, true, 'a']))?;
    assert_eq!(n, [1, 2, 1, 97]);

    let s: Vec<String> = to_slice_of(&value!([1, 1.5, false]))?;
    assert_eq!(s, ["1", "1.5", "false"]);

    let nested: Vec<Vec<i8>> = to_slice_of(&value!([[1], [], ["-2", 3]]))?;
    assert_eq!(nested, [vec![1i8], vec![], vec![-2, 3]]);
    Ok(())
}

#[test]
fn null_is_empty() -> Result<(), IPanic> {
    assert!(to_slice(&Value::Null)?.is_empty());
    assert!(to_slice_of::<u8>(&Value::Null)?.is_empty());
    Ok(())
}

#[test]
fn scalars_are_not_sequences() {
    assert_eq!(
        to_slice(&Value::I32(1)).unwrap_err().reason(),
        Some(&Reason::NotASequence)
    );
    let err = to_slice_of::<u8>(&value!([1, (-1)])).unwrap_err();
    assert_eq!(err.reason(), Some(&Reason::Negative));
    assert_eq!(err.path_string(), "[1]");
}

#[test]
fn slice_fallbacks() {
    assert_eq!(to_slice_or(&Value::I32(1), vec![Value::Null]), [Value::Null]);
    assert_eq!(to_slice_or(&value!([1]), Vec::new()), [Value::I32(1)]);
    assert_eq!(must_slice(&Value::from("x")), [Value::Char('x')]);
}

#[test]
#[should_panic(expected = "source is not a sequence")]
fn must_slice_panics_on_scalars() {
    must_slice(&Value::Bool(true));
}
