use shapeshift_core::{Shaped, Value};

use crate::{Result, from_value};

/// Converts anything iterable into a list of values: arrays as they are,
/// strings as one [`Value::Char`] per char, bytes as one [`Value::U8`]
/// per byte. Null gives an empty list.
///
/// ```
/// use shapeshift::{Value, to_slice};
///
/// assert_eq!(to_slice(&Value::from("ab"))?, [Value::Char('a'), Value::Char('b')]);
/// # Ok::<(), shapeshift::ShiftError>(())
/// ```
pub fn to_slice(value: &Value) -> Result<Vec<Value>> {
    to_slice_of(value)
}

/// Like [`to_slice`], returning `default` when the conversion fails.
pub fn to_slice_or(value: &Value, default: Vec<Value>) -> Vec<Value> {
    to_slice(value).unwrap_or(default)
}

/// Like [`to_slice`], panicking when the conversion fails.
#[track_caller]
pub fn must_slice(value: &Value) -> Vec<Value> {
    match to_slice(value) {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

/// Converts anything iterable into a list of `T`, each element going
/// through [`assign`](crate::assign).
///
/// ```
/// use shapeshift::{to_slice_of, value};
///
/// let n: Vec<i64> = to_slice_of(&value!(["1", 2.9, true]))?;
/// assert_eq!(n, [1, 2, 1]);
/// # Ok::<(), shapeshift::ShiftError>(())
/// ```
pub fn to_slice_of<T: Shaped>(value: &Value) -> Result<Vec<T>> {
    from_value(value)
}
