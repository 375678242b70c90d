use shapeshift_core::Value;

use crate::scalar::to_i64;
use crate::{Reason, Result, ShiftError};

const TARGET: &str = "byte size";

/// Unit suffixes, lowercase, in powers of 1024.
const UNITS: &[(&str, i64)] = &[
    ("b", 1),
    ("byte", 1),
    ("k", 1 << 10),
    ("kb", 1 << 10),
    ("m", 1 << 20),
    ("mb", 1 << 20),
    ("g", 1 << 30),
    ("gb", 1 << 30),
    ("t", 1 << 40),
    ("tb", 1 << 40),
    ("p", 1 << 50),
    ("pb", 1 << 50),
];

/// Reads a byte count such as `"1Kb"` (1024) or `"0.1K"` (102.4, rounded
/// up to 103).
///
/// The unit suffix is case-insensitive. Text without a unit, and numbers,
/// go through [`to_i64`]. A size below one byte, or beyond `i64::MAX`
/// bytes, is an error.
///
/// ```
/// use shapeshift::{byte_size_of, Value};
///
/// assert_eq!(byte_size_of(&Value::from("5G"))?, 5 * 1024 * 1024 * 1024);
/// assert_eq!(byte_size_of(&Value::from("0.1k"))?, 103);
/// assert_eq!(byte_size_of(&Value::U32(42))?, 42);
/// assert!(byte_size_of(&Value::from("0.1b")).is_err());
/// # Ok::<(), shapeshift::ShiftError>(())
/// ```
pub fn byte_size_of(value: &Value) -> Result<i64> {
    match value {
        Value::String(text) => parse(value, text),
        Value::Bytes(bytes) => match core::str::from_utf8(bytes) {
            Ok(text) => parse(value, text),
            Err(_) => Err(ShiftError::conversion(value, TARGET, Reason::Unparsable)),
        },
        Value::Char(_) => Err(ShiftError::conversion(value, TARGET, Reason::Unsupported)),
        other if other.as_number().is_some() || matches!(other, Value::Bool(_)) => to_i64(value),
        _ => Err(ShiftError::conversion(value, TARGET, Reason::Unsupported)),
    }
}

fn parse(value: &Value, text: &str) -> Result<i64> {
    let split = match text.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(index) if index > 0 => index,
        _ => return to_i64(value),
    };
    let (number, unit) = text.split_at(split);

    let number: f64 = number
        .parse()
        .map_err(|_| ShiftError::conversion(value, TARGET, Reason::Unparsable))?;

    let lower = unit.to_ascii_lowercase();
    let Some(&(_, scale)) = UNITS.iter().find(|(name, _)| *name == lower) else {
        return Err(ShiftError::conversion(
            value,
            TARGET,
            Reason::UnknownUnit(unit.to_owned()),
        ));
    };

    let size = number * scale as f64;
    if size < 1.0 {
        return Err(ShiftError::conversion(
            value,
            TARGET,
            Reason::MeaninglessSize,
        ));
    }
    let size = size.ceil();
    if size >= i64::MAX as f64 {
        return Err(ShiftError::conversion(value, TARGET, Reason::Overflow));
    }
    Ok(size as i64)
}
