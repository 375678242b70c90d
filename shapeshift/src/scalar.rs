//! The scalar converters: one function per primitive target.
//!
//! Every `to_*` function takes any [`Value`] and either produces the
//! requested primitive or a [`ShiftError`] saying why not. Numbers convert
//! between each other with `as` semantics (no range checks), except that
//! negative values never become unsigned. Text is parsed; booleans count
//! as `1` and `0`.
//!
//! Each converter comes with an `_or` variant returning a fallback on
//! error and a `must_` variant that panics instead.

use bytes::Bytes;
use shapeshift_core::{Number, ScalarMut, Value};

use crate::{Reason, Result, ShiftError};

fn unsupported(value: &Value, target: &'static str) -> ShiftError {
    ShiftError::conversion(value, target, Reason::Unsupported)
}

/// Parses an integer literal exactly, then falls back to a float literal.
fn parse_number(text: &str) -> Option<Number> {
    if let Ok(v) = text.parse::<i64>() {
        return Some(Number::Signed(v));
    }
    if let Ok(v) = text.parse::<u64>() {
        return Some(Number::Unsigned(v));
    }
    text.parse::<f64>().ok().map(Number::Float)
}

fn number(value: &Value, target: &'static str) -> Result<Number> {
    let unparsable = || ShiftError::conversion(value, target, Reason::Unparsable);
    match value {
        Value::Bool(b) => Ok(Number::Signed(i64::from(*b))),
        Value::String(s) => parse_number(s).ok_or_else(unparsable),
        Value::Bytes(b) => core::str::from_utf8(b)
            .ok()
            .and_then(parse_number)
            .ok_or_else(unparsable),
        other => other
            .as_number()
            .ok_or_else(|| unsupported(value, target)),
    }
}

fn finite(v: f64, value: &Value, target: &'static str) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ShiftError::conversion(value, target, Reason::NonFinite))
    }
}

macro_rules! signed_converters {
    ($($name:ident -> $ty:ident),* $(,)?) => {$(
        #[doc = concat!("Converts `value` into an `", stringify!($ty), "`.")]
        #[allow(clippy::unnecessary_cast)]
        pub fn $name(value: &Value) -> Result<$ty> {
            let target = stringify!($ty);
            Ok(match number(value, target)? {
                Number::Signed(v) => v as $ty,
                Number::Unsigned(v) => v as $ty,
                Number::Float(v) => finite(v, value, target)? as $ty,
            })
        }
    )*};
}

macro_rules! unsigned_converters {
    ($($name:ident -> $ty:ident),* $(,)?) => {$(
        #[doc = concat!("Converts `value` into a `", stringify!($ty), "`. Negative values are rejected.")]
        #[allow(clippy::unnecessary_cast)]
        pub fn $name(value: &Value) -> Result<$ty> {
            let target = stringify!($ty);
            let negative = || ShiftError::conversion(value, target, Reason::Negative);
            Ok(match number(value, target)? {
                Number::Signed(v) if v < 0 => return Err(negative()),
                Number::Signed(v) => v as $ty,
                Number::Unsigned(v) => v as $ty,
                Number::Float(v) => {
                    let v = finite(v, value, target)?;
                    if v < 0.0 {
                        return Err(negative());
                    }
                    v as $ty
                }
            })
        }
    )*};
}

macro_rules! float_converters {
    ($($name:ident -> $ty:ident),* $(,)?) => {$(
        #[doc = concat!("Converts `value` into an `", stringify!($ty), "`.")]
        #[allow(clippy::unnecessary_cast)]
        pub fn $name(value: &Value) -> Result<$ty> {
            Ok(match number(value, stringify!($ty))? {
                Number::Signed(v) => v as $ty,
                Number::Unsigned(v) => v as $ty,
                Number::Float(v) => v as $ty,
            })
        }
    )*};
}

signed_converters! {
    to_i8 -> i8,
    to_i16 -> i16,
    to_i32 -> i32,
    to_i64 -> i64,
    to_isize -> isize,
}

unsigned_converters! {
    to_u8 -> u8,
    to_u16 -> u16,
    to_u32 -> u32,
    to_u64 -> u64,
    to_usize -> usize,
}

float_converters! {
    to_f32 -> f32,
    to_f64 -> f64,
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => return Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => return Some(false),
        _ => {}
    }
    if let Ok(v) = text.parse::<f64>() {
        return Some(v != 0.0);
    }
    match text.trim().to_ascii_lowercase().as_str() {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

/// Converts `value` into a `bool`.
///
/// Numbers are `true` when non-zero, and so are chars other than `'\0'`,
/// which count as their code point. Text accepts the usual literals
/// (`"true"`, `"F"`, `"1"`), any float literal (non-zero is `true`) and
/// `"on"` / `"off"` in any case.
pub fn to_bool(value: &Value) -> Result<bool> {
    let unparsable = || ShiftError::conversion(value, "bool", Reason::Unparsable);
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => parse_bool(s).ok_or_else(unparsable),
        Value::Bytes(b) => core::str::from_utf8(b)
            .ok()
            .and_then(parse_bool)
            .ok_or_else(unparsable),
        Value::Char(c) => Ok(*c != '\0'),
        other => match other.as_number() {
            Some(Number::Signed(v)) => Ok(v != 0),
            Some(Number::Unsigned(v)) => Ok(v != 0),
            Some(Number::Float(v)) => Ok(v != 0.0),
            None => Err(unsupported(value, "bool")),
        },
    }
}

/// Converts `value` into a `char`: chars, one-character strings and
/// valid code points.
pub fn to_char(value: &Value) -> Result<char> {
    let invalid = || ShiftError::conversion(value, "char", Reason::InvalidChar);
    match value {
        Value::Char(c) => Ok(*c),
        Value::String(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(invalid()),
            }
        }
        other => match other.as_number() {
            Some(Number::Signed(v)) => u32::try_from(v)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(invalid),
            Some(Number::Unsigned(v)) => u32::try_from(v)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(invalid),
            _ => Err(unsupported(value, "char")),
        },
    }
}

/// Converts `value` into a `String`.
///
/// Scalars print in their canonical form (`-1`, `1.5`, `true`; integral
/// floats without a fractional part). Opaque values carrying a textual
/// representation use it. Bytes must be valid UTF-8.
pub fn to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bytes(b) => String::from_utf8(b.clone())
            .map_err(|_| ShiftError::conversion(value, "String", Reason::Unparsable)),
        Value::Opaque(o) => o
            .text()
            .map(str::to_owned)
            .ok_or_else(|| unsupported(value, "String")),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(unsupported(value, "String")),
        scalar => Ok(scalar.to_string()),
    }
}

/// Converts `value` into raw bytes, formatting scalars like [`to_string`].
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::Bytes(b) => Ok(b.clone()),
        _ => to_string(value)
            .map(String::into_bytes)
            .map_err(|e| retarget(e, "Bytes")),
    }
}

fn retarget(mut error: ShiftError, target: &'static str) -> ShiftError {
    if let crate::ShiftErrorKind::Conversion(e) = &mut error.kind {
        e.target_kind = target.into();
    }
    error
}

macro_rules! fallbacks {
    ($($name:ident, $or:ident, $must:ident -> $ty:ty;)*) => {$(
        #[doc = concat!("Like [`", stringify!($name), "`], returning `default` when the conversion fails.")]
        pub fn $or(value: &Value, default: $ty) -> $ty {
            $name(value).unwrap_or(default)
        }

        #[doc = concat!("Like [`", stringify!($name), "`], panicking when the conversion fails.")]
        #[track_caller]
        pub fn $must(value: &Value) -> $ty {
            match $name(value) {
                Ok(v) => v,
                Err(e) => panic!("{e}"),
            }
        }
    )*};
}

fallbacks! {
    to_bool, to_bool_or, must_bool -> bool;
    to_i8, to_i8_or, must_i8 -> i8;
    to_i16, to_i16_or, must_i16 -> i16;
    to_i32, to_i32_or, must_i32 -> i32;
    to_i64, to_i64_or, must_i64 -> i64;
    to_isize, to_isize_or, must_isize -> isize;
    to_u8, to_u8_or, must_u8 -> u8;
    to_u16, to_u16_or, must_u16 -> u16;
    to_u32, to_u32_or, must_u32 -> u32;
    to_u64, to_u64_or, must_u64 -> u64;
    to_usize, to_usize_or, must_usize -> usize;
    to_f32, to_f32_or, must_f32 -> f32;
    to_f64, to_f64_or, must_f64 -> f64;
    to_char, to_char_or, must_char -> char;
    to_string, to_string_or, must_string -> String;
    to_bytes, to_bytes_or, must_bytes -> Vec<u8>;
}

/// Writes `source` into a scalar slot through the matching converter.
pub(crate) fn write_scalar(source: &Value, slot: ScalarMut<'_>) -> Result<()> {
    match slot {
        ScalarMut::Bool(v) => *v = to_bool(source)?,
        ScalarMut::I8(v) => *v = to_i8(source)?,
        ScalarMut::I16(v) => *v = to_i16(source)?,
        ScalarMut::I32(v) => *v = to_i32(source)?,
        ScalarMut::I64(v) => *v = to_i64(source)?,
        ScalarMut::Isize(v) => *v = to_isize(source)?,
        ScalarMut::U8(v) => *v = to_u8(source)?,
        ScalarMut::U16(v) => *v = to_u16(source)?,
        ScalarMut::U32(v) => *v = to_u32(source)?,
        ScalarMut::U64(v) => *v = to_u64(source)?,
        ScalarMut::Usize(v) => *v = to_usize(source)?,
        ScalarMut::F32(v) => *v = to_f32(source)?,
        ScalarMut::F64(v) => *v = to_f64(source)?,
        ScalarMut::Char(v) => *v = to_char(source)?,
        ScalarMut::String(v) => *v = to_string(source)?,
        ScalarMut::Bytes(v) => *v = Bytes::from(to_bytes(source)?),
    }
    Ok(())
}
