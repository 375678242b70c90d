//! The dynamic [`Value`] every conversion starts from.

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// A key-value source: string keys, insertion-ordered.
pub type Object = IndexMap<String, Value>;

/// A runtime-typed value of unknown static type.
///
/// The set of variants is closed: every primitive kind the converters
/// understand gets its own variant, and anything else travels as an
/// [`Opaque`] payload tagged with its type name.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absent value. Converting it always yields a zero value.
    #[default]
    Null,
    /// `true` or `false`
    Bool(bool),
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `isize`
    Isize(isize),
    /// `u8`
    U8(u8),
    /// `u16`
    U16(u16),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// `usize`
    Usize(usize),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// A single unicode scalar value
    Char(char),
    /// UTF-8 text
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// An ordered sequence of values
    Array(Vec<Value>),
    /// String-keyed values
    Object(Object),
    /// A value of some other type, carried by reference
    Opaque(Opaque),
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::I8`]
    I8,
    /// [`Value::I16`]
    I16,
    /// [`Value::I32`]
    I32,
    /// [`Value::I64`]
    I64,
    /// [`Value::Isize`]
    Isize,
    /// [`Value::U8`]
    U8,
    /// [`Value::U16`]
    U16,
    /// [`Value::U32`]
    U32,
    /// [`Value::U64`]
    U64,
    /// [`Value::Usize`]
    Usize,
    /// [`Value::F32`]
    F32,
    /// [`Value::F64`]
    F64,
    /// [`Value::Char`]
    Char,
    /// [`Value::String`]
    String,
    /// [`Value::Bytes`]
    Bytes,
    /// [`Value::Array`]
    Array,
    /// [`Value::Object`]
    Object,
    /// [`Value::Opaque`]
    Opaque,
}

impl ValueKind {
    /// Short human-readable name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::Isize => "isize",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::Usize => "usize",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Char => "char",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A number pulled out of a [`Value`], widened to 64 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Any signed integer (and `char` code points)
    Signed(i64),
    /// Any unsigned integer
    Unsigned(u64),
    /// Any float
    Float(f64),
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::Isize(_) => ValueKind::Isize,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::Usize(_) => ValueKind::Usize,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Char(_) => ValueKind::Char,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Opaque(_) => ValueKind::Opaque,
        }
    }

    /// The type name used when reporting this value: the kind name, or
    /// the carried type's name for opaques.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Opaque(o) => o.type_name(),
            other => other.kind().name(),
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The numeric payload, if this is a number or a `char`.
    ///
    /// Booleans are not numbers here; converters decide
    /// what `true` means for their target.
    pub fn as_number(&self) -> Option<Number> {
        Some(match *self {
            Value::I8(v) => Number::Signed(v.into()),
            Value::I16(v) => Number::Signed(v.into()),
            Value::I32(v) => Number::Signed(v.into()),
            Value::I64(v) => Number::Signed(v),
            Value::Isize(v) => Number::Signed(v as i64),
            Value::Char(c) => Number::Signed(u32::from(c).into()),
            Value::U8(v) => Number::Unsigned(v.into()),
            Value::U16(v) => Number::Unsigned(v.into()),
            Value::U32(v) => Number::Unsigned(v.into()),
            Value::U64(v) => Number::Unsigned(v),
            Value::Usize(v) => Number::Unsigned(v as u64),
            Value::F32(v) => Number::Float(v.into()),
            Value::F64(v) => Number::Float(v),
            _ => return None,
        })
    }

    /// Borrow the text of a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the entries of a [`Value::Object`].
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow the items of a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Wraps an arbitrary value as an opaque payload.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    /// Wraps a value that knows how to print itself. The text is captured
    /// up front so the string converters can use it.
    pub fn display<T: Any + Send + Sync + fmt::Display>(value: T) -> Self {
        Value::Opaque(Opaque::with_text(value))
    }
}

/// A value of a type outside [`Value`]'s closed set.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
    text: Option<Arc<str>>,
}

impl Opaque {
    /// Wraps `value` without a textual representation.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
            inner: Arc::new(value),
            text: None,
        }
    }

    /// Wraps `value` and remembers its `Display` output.
    pub fn with_text<T: Any + Send + Sync + fmt::Display>(value: T) -> Self {
        let text = value.to_string();
        Self {
            text: Some(text.into()),
            ..Self::new(value)
        }
    }

    /// Name of the carried type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The captured textual representation, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Borrow the payload as a `T`, if that is what it holds.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opaque")
            .field("type_name", &self.type_name)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::Isize(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::Usize(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Bytes(v) => write!(f, "{v:?}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
            Value::Opaque(o) => match o.text() {
                Some(text) => f.write_str(text),
                None => write!(f, "<{}>", o.type_name()),
            },
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
    Vec<u8> => Bytes,
    Vec<Value> => Array,
    Object => Object,
    Opaque => Opaque,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

/// Builds a [`Value`] with JSON-like syntax.
///
/// Negative numbers and other multi-token expressions need parentheses
/// when nested inside arrays or objects.
///
/// ```
/// use shapeshift_core::{Value, value};
///
/// let v = value!({
///     "name": "Alice",
///     "tags": ["a", "b"],
///     "delta": (-1),
///     "missing": null
/// });
/// assert_eq!(v.as_object().unwrap()["delta"], Value::I32(-1));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };
    ([ $($item:tt),* $(,)? ]) => {
        $crate::Value::Array(::std::vec![ $( $crate::value!($item) ),* ])
    };
    ({ $($key:literal : $item:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut object = $crate::Object::new();
        $( object.insert(::std::string::String::from($key), $crate::value!($item)); )*
        $crate::Value::Object(object)
    }};
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
