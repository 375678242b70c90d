//! The introspection traits and the read/write views they hand out.

use bytes::Bytes;

use crate::{Shape, Value};

/// A value whose shape can be inspected and whose contents can be read
/// and overwritten at runtime. Object safe.
pub trait Reflect {
    /// The static shape of this value's type.
    fn shape(&self) -> &'static Shape;

    /// A read view of this value.
    fn peek(&self) -> Peek<'_>;

    /// A write view of this value.
    fn poke(&mut self) -> Poke<'_>;

    /// Resets this value to the zero value of its shape.
    fn set_zero(&mut self);
}

/// A [`Reflect`] type with a statically known shape.
pub trait Shaped: Reflect + Sized + 'static {
    /// The shape of this type.
    const SHAPE: &'static Shape;

    /// The zero value of this type: `0`, `false`, empty, `None`, or a
    /// record with every field zeroed.
    fn zeroed() -> Self;
}

/// Growable or fixed-length sequences.
pub trait SequenceAccess: Reflect {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow element `index`.
    fn element(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutably borrow element `index`.
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Replaces the contents with `len` zero elements. Fixed-length
    /// sequences zero their elements and keep their length.
    fn reset(&mut self, len: usize);
}

/// Records: named fields, addressed by their index in
/// [`RecordDef::fields`](crate::RecordDef::fields).
pub trait RecordAccess: Reflect {
    /// Borrow field `index`.
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutably borrow field `index`.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

/// Indirections.
pub trait PointerAccess: Reflect {
    /// Borrow the pointee, or `None` if the pointer is null.
    fn pointee(&self) -> Option<&dyn Reflect>;

    /// Mutably borrow the pointee, or `None` if the pointer is null.
    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Mutably borrow the pointee, first pointing a null pointer at a
    /// fresh zero value if this pointer type can allocate one. `None` if
    /// the pointer stays null.
    fn pointee_or_insert(&mut self) -> Option<&mut dyn Reflect> {
        self.pointee_mut()
    }

    /// Makes the pointer null. Non-nullable pointers zero their pointee
    /// instead.
    fn set_null(&mut self);
}

/// Types only reachable through direct representational coercion.
pub trait OpaqueAccess: Reflect {
    /// This value as a dynamic [`Value`].
    fn to_value(&self) -> Value;

    /// Overwrites this value from `source` if the two share a
    /// representation. Returns `false`, leaving `self` untouched, if not.
    fn coerce_from(&mut self, source: &Value) -> bool;
}

/// A read view, one variant per shape.
pub enum Peek<'a> {
    /// A scalar value
    Scalar(ScalarRef<'a>),
    /// A sequence
    Sequence(&'a dyn SequenceAccess),
    /// A record
    Record(&'a dyn RecordAccess),
    /// An indirection
    Pointer(&'a dyn PointerAccess),
    /// Anything else
    Opaque(&'a dyn OpaqueAccess),
}

/// A write view, one variant per shape.
pub enum Poke<'a> {
    /// A scalar slot
    Scalar(ScalarMut<'a>),
    /// A sequence
    Sequence(&'a mut dyn SequenceAccess),
    /// A record
    Record(&'a mut dyn RecordAccess),
    /// An indirection
    Pointer(&'a mut dyn PointerAccess),
    /// Anything else
    Opaque(&'a mut dyn OpaqueAccess),
}

impl Poke<'_> {
    /// Resets the viewed value to its zero value.
    pub fn set_zero(self) {
        match self {
            Poke::Scalar(scalar) => scalar.set_zero(),
            Poke::Sequence(seq) => seq.set_zero(),
            Poke::Record(record) => record.set_zero(),
            Poke::Pointer(ptr) => ptr.set_zero(),
            Poke::Opaque(opaque) => opaque.set_zero(),
        }
    }
}

/// A scalar read by value (or by reference for the owned kinds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    /// `bool`
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
    /// `char`
    Char(char),
    /// `String`
    String(&'a str),
    /// `bytes::Bytes`
    Bytes(&'a [u8]),
}

impl ScalarRef<'_> {
    /// The scalar as a dynamic [`Value`].
    pub fn to_value(self) -> Value {
        match self {
            ScalarRef::Bool(v) => Value::Bool(v),
            ScalarRef::I8(v) => Value::I8(v),
            ScalarRef::I16(v) => Value::I16(v),
            ScalarRef::I32(v) => Value::I32(v),
            ScalarRef::I64(v) => Value::I64(v),
            ScalarRef::Isize(v) => Value::Isize(v),
            ScalarRef::U8(v) => Value::U8(v),
            ScalarRef::U16(v) => Value::U16(v),
            ScalarRef::U32(v) => Value::U32(v),
            ScalarRef::U64(v) => Value::U64(v),
            ScalarRef::Usize(v) => Value::Usize(v),
            ScalarRef::F32(v) => Value::F32(v),
            ScalarRef::F64(v) => Value::F64(v),
            ScalarRef::Char(v) => Value::Char(v),
            ScalarRef::String(v) => Value::String(v.to_owned()),
            ScalarRef::Bytes(v) => Value::Bytes(v.to_vec()),
        }
    }
}

/// A mutable scalar slot.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    /// `bool`
    Bool(&'a mut bool),
    /// `i8`
    I8(&'a mut i8),
    /// `i16`
    I16(&'a mut i16),
    /// `i32`
    I32(&'a mut i32),
    /// `i64`
    I64(&'a mut i64),
    /// `isize`
    Isize(&'a mut isize),
    /// `u8`
    U8(&'a mut u8),
    /// `u16`
    U16(&'a mut u16),
    /// `u32`
    U32(&'a mut u32),
    /// `u64`
    U64(&'a mut u64),
    /// `usize`
    Usize(&'a mut usize),
    /// `f32`
    F32(&'a mut f32),
    /// `f64`
    F64(&'a mut f64),
    /// `char`
    Char(&'a mut char),
    /// `String`
    String(&'a mut String),
    /// `bytes::Bytes`
    Bytes(&'a mut Bytes),
}

impl ScalarMut<'_> {
    /// Writes the zero value of the slot's kind.
    pub fn set_zero(self) {
        match self {
            ScalarMut::Bool(v) => *v = false,
            ScalarMut::I8(v) => *v = 0,
            ScalarMut::I16(v) => *v = 0,
            ScalarMut::I32(v) => *v = 0,
            ScalarMut::I64(v) => *v = 0,
            ScalarMut::Isize(v) => *v = 0,
            ScalarMut::U8(v) => *v = 0,
            ScalarMut::U16(v) => *v = 0,
            ScalarMut::U32(v) => *v = 0,
            ScalarMut::U64(v) => *v = 0,
            ScalarMut::Usize(v) => *v = 0,
            ScalarMut::F32(v) => *v = 0.0,
            ScalarMut::F64(v) => *v = 0.0,
            ScalarMut::Char(v) => *v = '\0',
            ScalarMut::String(v) => v.clear(),
            ScalarMut::Bytes(v) => *v = Bytes::new(),
        }
    }
}
