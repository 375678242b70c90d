use core::fmt;

use crate::FieldLayout;

/// Static description of a type the converters can write into.
///
/// Every [`Shaped`](crate::Shaped) type has exactly one, living in static
/// memory.
#[derive(Clone, Copy)]
pub struct Shape {
    /// The bare type name, without generic parameters: `Vec`, `u32`, `Person`.
    pub type_identifier: &'static str,

    /// What kind of shape this is.
    pub def: Def,
}

impl Shape {
    /// The scalar kind, if this is a scalar shape.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self.def {
            Def::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// The record definition, if this is a record shape.
    pub fn record(&self) -> Option<&RecordDef> {
        match &self.def {
            Def::Record(def) => Some(def),
            _ => None,
        }
    }

    /// The sequence definition, if this is a sequence shape.
    pub fn sequence(&self) -> Option<&SequenceDef> {
        match &self.def {
            Def::Sequence(def) => Some(def),
            _ => None,
        }
    }

    /// The pointer definition, if this is an indirection.
    pub fn pointer(&self) -> Option<&PointerDef> {
        match &self.def {
            Def::Pointer(def) => Some(def),
            _ => None,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({self})")
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.def {
            Def::Sequence(SequenceDef {
                element,
                len: Some(len),
            }) => write!(f, "[{element}; {len}]"),
            Def::Sequence(SequenceDef { element, len: None }) => {
                write!(f, "{}<{element}>", self.type_identifier)
            }
            Def::Pointer(PointerDef { pointee, .. }) => {
                write!(f, "{}<{pointee}>", self.type_identifier)
            }
            _ => f.write_str(self.type_identifier),
        }
    }
}

/// The semantic definition of a shape: the closed set of target kinds the
/// engine dispatches on.
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// A leaf value written through the scalar converters.
    ///
    /// e.g. `u32`, `String`, `bool`, `bytes::Bytes`
    Scalar(ScalarType),

    /// A homogeneous sequence, either growable (`Vec<T>`) or of fixed
    /// length (`[T; N]`).
    Sequence(SequenceDef),

    /// A fixed set of named fields.
    ///
    /// e.g. any `#[derive(Shaped)]` struct
    Record(RecordDef),

    /// An indirection to be followed before dispatching.
    ///
    /// e.g. `Option<T>`, `Box<T>`
    Pointer(PointerDef),

    /// Anything else. Only direct representational coercion applies.
    ///
    /// e.g. `Value`, `IpAddr`
    Opaque,
}

/// The scalar kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `char`
    Char,
    /// `String`
    String,
    /// `bytes::Bytes`
    Bytes,
}

impl ScalarType {
    /// Whether this kind holds a signed integer.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            ScalarType::I8 | ScalarType::I16 | ScalarType::I32 | ScalarType::I64 | ScalarType::Isize
        )
    }

    /// Whether this kind holds an unsigned integer.
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            ScalarType::U8 | ScalarType::U16 | ScalarType::U32 | ScalarType::U64 | ScalarType::Usize
        )
    }
}

/// Definition of a sequence shape.
#[derive(Clone, Copy, Debug)]
pub struct SequenceDef {
    /// Shape of each element
    pub element: &'static Shape,

    /// `Some(n)` for arrays, `None` for growable sequences
    pub len: Option<usize>,
}

/// Definition of a record shape.
#[derive(Clone, Copy)]
pub struct RecordDef {
    /// The visible fields, in declaration order. Fields marked
    /// `#[shaped(skip)]` are not listed.
    pub fields: &'static [Field],

    /// The flattened field list, computed once per type.
    pub layout: fn() -> &'static FieldLayout,
}

impl RecordDef {
    /// The flattened field list of this record.
    pub fn layout(&self) -> &'static FieldLayout {
        (self.layout)()
    }

    /// Index of the direct field called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl fmt::Debug for RecordDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDef")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// A record field.
#[derive(Clone, Copy)]
pub struct Field {
    /// The field's name in the record
    pub name: &'static str,

    /// Shape of the field's type
    ///
    /// the layer of indirection allows for recursive records
    pub shape: fn() -> &'static Shape,

    /// An anonymous embedding: the field's own fields are promoted into
    /// the parent when mapping to and from key-value sources.
    pub flatten: bool,

    /// Visible when reading, never written when filling from a key-value
    /// source.
    pub readonly: bool,
}

impl Field {
    /// The shape of this field's type.
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("shape", &format_args!("{}", self.shape()))
            .field("flatten", &self.flatten)
            .field("readonly", &self.readonly)
            .finish()
    }
}

/// Definition of an indirection.
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// What the pointer points to
    pub pointee: &'static Shape,

    /// Whether the pointer can be null (`Option`) or not (`Box`)
    pub nullable: bool,
}
