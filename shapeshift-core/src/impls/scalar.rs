use bytes::Bytes;

use crate::{Def, Peek, Poke, Reflect, ScalarMut, ScalarRef, ScalarType, Shape, Shaped};

macro_rules! impl_copy_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Shaped for $ty {
                const SHAPE: &'static Shape = &Shape {
                    type_identifier: stringify!($ty),
                    def: Def::Scalar(ScalarType::$variant),
                };

                fn zeroed() -> Self {
                    <$ty>::default()
                }
            }

            impl Reflect for $ty {
                fn shape(&self) -> &'static Shape {
                    Self::SHAPE
                }

                fn peek(&self) -> Peek<'_> {
                    Peek::Scalar(ScalarRef::$variant(*self))
                }

                fn poke(&mut self) -> Poke<'_> {
                    Poke::Scalar(ScalarMut::$variant(self))
                }

                fn set_zero(&mut self) {
                    *self = Self::zeroed();
                }
            }
        )*
    };
}

impl_copy_scalar! {
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
}

impl Shaped for String {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "String",
        def: Def::Scalar(ScalarType::String),
    };

    fn zeroed() -> Self {
        String::new()
    }
}

impl Reflect for String {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(ScalarRef::String(self))
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(ScalarMut::String(self))
    }

    fn set_zero(&mut self) {
        self.clear();
    }
}

impl Shaped for Bytes {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Bytes",
        def: Def::Scalar(ScalarType::Bytes),
    };

    fn zeroed() -> Self {
        Bytes::new()
    }
}

impl Reflect for Bytes {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(ScalarRef::Bytes(self))
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(ScalarMut::Bytes(self))
    }

    fn set_zero(&mut self) {
        *self = Bytes::new();
    }
}
