use crate::{Def, Peek, PointerAccess, PointerDef, Poke, Reflect, Shape, Shaped};

impl<T: Shaped> Shaped for Option<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "Option",
            def: Def::Pointer(PointerDef {
                pointee: T::SHAPE,
                nullable: true,
            }),
        }
    };

    fn zeroed() -> Self {
        None
    }
}

impl<T: Shaped> Reflect for Option<T> {
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
        *self = None;
    }
}

impl<T: Shaped> PointerAccess for Option<T> {
    fn pointee(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|v| v as &dyn Reflect)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|v| v as &mut dyn Reflect)
    }

    fn pointee_or_insert(&mut self) -> Option<&mut dyn Reflect> {
        Some(self.get_or_insert_with(T::zeroed) as &mut dyn Reflect)
    }

    fn set_null(&mut self) {
        *self = None;
    }
}

impl<T: Shaped> Shaped for Box<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "Box",
            def: Def::Pointer(PointerDef {
                pointee: T::SHAPE,
                nullable: false,
            }),
        }
    };

    fn zeroed() -> Self {
        Box::new(T::zeroed())
    }
}

impl<T: Shaped> Reflect for Box<T> {
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
        T::set_zero(self);
    }
}

impl<T: Shaped> PointerAccess for Box<T> {
    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(&**self as &dyn Reflect)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self as &mut dyn Reflect)
    }

    fn set_null(&mut self) {
        T::set_zero(self);
    }
}
