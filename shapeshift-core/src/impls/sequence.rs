use crate::{Def, Peek, Poke, Reflect, SequenceAccess, SequenceDef, Shape, Shaped};

impl<T: Shaped> Shaped for Vec<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "Vec",
            def: Def::Sequence(SequenceDef {
                element: T::SHAPE,
                len: None,
            }),
        }
    };

    fn zeroed() -> Self {
        Vec::new()
    }
}

impl<T: Shaped> Reflect for Vec<T> {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Sequence(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Sequence(self)
    }

    fn set_zero(&mut self) {
        self.clear();
    }
}

impl<T: Shaped> SequenceAccess for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|e| e as &dyn Reflect)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|e| e as &mut dyn Reflect)
    }

    fn reset(&mut self, len: usize) {
        self.clear();
        self.resize_with(len, T::zeroed);
    }
}

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "array",
            def: Def::Sequence(SequenceDef {
                element: T::SHAPE,
                len: Some(N),
            }),
        }
    };

    fn zeroed() -> Self {
        core::array::from_fn(|_| T::zeroed())
    }
}

impl<T: Shaped, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Sequence(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Sequence(self)
    }

    fn set_zero(&mut self) {
        for element in self.iter_mut() {
            element.set_zero();
        }
    }
}

impl<T: Shaped, const N: usize> SequenceAccess for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|e| e as &dyn Reflect)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|e| e as &mut dyn Reflect)
    }

    fn reset(&mut self, _len: usize) {
        Reflect::set_zero(self);
    }
}
