use core::any::Any;
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use core::str::FromStr;

use crate::{Def, OpaqueAccess, Peek, Poke, Reflect, Shape, Shaped, Value};

/// Coerces `source` into a `T` if it carries exactly a `T`.
#[doc(hidden)]
pub fn coerce_same<T: Any + Clone>(source: &Value) -> Option<T> {
    match source {
        Value::Opaque(o) => o.downcast_ref::<T>().cloned(),
        _ => None,
    }
}

/// Like [`coerce_same`], but also parses text sources with `FromStr`.
#[doc(hidden)]
pub fn coerce_parsed<T: Any + Clone + FromStr>(source: &Value) -> Option<T> {
    if let Some(same) = coerce_same(source) {
        return Some(same);
    }
    let text = match source {
        Value::String(s) => s.as_str(),
        Value::Bytes(b) => core::str::from_utf8(b).ok()?,
        Value::Opaque(o) => o.text()?,
        _ => return None,
    };
    text.parse().ok()
}

/// Registers a type as an opaque conversion target.
///
/// Opaque targets only accept sources carrying the very same type, or,
/// with the `parse` flag, any text the type's `FromStr` accepts. The
/// `zero` expression is what a null source resets the target to.
///
/// ```
/// use shapeshift_core::{OpaqueAccess, Value, opaque};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Celsius(f64);
///
/// opaque!(Celsius, zero = Celsius(0.0));
///
/// let mut t = Celsius(1.0);
/// assert!(t.coerce_from(&Value::opaque(Celsius(21.5))));
/// assert_eq!(t, Celsius(21.5));
/// assert!(!t.coerce_from(&Value::F64(3.0)));
/// ```
#[macro_export]
macro_rules! opaque {
    (@impl $ty:ty, $zero:expr, $coerce:ident, $wrap:ident) => {
        impl $crate::Shaped for $ty {
            const SHAPE: &'static $crate::Shape = &$crate::Shape {
                type_identifier: stringify!($ty),
                def: $crate::Def::Opaque,
            };

            fn zeroed() -> Self {
                $zero
            }
        }

        impl $crate::Reflect for $ty {
            fn shape(&self) -> &'static $crate::Shape {
                <Self as $crate::Shaped>::SHAPE
            }

            fn peek(&self) -> $crate::Peek<'_> {
                $crate::Peek::Opaque(self)
            }

            fn poke(&mut self) -> $crate::Poke<'_> {
                $crate::Poke::Opaque(self)
            }

            fn set_zero(&mut self) {
                *self = <Self as $crate::Shaped>::zeroed();
            }
        }

        impl $crate::OpaqueAccess for $ty {
            fn to_value(&self) -> $crate::Value {
                $crate::Value::$wrap(::core::clone::Clone::clone(self))
            }

            fn coerce_from(&mut self, source: &$crate::Value) -> bool {
                match $crate::$coerce::<$ty>(source) {
                    Some(value) => {
                        *self = value;
                        true
                    }
                    None => false,
                }
            }
        }
    };
    ($ty:ty, zero = $zero:expr) => {
        $crate::opaque!(@impl $ty, $zero, coerce_same, opaque);
    };
    ($ty:ty, zero = $zero:expr, parse) => {
        $crate::opaque!(@impl $ty, $zero, coerce_parsed, display);
    };
}

opaque!(IpAddr, zero = IpAddr::V4(Ipv4Addr::UNSPECIFIED), parse);
opaque!(Ipv4Addr, zero = Ipv4Addr::UNSPECIFIED, parse);
opaque!(Ipv6Addr, zero = Ipv6Addr::UNSPECIFIED, parse);
opaque!(SocketAddr, zero = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)), parse);

// `Value` is the target that accepts anything.
impl Shaped for Value {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Value",
        def: Def::Opaque,
    };

    fn zeroed() -> Self {
        Value::Null
    }
}

impl Reflect for Value {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Opaque(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Opaque(self)
    }

    fn set_zero(&mut self) {
        *self = Value::Null;
    }
}

impl OpaqueAccess for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn coerce_from(&mut self, source: &Value) -> bool {
        self.clone_from(source);
        true
    }
}
