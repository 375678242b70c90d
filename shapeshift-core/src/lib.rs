//! Core types for `shapeshift`.
//!
//! - [`Value`]: the dynamic value conversions start from.
//! - [`Shape`] and [`Def`]: static descriptions of the types conversions
//!   write into.
//! - [`Reflect`] and [`Shaped`]: the introspection traits, with the
//!   [`Peek`] and [`Poke`] views they hand out.
//!
//! Most users want the `shapeshift` crate, which re-exports all of this
//! together with the conversion engine.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]

mod value;
pub use value::*;

mod shape;
pub use shape::*;

mod layout;
pub use layout::*;

mod reflect;
pub use reflect::*;

mod impls;
pub use impls::*;
