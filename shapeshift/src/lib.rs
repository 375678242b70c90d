#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![doc = include_str!("../README.md")]

// The derive emits `::shapeshift::` paths; this lets them resolve inside
// this crate's own tests too.
extern crate self as shapeshift;

pub use shapeshift_core::*;

#[cfg(feature = "derive")]
pub use shapeshift_macros::Shaped;

mod error;
pub use error::*;

pub mod scalar;

mod engine;
pub use engine::*;

mod record;
pub use record::*;

mod bytesize;
pub use bytesize::*;

mod slice;
pub use slice::*;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

/// Forwards to tracing::trace when the tracing feature is enabled
#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}
/// Forwards to tracing::debug when the tracing feature is enabled
#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use {debug, trace};
