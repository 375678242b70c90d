mod scalar;

mod sequence;

mod pointer;

mod opaque;
pub use opaque::{coerce_parsed, coerce_same};
