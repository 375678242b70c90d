mod bytesize;
mod engine;
mod errors;
mod layout;
mod slice;
