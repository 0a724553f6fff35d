// Shared helpers: bounds-checked buffer access and text decoding
pub mod encoding;
pub mod io;

pub use io::{ByteView, Endian};
