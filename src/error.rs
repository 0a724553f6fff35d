// Error types for tag decoding

use thiserror::Error;

/// Alias for `Result<T, tagsniff::Error>`
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while decoding a tag
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not something that can be read as a byte buffer
    #[error("invalid input: {0}")]
    InvalidInputType(String),

    /// An expected format signature was not found
    #[error("bad magic: expected {expected}")]
    BadMagic { expected: &'static str },

    /// A read would run past the end of the buffer
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {available} bytes")]
    Bounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    /// A frame, page or comment is structurally inconsistent
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// The buffer is well formed but carries no tag of the requested kind
    #[error("no tag present")]
    NoTag,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error comes from reading past the end of the data
    pub fn is_truncation(&self) -> bool {
        matches!(self, Error::Bounds { .. })
    }

    /// Whether this error only means "nothing to read", as opposed to corrupt data
    pub fn is_absent(&self) -> bool {
        matches!(self, Error::NoTag)
    }
}
