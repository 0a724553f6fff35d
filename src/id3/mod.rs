// ID3 metadata handling module
pub mod frames;
pub mod v1;
pub mod v2;

pub use frames::Id3Frame;
pub use v1::Id3v1Tag;
pub use v2::{Id3v2Flags, Id3v2Header, Id3v2Tag};
