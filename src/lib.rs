//! tagsniff - read metadata from Ogg/Vorbis comments and ID3v1/ID3v2 tags
//!
//! Every entry point takes a fully buffered file and returns a [`FieldMap`]
//! of lowercase field names (plus raw frame ids or user keys where no
//! standard name applies), or a classified [`Error`].
//!
//! ```rust
//! let mut buffer = vec![0u8; 200];
//! let tag = buffer.len() - 128;
//! buffer[tag..tag + 3].copy_from_slice(b"TAG");
//! buffer[tag + 3..tag + 9].copy_from_slice(b"Foobar");
//!
//! let fields = tagsniff::parse_id3(&buffer).unwrap();
//! assert_eq!(fields.get_text("title"), Some("Foobar"));
//! ```

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
pub mod field_mapping;
pub mod id3;
pub mod ogg;
pub mod utils;

pub use config::{ParseOptions, ParsingMode, TextDecoding};
pub use error::{Error, Result};
pub use field_mapping::{FieldMap, FieldValue, StandardField};

use id3::{Id3v1Tag, Id3v2Header, Id3v2Tag};
use utils::ByteView;

/// Read the Vorbis (or Opus) comment of an OGG file
///
/// The buffer must hold at least the first two pages. A missing comment page
/// is reported as [`Error::Bounds`].
pub fn parse_ogg(buffer: impl AsRef<[u8]>) -> Result<FieldMap> {
    parse_ogg_with(buffer, &ParseOptions::default())
}

pub fn parse_ogg_with(buffer: impl AsRef<[u8]>, options: &ParseOptions) -> Result<FieldMap> {
    ogg::read_comments(buffer.as_ref(), options)
}

/// Read an ID3v2 tag; the buffer must start with `"ID3"`
pub fn parse_id3v2(buffer: impl AsRef<[u8]>) -> Result<FieldMap> {
    parse_id3v2_with(buffer, &ParseOptions::default())
}

pub fn parse_id3v2_with(buffer: impl AsRef<[u8]>, options: &ParseOptions) -> Result<FieldMap> {
    Ok(Id3v2Tag::read(buffer.as_ref(), options)?.into_field_map())
}

/// Read the ID3v1 tag in the last 128 bytes of the buffer
///
/// Fails with [`Error::NoTag`] if there is none.
pub fn parse_id3v1(buffer: impl AsRef<[u8]>) -> Result<FieldMap> {
    Ok(Id3v1Tag::read(buffer.as_ref())?.into_field_map())
}

/// Read an ID3v2 tag if the buffer starts with one, otherwise an ID3v1 tag
///
/// A buffer with neither yields an empty map rather than an error.
pub fn parse_id3(buffer: impl AsRef<[u8]>) -> Result<FieldMap> {
    parse_id3_with(buffer, &ParseOptions::default())
}

pub fn parse_id3_with(buffer: impl AsRef<[u8]>, options: &ParseOptions) -> Result<FieldMap> {
    let buffer = buffer.as_ref();
    if ByteView::new(buffer).starts_with_at(0, &Id3v2Header::ID) {
        return parse_id3v2_with(buffer, options);
    }

    match parse_id3v1(buffer) {
        Err(Error::NoTag) => {
            log::debug!("No ID3 tag found");
            Ok(FieldMap::new())
        }
        other => other,
    }
}

/// Tag format, as detected from magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagFormat {
    Ogg,
    Id3v2,
    Id3v1,
    Unknown,
}

impl TagFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagFormat::Ogg => "OGG",
            TagFormat::Id3v2 => "ID3v2",
            TagFormat::Id3v1 => "ID3v1",
            TagFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TagFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect which tag reader applies to a buffer
pub fn detect_format(buffer: impl AsRef<[u8]>) -> TagFormat {
    let buffer = buffer.as_ref();
    let view = ByteView::new(buffer);

    if view.starts_with_at(0, ogg::OGG_SIGNATURE) {
        TagFormat::Ogg
    } else if view.starts_with_at(0, &Id3v2Header::ID) {
        TagFormat::Id3v2
    } else if Id3v1Tag::is_present(buffer) {
        TagFormat::Id3v1
    } else {
        TagFormat::Unknown
    }
}

/// Audio metadata structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub file_type: String,
    pub version: String,
    pub fields: FieldMap,
}

impl Metadata {
    pub fn get(&self, field: StandardField) -> Option<&FieldValue> {
        self.fields.standard(field)
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |name: StandardField| {
            self.get(name)
                .map_or_else(|| "None".to_string(), ToString::to_string)
        };

        write!(
            f,
            "Metadata(file_type={}, version={}, title={}, artist={}, album={})",
            self.file_type,
            self.version,
            field(StandardField::Title),
            field(StandardField::Artist),
            field(StandardField::Album)
        )
    }
}

/// An audio file loaded into memory
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub path: PathBuf,
    pub file_type: TagFormat,
    buffer: Vec<u8>,
}

impl AudioFile {
    /// Load a file and detect its tag format
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let buffer = utils::io::load_file(&path)?;
        Ok(Self::from_buffer(path, buffer))
    }

    /// Wrap a buffer that is already in memory
    pub fn from_buffer(path: impl Into<PathBuf>, buffer: Vec<u8>) -> Self {
        let file_type = detect_format(&buffer);
        AudioFile {
            path: path.into(),
            file_type,
            buffer,
        }
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Tag version, if the format has one worth reporting
    pub fn version(&self) -> Option<String> {
        let view = ByteView::new(&self.buffer);
        match self.file_type {
            TagFormat::Id3v2 => Id3v2Header::read(&view).ok().map(|h| h.version_string()),
            TagFormat::Id3v1 => Id3v1Tag::read(&self.buffer)
                .ok()
                .map(|tag| tag.version_string().to_string()),
            TagFormat::Ogg | TagFormat::Unknown => None,
        }
    }

    /// Read metadata using the reader matching the detected format
    pub fn read_metadata(&self, options: &ParseOptions) -> Result<Metadata> {
        let fields = match self.file_type {
            TagFormat::Ogg => parse_ogg_with(&self.buffer, options)?,
            TagFormat::Id3v2 | TagFormat::Id3v1 => parse_id3_with(&self.buffer, options)?,
            TagFormat::Unknown => FieldMap::new(),
        };

        Ok(Metadata {
            file_type: self.file_type.to_string(),
            version: self.version().unwrap_or_default(),
            fields,
        })
    }
}
