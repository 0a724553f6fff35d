// ID3v1 tag implementation

use crate::error::{Error, Result};
use crate::field_mapping::FieldMap;
use crate::utils::encoding;
use crate::utils::ByteView;

/// ID3v1 tag structure
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Id3v1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    /// Only present in ID3v1.1 tags
    pub track: Option<u8>,
    pub genre: u8,
}

impl Id3v1Tag {
    pub const TAG_SIZE: usize = 128;
    pub const TAG_ID: [u8; 3] = [b'T', b'A', b'G'];

    /// Read the ID3v1 tag occupying the last 128 bytes of the buffer
    pub fn read(buffer: &[u8]) -> Result<Self> {
        if buffer.len() < Self::TAG_SIZE {
            return Err(Error::NoTag);
        }

        let view = ByteView::new(buffer);
        let tag = view.read_array::<128>(buffer.len() - Self::TAG_SIZE)?;
        if tag[..3] != Self::TAG_ID {
            return Err(Error::NoTag);
        }

        Ok(Self::parse(&tag))
    }

    /// Whether the buffer ends with an ID3v1 tag
    pub fn is_present(buffer: &[u8]) -> bool {
        buffer.len() >= Self::TAG_SIZE
            && buffer[buffer.len() - Self::TAG_SIZE..].starts_with(&Self::TAG_ID)
    }

    fn parse(buffer: &[u8; 128]) -> Self {
        let title = Self::parse_string(&buffer[3..33]);
        let artist = Self::parse_string(&buffer[33..63]);
        let album = Self::parse_string(&buffer[63..93]);
        let year = Self::parse_string(&buffer[93..97]);

        // ID3v1.1: a zero byte followed by a non-zero track number ends the comment
        let (comment, track) = if buffer[125] == 0 && buffer[126] != 0 {
            (Self::parse_string(&buffer[97..125]), Some(buffer[126]))
        } else {
            (Self::parse_string(&buffer[97..127]), None)
        };

        let genre = buffer[127];

        Id3v1Tag {
            title,
            artist,
            album,
            year,
            comment,
            track,
            genre,
        }
    }

    /// Cut at the first NUL, then drop trailing spaces
    fn parse_string(bytes: &[u8]) -> String {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        encoding::decode_latin1(&bytes[..end])
            .trim_end_matches(' ')
            .to_string()
    }

    pub fn version_string(&self) -> &'static str {
        if self.track.is_some() {
            "1.1"
        } else {
            "1.0"
        }
    }

    pub fn into_field_map(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("title", self.title);
        fields.insert("artist", self.artist);
        fields.insert("album", self.album);
        fields.insert("year", self.year);
        fields.insert("comment", self.comment);
        fields.insert("track", self.track);
        fields.insert("genre", self.genre);
        fields
    }
}
