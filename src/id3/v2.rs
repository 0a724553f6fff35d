// ID3v2 tag implementation

use crate::config::ParseOptions;
use crate::error::{Error, Result};
use crate::field_mapping::FieldMap;
use crate::id3::frames::Id3Frame;
use crate::utils::ByteView;

/// ID3v2 header flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Id3v2Flags {
    pub unsynchronisation: bool,
    pub extended_header: bool,
    pub experimental: bool,
    pub footer: bool,
}

impl Id3v2Flags {
    pub fn from_byte(byte: u8) -> Self {
        Id3v2Flags {
            unsynchronisation: byte & 0x80 != 0,
            extended_header: byte & 0x40 != 0,
            experimental: byte & 0x20 != 0,
            footer: byte & 0x10 != 0,
        }
    }
}

/// ID3v2 header structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub flags: Id3v2Flags,
    /// Tag size, excluding this header
    pub size: u32,
}

/// ID3v2 tag structure
#[derive(Debug, Clone)]
pub struct Id3v2Tag {
    pub header: Id3v2Header,
    pub frames: Vec<Id3Frame>,
}

impl Id3v2Header {
    pub const HEADER_SIZE: usize = 10;
    pub const ID: [u8; 3] = [b'I', b'D', b'3'];

    /// Read the ID3v2 header at the start of the buffer
    pub fn read(view: &ByteView<'_>) -> Result<Self> {
        if view.read_array::<3>(0)? != Self::ID {
            return Err(Error::BadMagic { expected: "ID3" });
        }

        let version = (view.read_u8(3)?, view.read_u8(4)?);
        let flags = Id3v2Flags::from_byte(view.read_u8(5)?);
        let size = view.read_synchsafe(6)?;

        Ok(Id3v2Header {
            version,
            flags,
            size,
        })
    }

    /// Human readable version, e.g. "2.4.0"
    pub fn version_string(&self) -> String {
        format!("2.{}.{}", self.version.0, self.version.1)
    }
}

impl Id3v2Tag {
    /// Read an ID3v2 tag from the start of the buffer
    ///
    /// Frames are read until the declared tag size is used up or padding is
    /// reached. Each frame advances the cursor by its declared size, no matter
    /// how much of its content was decoded.
    pub fn read(buffer: &[u8], options: &ParseOptions) -> Result<Self> {
        let view = ByteView::new(buffer);
        let header = Id3v2Header::read(&view)?;

        log::debug!(
            "ID3v{} tag, {} bytes, flags {:?}",
            header.version_string(),
            header.size,
            header.flags
        );

        let mut offset = Id3v2Header::HEADER_SIZE;
        let end_of_tags = offset + header.size as usize;

        if header.flags.extended_header {
            let extended_size = view.read_synchsafe(offset)? as usize;
            log::debug!("Skipping {} byte extended header", extended_size);
            offset += extended_size;
        }

        let mut frames = Vec::new();
        while offset < end_of_tags {
            match Id3Frame::read(&view, offset, options) {
                Ok(Some(frame)) => {
                    offset += frame.total_size();
                    frames.push(frame);
                }
                Ok(None) => {
                    log::debug!("Reached padding at offset {}", offset);
                    break;
                }
                Err(err) if options.best_effort() => {
                    log::warn!("Failed to read frame at offset {}, stopping: {}", offset, err);
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Id3v2Tag { header, frames })
    }

    /// Map frames to fields; later frames overwrite earlier ones
    pub fn into_field_map(self) -> FieldMap {
        let mut fields = FieldMap::new();
        for frame in self.frames {
            let (key, value) = frame.into_field();
            fields.insert(key, value);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingMode;
    use crate::id3::tests::{id3v2_tag, synchsafe, text_frame};

    #[test]
    fn test_header_flags() {
        let flags = Id3v2Flags::from_byte(0xF0);
        assert!(flags.unsynchronisation && flags.extended_header);
        assert!(flags.experimental && flags.footer);

        let flags = Id3v2Flags::from_byte(0x40);
        assert_eq!(
            flags,
            Id3v2Flags {
                extended_header: true,
                ..Id3v2Flags::default()
            }
        );
    }

    #[test]
    fn test_read_header() {
        let tag = id3v2_tag(4, 0, &[text_frame("TIT2", 3, b"X\0")]);
        let header = Id3v2Header::read(&ByteView::new(&tag)).unwrap();

        assert_eq!(header.version, (4, 0));
        assert_eq!(header.version_string(), "2.4.0");
        assert_eq!(header.size as usize, tag.len() - 10);
    }

    #[test]
    fn test_bad_magic() {
        let err = Id3v2Tag::read(b"ID4\x04\x00\x00\x00\x00\x00\x00", &ParseOptions::new()).unwrap_err();
        assert!(matches!(err, Error::BadMagic { expected: "ID3" }));
    }

    #[test]
    fn test_title_and_artist() {
        let tag = id3v2_tag(
            4,
            0,
            &[text_frame("TIT2", 0, b"X\0"), text_frame("TPE1", 0, b"Y\0")],
        );
        let fields = Id3v2Tag::read(&tag, &ParseOptions::new()).unwrap().into_field_map();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get_text("title"), Some("X"));
        assert_eq!(fields.get_text("artist"), Some("Y"));
    }

    #[test]
    fn test_full_tag() {
        let tag = id3v2_tag(
            3,
            0,
            &[
                text_frame("TIT2", 0, b"Foobar\0"),
                text_frame("TPE1", 0, b"The Foobars\0"),
                text_frame("TALB", 0, b"FUBAR\0"),
                text_frame("TCOP", 0, b"2014\0"),
                text_frame("TSSE", 0, b"Lavf53.21.1\0"),
                text_frame("TRCK", 0, b"9\0"),
                text_frame("TXXX", 3, b"mood\0happy\0"),
                text_frame("TCON", 0, b"(255)\0"),
            ],
        );
        let fields = Id3v2Tag::read(&tag, &ParseOptions::new()).unwrap().into_field_map();

        assert_eq!(fields.get_text("title"), Some("Foobar"));
        assert_eq!(fields.get_text("artist"), Some("The Foobars"));
        assert_eq!(fields.get_text("album"), Some("FUBAR"));
        assert_eq!(fields.get_text("year"), Some("2014"));
        assert_eq!(fields.get_text("encoder"), Some("Lavf53.21.1"));
        assert_eq!(fields.get_text("track"), Some("9"));
        assert_eq!(fields.get_text("mood"), Some("happy"));
        assert_eq!(fields.get_text("TCON"), Some("(255)"));
        // Remapped frames are only exposed under their canonical name
        assert!(!fields.contains_key("TIT2"));
        assert!(!fields.contains_key("TXXX"));
    }

    #[test]
    fn test_empty_frame_does_not_abort_tag() {
        let tag = id3v2_tag(
            4,
            0,
            &[
                text_frame("TIT2", 0, b"X\0"),
                text_frame("TCON", 0, b""),
                text_frame("TPE1", 0, b"Y\0"),
            ],
        );
        let fields = Id3v2Tag::read(&tag, &ParseOptions::new()).unwrap().into_field_map();

        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["title", "TCON", "artist"]);
        assert_eq!(fields.get_text("TCON"), Some(""));
        assert_eq!(fields.get_text("artist"), Some("Y"));
    }

    #[test]
    fn test_later_frame_wins() {
        let tag = id3v2_tag(
            4,
            0,
            &[text_frame("TIT1", 0, b"Group\0"), text_frame("TIT2", 0, b"Song\0")],
        );
        let fields = Id3v2Tag::read(&tag, &ParseOptions::new()).unwrap().into_field_map();
        assert_eq!(fields.get_text("title"), Some("Song"));
    }

    #[test]
    fn test_skips_extended_header() {
        let frame = text_frame("TALB", 3, b"Album\0");
        let mut body = vec![0, 0, 0, 6, 0, 0];
        body.extend_from_slice(&frame);

        let mut tag = b"ID3\x04\x00\x40".to_vec();
        tag.extend_from_slice(&synchsafe(body.len() as u32));
        tag.extend_from_slice(&body);

        let fields = Id3v2Tag::read(&tag, &ParseOptions::new()).unwrap().into_field_map();
        assert_eq!(fields.get_text("album"), Some("Album"));
    }

    #[test]
    fn test_stops_at_padding() {
        let mut tag = id3v2_tag(4, 0, &[text_frame("TIT2", 0, b"X\0"), vec![0u8; 32]]);
        // Trailing audio frame sync after the padding must not be touched
        tag.extend_from_slice(&[0xFF, 0xFB]);

        let parsed = Id3v2Tag::read(&tag, &ParseOptions::new()).unwrap();
        assert_eq!(parsed.frames.len(), 1);
    }

    #[test]
    fn test_truncated_tag() {
        let mut tag = id3v2_tag(
            4,
            0,
            &[text_frame("TIT2", 0, b"X\0"), text_frame("TPE1", 0, b"Someone\0")],
        );
        tag.truncate(tag.len() - 4);

        let err = Id3v2Tag::read(&tag, &ParseOptions::new()).unwrap_err();
        assert!(err.is_truncation());

        let options = ParseOptions::new().parsing_mode(ParsingMode::BestEffort);
        let fields = Id3v2Tag::read(&tag, &options).unwrap().into_field_map();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get_text("title"), Some("X"));
        assert!(!fields.contains_key("artist"));
    }

    #[test]
    fn test_size_larger_than_buffer() {
        let mut tag = b"ID3\x04\x00\x00".to_vec();
        tag.extend_from_slice(&synchsafe(1000));
        tag.extend_from_slice(&text_frame("TIT2", 0, b"X\0"));

        assert!(Id3v2Tag::read(&tag, &ParseOptions::new()).unwrap_err().is_truncation());
    }
}
