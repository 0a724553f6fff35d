// ID3v2 frame definitions and parsers

use crate::config::{ParseOptions, TextDecoding};
use crate::error::Result;
use crate::field_mapping::StandardField;
use crate::utils::encoding::{self, TextEncoding};
use crate::utils::ByteView;

/// Size of a frame header: id, size, flags
pub const FRAME_HEADER_SIZE: usize = 10;

/// Common ID3v2 frame identifiers
pub mod frame_ids {
    pub const ALBUM: &str = "TALB"; // Album/Movie/Show title
    pub const COMPOSER: &str = "TCOM"; // Composer
    pub const CONTENT_GROUP: &str = "TIT1"; // Content group description
    pub const TITLE: &str = "TIT2"; // Title/songname/content description
    pub const ARTIST: &str = "TPE1"; // Lead performer(s)/Soloist(s)
    pub const TRACK: &str = "TRCK"; // Track number/Position in set
    pub const ENCODER: &str = "TSSE"; // Software/Hardware and settings used for encoding
    pub const COPYRIGHT: &str = "TCOP"; // Copyright message
    pub const USER_TEXT: &str = "TXXX"; // User defined text information
}

/// Canonical field for a frame id, if it has one
///
/// TIT1 shares "title" with TIT2 and TCOP is reported as "year"; whichever
/// frame comes later in the tag wins.
pub fn standard_field(frame_id: &str) -> Option<StandardField> {
    match frame_id {
        frame_ids::ALBUM => Some(StandardField::Album),
        frame_ids::COMPOSER => Some(StandardField::Composer),
        frame_ids::CONTENT_GROUP | frame_ids::TITLE => Some(StandardField::Title),
        frame_ids::ARTIST => Some(StandardField::Artist),
        frame_ids::TRACK => Some(StandardField::Track),
        frame_ids::ENCODER => Some(StandardField::Encoder),
        frame_ids::COPYRIGHT => Some(StandardField::Year),
        _ => None,
    }
}

/// ID3v2 frame, with its content already decoded to text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3Frame {
    pub frame_id: String,
    /// Content size, excluding the frame header
    pub size: u32,
    pub flags: u16,
    pub encoding: Option<TextEncoding>,
    pub content: String,
}

impl Id3Frame {
    /// Read the frame starting at `offset`
    ///
    /// Returns `None` when the frame id is all zeros, which marks the start of padding.
    pub fn read(view: &ByteView<'_>, offset: usize, options: &ParseOptions) -> Result<Option<Self>> {
        let id_bytes = view.read_array::<4>(offset)?;
        if id_bytes == [0; 4] {
            return Ok(None);
        }

        let frame_id = view.read_ascii(offset, 4)?;
        let size = view.read_synchsafe(offset + 4)?;
        let flags = u16::from_be_bytes(view.read_array::<2>(offset + 8)?);

        let content_offset = offset + FRAME_HEADER_SIZE;
        let encoding = TextEncoding::from_byte(view.read_u8(content_offset)?);

        log::trace!(
            "Frame {} at offset {}: {} bytes, encoding {:?}",
            frame_id,
            offset,
            size,
            encoding
        );

        let content = match encoding {
            Some(encoding) => {
                // Encoding byte plus the string terminator
                let overhead = 1 + encoding.terminator_len();
                let text_len = (size as usize).saturating_sub(overhead);
                if text_len == 0 && size as usize != overhead {
                    log::debug!(
                        "Frame {} is too small ({} bytes) for its terminator",
                        frame_id,
                        size
                    );
                }

                let text = view.slice(content_offset + 1, text_len)?;
                if frame_id == frame_ids::USER_TEXT {
                    decode_user_text(text, encoding, options.text_decoding)
                } else {
                    decode_frame_text(text, encoding, options.text_decoding)
                }
            }
            // No encoding marker: the whole content is text
            None => view.read_ascii(content_offset, size as usize)?,
        };

        Ok(Some(Id3Frame {
            frame_id,
            size,
            flags,
            encoding,
            content,
        }))
    }

    /// Total bytes this frame occupies in the tag, header included
    pub fn total_size(&self) -> usize {
        FRAME_HEADER_SIZE + self.size as usize
    }

    /// Field name and value this frame contributes to a field map
    ///
    /// TXXX frames carry their own key, separated from the value by a NUL.
    pub fn into_field(self) -> (String, String) {
        if self.frame_id == frame_ids::USER_TEXT {
            return match self.content.split_once('\0') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (self.content, String::new()),
            };
        }

        let key = match standard_field(&self.frame_id) {
            Some(field) => field.as_str().to_string(),
            None => self.frame_id,
        };
        (key, self.content)
    }
}

fn decode_frame_text(text: &[u8], encoding: TextEncoding, mode: TextDecoding) -> String {
    match (encoding, mode) {
        (TextEncoding::Utf16 | TextEncoding::Utf16BE, TextDecoding::Legacy) => {
            encoding::decode_latin1(text)
        }
        _ => encoding::decode_text(text, encoding),
    }
}

/// Decode a TXXX description and value separately, joined by a NUL
///
/// Each half of a UTF-16 TXXX frame starts with its own byte order mark.
fn decode_user_text(text: &[u8], encoding: TextEncoding, mode: TextDecoding) -> String {
    match encoding::split_terminated(text, encoding) {
        (key, Some(value)) => format!(
            "{}\0{}",
            decode_frame_text(key, encoding, mode),
            decode_frame_text(value, encoding, mode)
        ),
        (key, None) => decode_frame_text(key, encoding, mode),
    }
}
