// Vorbis comment decoding
//
// Layout (all lengths little-endian u32):
// - vendor length, vendor string
// - comment count
// - per comment: length, "KEY=VALUE" in UTF-8

use crate::config::ParseOptions;
use crate::error::Result;
use crate::field_mapping::FieldMap;
use crate::utils::{ByteView, Endian};

/// Vorbis comment structure
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VorbisComment {
    pub vendor_string: String,
    pub comments: Vec<(String, String)>,
}

impl VorbisComment {
    /// Read a Vorbis comment from an assembled comment packet
    ///
    /// With [`ParsingMode::BestEffort`](crate::config::ParsingMode::BestEffort),
    /// a comment that runs past the end of the packet ends the list instead of
    /// failing the whole read.
    pub fn read(packet: &ByteView<'_>, options: &ParseOptions) -> Result<Self> {
        let vendor_length = packet.read_u32(0, Endian::Little)? as usize;
        let vendor_string = packet.read_utf8(4, vendor_length)?;

        let mut offset = 4 + vendor_length;
        let comment_count = packet.read_u32(offset, Endian::Little)?;
        offset += 4;

        log::debug!(
            "Vorbis comment block from {:?} with {} comments",
            vendor_string,
            comment_count
        );

        let mut comments = Vec::new();
        for index in 0..comment_count {
            match read_comment(packet, offset) {
                Ok((consumed, comment)) => {
                    offset += consumed;
                    match comment.split_once('=') {
                        Some((field, value)) => {
                            comments.push((field.to_string(), value.to_string()))
                        }
                        None => log::debug!("Skipping comment {} without '='", index),
                    }
                }
                Err(err) if options.best_effort() => {
                    log::warn!(
                        "Stopping at comment {} of {}: {}",
                        index,
                        comment_count,
                        err
                    );
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(VorbisComment {
            vendor_string,
            comments,
        })
    }

    /// Get a comment value by field name, ignoring case
    pub fn get(&self, field: &str) -> Option<&String> {
        self.comments
            .iter()
            .rev()
            .find(|(f, _)| f.eq_ignore_ascii_case(field))
            .map(|(_, v)| v)
    }

    /// Lowercase every key; later comments overwrite earlier ones
    pub fn into_field_map(self) -> FieldMap {
        let mut fields = FieldMap::new();
        for (field, value) in self.comments {
            fields.insert(field.to_lowercase(), value);
        }
        fields
    }
}

fn read_comment(packet: &ByteView<'_>, offset: usize) -> Result<(usize, String)> {
    let length = packet.read_u32(offset, Endian::Little)? as usize;
    let comment = packet.read_utf8(offset + 4, length)?;
    Ok((4 + length, comment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingMode;
    use crate::error::Error;
    use crate::ogg::tests::comment_packet;

    fn decode(packet: &[u8], options: &ParseOptions) -> Result<VorbisComment> {
        // Drop the "\x03vorbis" preamble added by the test helper
        VorbisComment::read(&ByteView::new(&packet[7..]), options)
    }

    #[test]
    fn test_single_comment() {
        let packet = comment_packet("", &["TITLE=Hello"]);
        let comment = decode(&packet, &ParseOptions::new()).unwrap();

        assert_eq!(comment.vendor_string, "");
        assert_eq!(comment.get("title"), Some(&"Hello".to_string()));

        let fields = comment.into_field_map();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get_text("title"), Some("Hello"));
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let packet = comment_packet("Lavf53.21.1", &["Equation=a=b+c", "Empty="]);
        let fields = decode(&packet, &ParseOptions::new()).unwrap().into_field_map();

        assert_eq!(fields.get_text("equation"), Some("a=b+c"));
        assert_eq!(fields.get_text("empty"), Some(""));
    }

    #[test]
    fn test_keys_are_lowercased_and_last_wins() {
        let packet = comment_packet("", &["ARTIST=One", "TrackNumber=1", "artist=Two"]);
        let fields = decode(&packet, &ParseOptions::new()).unwrap().into_field_map();

        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["artist", "tracknumber"]);
        assert_eq!(fields.get_text("artist"), Some("Two"));
    }

    #[test]
    fn test_utf8_values() {
        let packet = comment_packet("", &["ALBUM=Ménage à trois 東京"]);
        let fields = decode(&packet, &ParseOptions::new()).unwrap().into_field_map();
        assert_eq!(fields.get_text("album"), Some("Ménage à trois 東京"));
    }

    #[test]
    fn test_comment_without_separator_is_skipped() {
        let packet = comment_packet("", &["garbage", "GENRE=Chiptune"]);
        let fields = decode(&packet, &ParseOptions::new()).unwrap().into_field_map();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get_text("genre"), Some("Chiptune"));
    }

    #[test]
    fn test_count_past_end_of_packet() {
        let mut packet = comment_packet("", &["TITLE=Hello"]);
        // Claim two comments while only one is present
        packet[11] = 2;

        let err = decode(&packet, &ParseOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Bounds { .. }));

        let options = ParseOptions::new().parsing_mode(ParsingMode::BestEffort);
        let fields = decode(&packet, &options).unwrap().into_field_map();
        assert_eq!(fields.get_text("title"), Some("Hello"));
    }

    #[test]
    fn test_truncated_vendor_string() {
        let packet = [b'\x03', b'v', b'o', b'r', b'b', b'i', b's', 10, 0, 0, 0, b'x'];
        assert!(decode(&packet, &ParseOptions::new()).unwrap_err().is_truncation());
    }
}
