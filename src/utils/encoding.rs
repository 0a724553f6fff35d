// Text decoding helpers

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8};

/// ID3v2 text encodings, as given by a frame's encoding byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Iso8859_1 = 0,
    Utf16 = 1,
    Utf16BE = 2,
    Utf8 = 3,
}

impl TextEncoding {
    /// Returns `None` for bytes outside `0..=3`, meaning the frame carries no encoding marker
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(TextEncoding::Iso8859_1),
            1 => Some(TextEncoding::Utf16),
            2 => Some(TextEncoding::Utf16BE),
            3 => Some(TextEncoding::Utf8),
            _ => None,
        }
    }

    /// Size of the string terminator for this encoding
    pub fn terminator_len(self) -> usize {
        match self {
            TextEncoding::Iso8859_1 | TextEncoding::Utf8 => 1,
            TextEncoding::Utf16 | TextEncoding::Utf16BE => 2,
        }
    }
}

/// Map each byte straight to the code point of the same value
///
/// This is exactly ISO-8859-1, which is why it is not routed through
/// `WINDOWS_1252` (that would remap 0x80..=0x9F).
pub fn decode_latin1(data: &[u8]) -> String {
    data.iter().map(|&b| char::from(b)).collect()
}

/// Decode UTF-8, replacing malformed sequences with U+FFFD
pub fn decode_utf8(data: &[u8]) -> String {
    UTF_8.decode_without_bom_handling(data).0.into_owned()
}

/// Decode UTF-16, honoring a byte order mark and defaulting to little endian
pub fn decode_utf16(data: &[u8]) -> String {
    match data {
        [0xFF, 0xFE, rest @ ..] => UTF_16LE.decode_without_bom_handling(rest).0.into_owned(),
        [0xFE, 0xFF, rest @ ..] => UTF_16BE.decode_without_bom_handling(rest).0.into_owned(),
        _ => UTF_16LE.decode_without_bom_handling(data).0.into_owned(),
    }
}

pub fn decode_utf16be(data: &[u8]) -> String {
    UTF_16BE.decode_without_bom_handling(data).0.into_owned()
}

/// Split `data` at the first string terminator for `encoding`
///
/// UTF-16 terminators are only matched on two byte boundaries. The second half
/// is `None` when no terminator is found.
pub fn split_terminated(data: &[u8], encoding: TextEncoding) -> (&[u8], Option<&[u8]>) {
    let width = encoding.terminator_len();
    let position = data
        .chunks_exact(width)
        .position(|unit| unit.iter().all(|&b| b == 0))
        .map(|index| index * width);

    match position {
        Some(end) => (&data[..end], Some(&data[end + width..])),
        None => (data, None),
    }
}

/// Decode text with the specified encoding
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Iso8859_1 => decode_latin1(data),
        TextEncoding::Utf16 => decode_utf16(data),
        TextEncoding::Utf16BE => decode_utf16be(data),
        TextEncoding::Utf8 => decode_utf8(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_from_byte() {
        assert_eq!(TextEncoding::from_byte(0), Some(TextEncoding::Iso8859_1));
        assert_eq!(TextEncoding::from_byte(3), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_byte(4), None);
        assert_eq!(TextEncoding::from_byte(b'A'), None);
    }

    #[test]
    fn test_latin1_is_one_to_one() {
        assert_eq!(decode_latin1(&[0x41, 0x80, 0xE9]), "A\u{80}é");
    }

    #[test]
    fn test_utf16_bom_detection() {
        // "Hé" little endian with BOM
        assert_eq!(decode_text(&[0xFF, 0xFE, 0x48, 0x00, 0xE9, 0x00], TextEncoding::Utf16), "Hé");
        // "Hé" big endian with BOM
        assert_eq!(decode_text(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0xE9], TextEncoding::Utf16), "Hé");
        // No BOM, little endian assumed
        assert_eq!(decode_text(&[0x48, 0x00], TextEncoding::Utf16), "H");
        assert_eq!(decode_text(&[0x00, 0x48], TextEncoding::Utf16BE), "H");
    }

    #[test]
    fn test_split_terminated() {
        assert_eq!(
            split_terminated(b"key\0value", TextEncoding::Utf8),
            (&b"key"[..], Some(&b"value"[..]))
        );
        assert_eq!(split_terminated(b"novalue", TextEncoding::Iso8859_1), (&b"novalue"[..], None));
        assert_eq!(
            split_terminated(&[0x41, 0x00, 0x00, 0x42, 0x00, 0x00, 0x43, 0x00], TextEncoding::Utf16),
            (&[0x41, 0x00, 0x00, 0x42][..], Some(&[0x43, 0x00][..]))
        );
    }

    #[test]
    fn test_utf8_multibyte() {
        assert_eq!(decode_text("日本語".as_bytes(), TextEncoding::Utf8), "日本語");
        assert_eq!(decode_utf8(&[0x61, 0xFF]), "a\u{FFFD}");
    }
}
