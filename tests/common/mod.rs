#![allow(dead_code)]

pub fn synchsafe(value: u32) -> [u8; 4] {
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

pub fn text_frame(id: &str, encoding: u8, content: &[u8]) -> Vec<u8> {
    let mut frame = id.as_bytes().to_vec();
    frame.extend_from_slice(&synchsafe(content.len() as u32 + 1));
    frame.extend_from_slice(&[0, 0]);
    frame.push(encoding);
    frame.extend_from_slice(content);
    frame
}

pub fn id3v2_tag(major: u8, frames: &[Vec<u8>]) -> Vec<u8> {
    let body = frames.concat();
    let mut tag = b"ID3".to_vec();
    tag.extend_from_slice(&[major, 0, 0]);
    tag.extend_from_slice(&synchsafe(body.len() as u32));
    tag.extend_from_slice(&body);
    tag
}

pub fn ogg_page(sequence: u32, header_type: u8, data: &[u8]) -> Vec<u8> {
    assert!(data.len() < 255, "test pages hold a single short packet");

    let mut page = b"OggS".to_vec();
    page.push(0);
    page.push(header_type);
    page.extend_from_slice(&[0; 8]);
    page.extend_from_slice(&1u32.to_le_bytes());
    page.extend_from_slice(&sequence.to_le_bytes());
    page.extend_from_slice(&[0; 4]);
    page.push(1);
    page.push(data.len() as u8);
    page.extend_from_slice(data);
    page
}

/// A minimal OGG/Vorbis file: identification page, comment page, one audio page
pub fn ogg_file(vendor: &str, comments: &[&str]) -> Vec<u8> {
    let mut packet = b"\x03vorbis".to_vec();
    packet.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    packet.extend_from_slice(vendor.as_bytes());
    packet.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for comment in comments {
        packet.extend_from_slice(&(comment.len() as u32).to_le_bytes());
        packet.extend_from_slice(comment.as_bytes());
    }
    packet.push(1);

    let mut file = ogg_page(0, 0x02, b"\x01vorbis\x00\x00\x00\x00\x01");
    file.extend(ogg_page(1, 0, &packet));
    file.extend(ogg_page(2, 0x04, &[0xAA; 16]));
    file
}
