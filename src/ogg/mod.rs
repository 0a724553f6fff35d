// OGG Vorbis comment support
//
// OGG File Structure:
// - OGG Page Header (27 bytes)
//   - Capture Pattern: "OggS" (4 bytes)
//   - Version: 0 (1 byte)
//   - Header Type: 1=continuation, 2=bos, 4=eos (1 byte)
//   - Granule Position (8 bytes)
//   - Bitstream Serial Number (4 bytes)
//   - Page Sequence Number (4 bytes)
//   - CRC Checksum (4 bytes)
//   - Number of Page Segments (1 byte)
//   - Segment Table (variable)
//
// Vorbis Structure:
// 1. Identification Header (first page)
// 2. Comment Header (second page) - Contains Vorbis Comment
// 3. Setup Header
// 4. Audio Data pages
//
// Opus streams follow the same layout with "OpusHead"/"OpusTags" packets.

pub mod page;
pub mod vorbis;

pub use page::{OggPage, OggPageHeader};
pub use vorbis::VorbisComment;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::field_mapping::FieldMap;
use crate::utils::ByteView;

pub const OGG_SIGNATURE: &[u8; 4] = b"OggS";
pub const OGG_PAGE_HEADER_SIZE: usize = 27;

/// Packet type 3 followed by the codec name
pub const VORBIS_COMMENT_HEADER: &[u8; 7] = b"\x03vorbis";
pub const OPUS_TAGS: &[u8; 8] = b"OpusTags";

pub(crate) const OGG_HEADER_TYPE_CONTINUATION: u8 = 0x01;
pub(crate) const OGG_HEADER_TYPE_BOS: u8 = 0x02;

/// Read the Vorbis comment of an OGG stream into a field map
pub fn read_comments(buffer: &[u8], options: &ParseOptions) -> Result<FieldMap> {
    let view = ByteView::new(buffer);
    let packet = page::read_comment_packet(&view)?;
    let comment = VorbisComment::read(&ByteView::new(&packet), options)?;
    Ok(comment.into_field_map())
}
