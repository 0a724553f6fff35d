use crate::error::{Error, Result};
use crate::ogg::{
    OGG_HEADER_TYPE_BOS, OGG_HEADER_TYPE_CONTINUATION, OGG_PAGE_HEADER_SIZE, OGG_SIGNATURE,
    OPUS_TAGS, VORBIS_COMMENT_HEADER,
};
use crate::utils::{ByteView, Endian};

/// OGG Page Header
#[derive(Debug, Clone)]
pub struct OggPageHeader {
    pub header_type: u8,
    pub granule_position: u64,
    pub bitstream_serial: u32,
    pub page_sequence: u32,
    pub crc: u32,
    pub segment_table: Vec<u8>,
}

/// OGG Page, borrowing its payload from the underlying buffer
#[derive(Debug, Clone)]
pub struct OggPage<'a> {
    pub header: OggPageHeader,
    pub offset: usize,
    pub data: &'a [u8],
}

impl OggPageHeader {
    /// Read an OGG page header starting at `offset`
    pub fn read(view: &ByteView<'_>, offset: usize) -> Result<Self> {
        if view.slice(offset, OGG_SIGNATURE.len())? != OGG_SIGNATURE {
            return Err(Error::BadMagic { expected: "OggS" });
        }

        let header_type = view.read_u8(offset + 5)?;
        let granule_position = u64::from_le_bytes(view.read_array::<8>(offset + 6)?);
        let bitstream_serial = view.read_u32(offset + 14, Endian::Little)?;
        let page_sequence = view.read_u32(offset + 18, Endian::Little)?;
        let crc = view.read_u32(offset + 22, Endian::Little)?;

        let segment_count = view.read_u8(offset + 26)? as usize;
        if segment_count == 0 {
            return Err(Error::MalformedFrame(format!(
                "OGG page at offset {} has an empty segment table",
                offset
            )));
        }
        let segment_table = view.read_bytes(offset + OGG_PAGE_HEADER_SIZE, segment_count)?;

        Ok(OggPageHeader {
            header_type,
            granule_position,
            bitstream_serial,
            page_sequence,
            crc,
            segment_table,
        })
    }

    /// Fixed header plus segment table
    pub fn header_size(&self) -> usize {
        OGG_PAGE_HEADER_SIZE + self.segment_table.len()
    }

    /// Calculate total page data size from segment table
    pub fn data_size(&self) -> usize {
        self.segment_table.iter().map(|&x| x as usize).sum()
    }

    /// Total size of the page, header included
    pub fn page_size(&self) -> usize {
        self.header_size() + self.data_size()
    }

    /// Length of the first packet on this page, and whether it ends here
    ///
    /// A packet ends at the first lacing value below 255.
    pub fn first_packet_len(&self) -> (usize, bool) {
        let mut len = 0;
        for &segment in &self.segment_table {
            len += segment as usize;
            if segment < 255 {
                return (len, true);
            }
        }
        (len, false)
    }

    pub fn is_continuation(&self) -> bool {
        self.header_type & OGG_HEADER_TYPE_CONTINUATION != 0
    }

    pub fn is_bos(&self) -> bool {
        self.header_type & OGG_HEADER_TYPE_BOS != 0
    }
}

impl<'a> OggPage<'a> {
    /// Read an OGG page, payload included, starting at `offset`
    pub fn read(view: &ByteView<'a>, offset: usize) -> Result<Self> {
        let header = OggPageHeader::read(view, offset)?;
        let data = view.slice(offset + header.header_size(), header.data_size())?;

        log::trace!(
            "OGG page {} at offset {}: {} segments, {} bytes",
            header.page_sequence,
            offset,
            header.segment_table.len(),
            data.len()
        );

        Ok(OggPage {
            header,
            offset,
            data,
        })
    }

    /// Offset of the page following this one
    pub fn next_offset(&self) -> usize {
        self.offset + self.header.page_size()
    }
}

/// Locate the comment header packet and return it without page framing
///
/// The identification header occupies the first page, so the comment packet
/// starts on the second. If that page ends mid-packet, continuation pages are
/// appended until the packet completes. The returned bytes start right after
/// the `\x03vorbis` (or `OpusTags`) preamble.
pub fn read_comment_packet(view: &ByteView<'_>) -> Result<Vec<u8>> {
    let first = OggPageHeader::read(view, 0)?;
    if !first.is_bos() {
        log::debug!("First OGG page is not marked as beginning of stream");
    }

    let mut offset = first.page_size();
    let mut packet = Vec::new();
    loop {
        let page = OggPage::read(view, offset)?;
        if !packet.is_empty() && !page.header.is_continuation() {
            return Err(Error::MalformedFrame(format!(
                "OGG page {} should continue the comment packet",
                page.header.page_sequence
            )));
        }

        let (len, complete) = page.header.first_packet_len();
        packet.extend_from_slice(&page.data[..len]);
        if complete {
            break;
        }
        offset = page.next_offset();
    }

    strip_comment_preamble(packet)
}

fn strip_comment_preamble(mut packet: Vec<u8>) -> Result<Vec<u8>> {
    let preamble_len = if packet.starts_with(VORBIS_COMMENT_HEADER) {
        VORBIS_COMMENT_HEADER.len()
    } else if packet.starts_with(OPUS_TAGS) {
        log::debug!("Found an Opus comment header");
        OPUS_TAGS.len()
    } else {
        return Err(Error::BadMagic {
            expected: "\\x03vorbis or OpusTags",
        });
    };

    packet.drain(..preamble_len);
    Ok(packet)
}
