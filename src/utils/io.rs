// Bounds-checked reads over an in-memory buffer

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::encoding;

/// Byte order for fixed-width integer reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Read-only, offset-addressed view over a byte buffer
///
/// Every read takes an absolute offset and fails with [`Error::Bounds`]
/// instead of truncating when the requested range leaves the buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteView { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Borrow `len` bytes starting at `offset`
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| bounds_error(offset, len, self.data.len()))
    }

    /// Read `N` bytes into a fixed array
    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice(offset, N)?);
        Ok(out)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        self.data
            .get(offset)
            .copied()
            .ok_or_else(|| bounds_error(offset, 1, self.data.len()))
    }

    pub fn read_u16(&self, offset: usize, endian: Endian) -> Result<u16> {
        let bytes = self.read_array::<2>(offset)?;
        Ok(match endian {
            Endian::Little => u16::from_le_bytes(bytes),
            Endian::Big => u16::from_be_bytes(bytes),
        })
    }

    pub fn read_u32(&self, offset: usize, endian: Endian) -> Result<u32> {
        let bytes = self.read_array::<4>(offset)?;
        Ok(match endian {
            Endian::Little => u32::from_le_bytes(bytes),
            Endian::Big => u32::from_be_bytes(bytes),
        })
    }

    /// Read a 28-bit synchsafe integer (7 significant bits per byte)
    ///
    /// The top bit of each byte is masked off rather than rejected, since
    /// plenty of encoders in the wild get it wrong.
    pub fn read_synchsafe(&self, offset: usize) -> Result<u32> {
        let bytes = self.read_array::<4>(offset)?;
        Ok(unsynch_u32(bytes))
    }

    /// Map each byte 1:1 to a character
    pub fn read_ascii(&self, offset: usize, len: usize) -> Result<String> {
        Ok(encoding::decode_latin1(self.slice(offset, len)?))
    }

    pub fn read_utf8(&self, offset: usize, len: usize) -> Result<String> {
        Ok(encoding::decode_utf8(self.slice(offset, len)?))
    }

    /// Copy `len` bytes starting at `offset` into an owned buffer
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<Vec<u8>> {
        Ok(self.slice(offset, len)?.to_vec())
    }

    /// Compare the bytes at `offset` against a signature
    ///
    /// Running off the end of the buffer simply doesn't match.
    pub fn starts_with_at(&self, offset: usize, signature: &[u8]) -> bool {
        self.slice(offset, signature.len())
            .map(|bytes| bytes == signature)
            .unwrap_or(false)
    }
}

/// Pack four synchsafe bytes into a 28-bit value
pub fn unsynch_u32(bytes: [u8; 4]) -> u32 {
    (u32::from(bytes[0] & 0x7F) << 21)
        | (u32::from(bytes[1] & 0x7F) << 14)
        | (u32::from(bytes[2] & 0x7F) << 7)
        | u32::from(bytes[3] & 0x7F)
}

/// Read a whole file into memory
///
/// Anything other than a regular file (a directory, a socket) is rejected
/// as [`Error::InvalidInputType`].
pub fn load_file(path: &Path) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(Error::InvalidInputType(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    Ok(fs::read(path)?)
}

fn bounds_error(offset: usize, len: usize, available: usize) -> Error {
    Error::Bounds {
        offset,
        len,
        available,
    }
}
