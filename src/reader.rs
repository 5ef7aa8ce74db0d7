//! Bounds-checked primitive reads over the raw image buffer.
//!
//! Every multi-byte access in the crate goes through [`ByteReader`]. This is
//! the single place where buffer-overrun risk is contained: no other module
//! computes and dereferences an offset on its own.

use crate::error::ExifError;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) declared by the TIFF header.
///
/// EXIF allows either order, selected by the first two bytes of the TIFF
/// header. All multi-byte values after that must be read respecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from the first two bytes of a slice using this byte order.
    ///
    /// The slice must hold at least 2 bytes; callers go through
    /// [`ByteReader`] which guarantees that.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes([bytes[0], bytes[1]]),
            ByteOrder::BigEndian => u16::from_be_bytes([bytes[0], bytes[1]]),
        }
    }

    /// Read a u32 from the first four bytes of a slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => {
                u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
            }
            ByteOrder::BigEndian => u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        }
    }
}

// =============================================================================
// ByteReader
// =============================================================================

/// Read-only view over an in-memory buffer with bounds-checked reads.
///
/// The reader borrows the buffer for the duration of extraction and never
/// mutates or retains it.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Wrap a buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total buffer length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// `OutOfBounds` if `offset + len` exceeds the buffer.
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], ExifError> {
        let end = offset.checked_add(len).ok_or(ExifError::OutOfBounds {
            offset,
            requested: len,
            size: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(ExifError::OutOfBounds {
                offset,
                requested: len,
                size: self.data.len(),
            });
        }
        Ok(&self.data[offset..end])
    }

    /// Read a single byte at `offset`.
    pub fn read_u8(&self, offset: usize) -> Result<u8, ExifError> {
        Ok(self.read_bytes(offset, 1)?[0])
    }

    /// Read a u16 at `offset` in the given byte order.
    pub fn read_u16(&self, offset: usize, byte_order: ByteOrder) -> Result<u16, ExifError> {
        Ok(byte_order.read_u16(self.read_bytes(offset, 2)?))
    }

    /// Read a u32 at `offset` in the given byte order.
    pub fn read_u32(&self, offset: usize, byte_order: ByteOrder) -> Result<u32, ExifError> {
        Ok(byte_order.read_u32(self.read_bytes(offset, 4)?))
    }
}

// =============================================================================
// Tests
// =============================================================================
