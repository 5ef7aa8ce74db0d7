//! TIFF header and IFD structure parsing.
//!
//! The EXIF block inside a JPEG APP1 segment is a classic TIFF structure.
//! All offsets inside it (IFD positions, out-of-line tag values) are relative
//! to the first byte of the TIFF header, so the parser works over a slice
//! that starts exactly there.
//!
//! # TIFF Header Structure (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Magic number (42 = 0x002A)
//! Bytes 4-7: Offset of IFD0, relative to the header start
//! ```
//!
//! # IFD Structure
//! ```text
//! u16          entry count
//! N x 12 bytes entries: { tag: u16, type: u16, count: u32, value/offset: u32 }
//! u32          offset of the next IFD (unused here)
//! ```

use std::collections::HashMap;

use crate::error::ExifError;
use crate::reader::{ByteOrder, ByteReader};

use super::tags::{ExifTag, FieldType};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// TIFF magic number
const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
///
/// Carries the two facts every later read depends on: the byte order for
/// multi-byte values and the position of IFD0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the block
    pub byte_order: ByteOrder,

    /// Offset of IFD0, relative to the TIFF header start
    pub ifd0_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from the start of `tiff`.
    ///
    /// `tiff` must be the slice beginning at the TIFF base so that the
    /// embedded offsets can be used as direct indices into it.
    ///
    /// # Errors
    /// - `InvalidByteOrder` if bytes 0-1 are neither "II" nor "MM"
    /// - `InvalidMagic` if bytes 2-3 are not 42 in the detected order
    /// - `OutOfBounds` if fewer than 8 bytes are available
    pub fn parse(tiff: &[u8]) -> Result<Self, ExifError> {
        let reader = ByteReader::new(tiff);

        // The byte order marker is two identical bytes, so reading it
        // little-endian is safe before the order is known.
        let marker = reader.read_u16(0, ByteOrder::LittleEndian)?;
        let byte_order = match marker {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(ExifError::InvalidByteOrder(marker)),
        };

        let magic = reader.read_u16(2, byte_order)?;
        if magic != TIFF_MAGIC {
            return Err(ExifError::InvalidMagic(magic));
        }

        let ifd0_offset = reader.read_u32(4, byte_order)?;

        Ok(TiffHeader {
            byte_order,
            ifd0_offset,
        })
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// One decoded 12-byte IFD entry.
///
/// The last 4 bytes of an entry have a dual meaning: they hold the value
/// itself when the encoded size fits in 4 bytes, and an offset into the data
/// area otherwise. The raw bytes are kept as-is so inline values can be read
/// byte-wise and offsets decoded through the byte order only when the entry
/// is actually indirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Raw tag id
    pub tag_id: u16,

    /// Decoded field type, `None` if the raw type is unknown
    pub field_type: Option<FieldType>,

    /// Raw field type value as stored in the file
    pub field_type_raw: u16,

    /// Number of values of the field type
    pub count: u32,

    /// The 4 value/offset payload bytes, in file order
    pub value_offset_bytes: [u8; 4],

    /// Whether the payload bytes hold the value itself
    pub is_inline: bool,
}

impl IfdEntry {
    /// Decode the payload as an offset into the TIFF data area.
    ///
    /// Only meaningful when `is_inline` is false.
    #[inline]
    pub fn value_offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.read_u32(&self.value_offset_bytes)
    }

    /// Total encoded size of the value in bytes, `None` for unknown types.
    pub fn value_byte_size(&self) -> Option<u64> {
        let field_type = self.field_type?;
        Some(field_type.size_in_bytes() as u64 * self.count as u64)
    }
}

// =============================================================================
// Ifd
// =============================================================================

/// A parsed Image File Directory: a tag-keyed table of entries.
#[derive(Debug, Clone, Default)]
pub struct Ifd {
    entries: HashMap<u16, IfdEntry>,
}

impl Ifd {
    /// An IFD with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the IFD at `offset` (relative to the TIFF base).
    ///
    /// The walk is tolerant: a truncated entry count yields an empty
    /// directory, and a truncated entry stops the walk with the entries
    /// decoded so far. Duplicate tags keep the last occurrence, matching
    /// permissive real-world readers.
    pub fn parse(reader: &ByteReader<'_>, offset: usize, byte_order: ByteOrder) -> Ifd {
        let Ok(entry_count) = reader.read_u16(offset, byte_order) else {
            return Ifd::empty();
        };

        let mut entries = HashMap::with_capacity(entry_count as usize);
        for i in 0..entry_count as usize {
            let entry_offset = offset + 2 + i * IFD_ENTRY_SIZE;
            let Ok(entry) = Self::parse_entry(reader, entry_offset, byte_order) else {
                break;
            };
            entries.insert(entry.tag_id, entry);
        }

        Ifd { entries }
    }

    /// Decode one fixed 12-byte entry record.
    fn parse_entry(
        reader: &ByteReader<'_>,
        offset: usize,
        byte_order: ByteOrder,
    ) -> Result<IfdEntry, ExifError> {
        let tag_id = reader.read_u16(offset, byte_order)?;
        let field_type_raw = reader.read_u16(offset + 2, byte_order)?;
        let count = reader.read_u32(offset + 4, byte_order)?;
        let payload = reader.read_bytes(offset + 8, 4)?;

        let field_type = FieldType::from_u16(field_type_raw);
        let is_inline = field_type.is_some_and(|ft| ft.fits_inline(count));

        Ok(IfdEntry {
            tag_id,
            field_type,
            field_type_raw,
            count,
            value_offset_bytes: [payload[0], payload[1], payload[2], payload[3]],
            is_inline,
        })
    }

    /// Look up an entry by tag.
    pub fn get(&self, tag: ExifTag) -> Option<&IfdEntry> {
        self.entries.get(&tag.as_u16())
    }

    /// Number of entries decoded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
