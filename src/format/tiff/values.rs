//! TIFF tag value reading.
//!
//! Values are stored either inline in the IFD entry (when the encoded size
//! fits in the 4-byte payload) or at an offset into the TIFF data area. The
//! [`ValueReader`] resolves that split per entry and decodes the scalar
//! shapes the extractors need: ASCII strings, RATIONALs, and u32 pointers.

use crate::error::ExifError;
use crate::reader::{ByteOrder, ByteReader};

use super::parser::{IfdEntry, TiffHeader};
use super::tags::FieldType;

// =============================================================================
// ValueReader
// =============================================================================

/// Reads tag values from the TIFF block.
///
/// Bound to the slice starting at the TIFF base, so entry offsets can be
/// used as direct indices, and to the byte order from the header.
pub struct ValueReader<'a> {
    reader: ByteReader<'a>,
    byte_order: ByteOrder,
}

impl<'a> ValueReader<'a> {
    /// Create a ValueReader over the TIFF base slice.
    pub fn new(tiff: &'a [u8], header: &TiffHeader) -> Self {
        Self {
            reader: ByteReader::new(tiff),
            byte_order: header.byte_order,
        }
    }

    /// The byte order in effect.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Borrow the raw bytes of an entry's value.
    ///
    /// For inline values this is a view into the entry's payload bytes; for
    /// indirect values the bytes are fetched from the data area.
    pub fn value_bytes<'e>(&self, entry: &'e IfdEntry) -> Result<&'e [u8], ExifError>
    where
        'a: 'e,
    {
        let size = entry
            .value_byte_size()
            .ok_or_else(|| ExifError::InvalidTagValue {
                tag: entry.tag_id,
                message: format!("unknown field type {}", entry.field_type_raw),
            })?;

        if entry.is_inline {
            if size as usize > entry.value_offset_bytes.len() {
                return Err(ExifError::InvalidTagValue {
                    tag: entry.tag_id,
                    message: format!("inline entry claims {size} bytes"),
                });
            }
            Ok(&entry.value_offset_bytes[..size as usize])
        } else {
            let offset = entry.value_offset(self.byte_order) as usize;
            self.reader.read_bytes(offset, size as usize)
        }
    }

    /// Read a scalar u32 from an entry (SHORT or LONG, count 1).
    ///
    /// Used for the Exif and GPS sub-IFD pointers.
    pub fn read_u32(&self, entry: &IfdEntry) -> Result<u32, ExifError> {
        if entry.count != 1 {
            return Err(ExifError::InvalidTagValue {
                tag: entry.tag_id,
                message: format!("expected count 1, got {}", entry.count),
            });
        }

        let bytes = self.value_bytes(entry)?;
        match entry.field_type {
            Some(FieldType::Short) => Ok(self.byte_order.read_u16(bytes) as u32),
            Some(FieldType::Long) => Ok(self.byte_order.read_u32(bytes)),
            other => Err(ExifError::InvalidTagValue {
                tag: entry.tag_id,
                message: format!("expected Short or Long, got {:?}", other),
            }),
        }
    }

    /// Read an ASCII string value from an entry.
    ///
    /// The format's strings are NUL-terminated with the terminator included
    /// in `count`; the logical string is the `count - 1` bytes before it.
    pub fn read_ascii(&self, entry: &IfdEntry) -> Result<String, ExifError> {
        if entry.field_type != Some(FieldType::Ascii) {
            return Err(ExifError::InvalidTagValue {
                tag: entry.tag_id,
                message: format!("expected Ascii type, got {:?}", entry.field_type),
            });
        }

        let bytes = self.value_bytes(entry)?;
        let logical = (entry.count as usize).saturating_sub(1).min(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..logical]).into_owned())
    }

    /// Read one RATIONAL at an offset into the data area.
    ///
    /// A RATIONAL is two consecutive u32s, numerator then denominator.
    /// A zero denominator yields `0.0`; callers treat that as unusable in
    /// context rather than propagating a NaN or infinity.
    pub fn read_rational_at(&self, offset: usize) -> Result<f64, ExifError> {
        let numerator = self.reader.read_u32(offset, self.byte_order)?;
        let denominator = self.reader.read_u32(offset + 4, self.byte_order)?;

        if denominator == 0 {
            return Ok(0.0);
        }
        Ok(numerator as f64 / denominator as f64)
    }
}

// =============================================================================
// Tests
// =============================================================================
