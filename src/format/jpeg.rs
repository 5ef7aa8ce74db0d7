//! JPEG marker scanning.
//!
//! A JPEG file is a sequence of marker segments. EXIF data is carried in an
//! APP1 segment whose payload starts with the ASCII signature `"Exif\0\0"`,
//! immediately followed by a TIFF header. This module walks the marker stream
//! to find that TIFF header.
//!
//! Segment lengths are always big-endian regardless of the TIFF byte order
//! declared later, and the length field counts itself (2 bytes) but not the
//! marker pair.

use crate::error::ExifError;
use crate::reader::{ByteOrder, ByteReader};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker byte (second byte of FFD9)
pub const EOI_BYTE: u8 = 0xD9;

/// Application segment 1 marker byte (second byte of FFE1); carries EXIF
pub const APP1_BYTE: u8 = 0xE1;

/// EXIF signature at the start of an APP1 payload
pub const EXIF_SIGNATURE: [u8; 6] = [0x45, 0x78, 0x69, 0x66, 0x00, 0x00];

// =============================================================================
// Segment Scanning
// =============================================================================

/// Find the TIFF header embedded in the first APP1/Exif segment.
///
/// Returns the absolute offset of the first TIFF header byte within `data`.
/// Multiple APP segments before the Exif one are tolerated; only an APP1
/// whose payload starts with `"Exif\0\0"` qualifies.
///
/// # Errors
/// `NoExifSegment` if the buffer is not a JPEG stream or carries no Exif
/// APP1 segment; `OutOfBounds` if the marker stream is truncated mid-segment.
pub fn find_exif_tiff(data: &[u8]) -> Result<usize, ExifError> {
    let reader = ByteReader::new(data);

    if data.len() < 4 || data[0..2] != SOI {
        return Err(ExifError::NoExifSegment);
    }

    // Walk marker pairs starting after SOI.
    let mut offset = 2;
    while offset + 1 < reader.len() {
        let prefix = reader.read_u8(offset)?;
        let marker = reader.read_u8(offset + 1)?;

        if prefix != 0xFF {
            offset += 2;
            continue;
        }

        match marker {
            APP1_BYTE => {
                let seg_len = reader.read_u16(offset + 2, ByteOrder::BigEndian)? as usize;
                let signature = reader.read_bytes(offset + 4, EXIF_SIGNATURE.len());
                if signature == Ok(&EXIF_SIGNATURE[..]) {
                    // marker (2) + length (2) + signature (6)
                    return Ok(offset + 10);
                }
                // Some other APP1 payload (e.g. XMP); skip the whole segment.
                offset += 2 + seg_len;
            }
            EOI_BYTE => return Err(ExifError::NoExifSegment),
            m if m >= 0xC0 => {
                // Any other marker with a declared length field.
                let seg_len = reader.read_u16(offset + 2, ByteOrder::BigEndian)? as usize;
                offset += 2 + seg_len;
            }
            _ => offset += 2,
        }
    }

    Err(ExifError::NoExifSegment)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn app1_exif_segment(tiff_payload: &[u8]) -> Vec<u8> {
        let mut seg = vec![0xFF, 0xE1];
        let len = 2 + EXIF_SIGNATURE.len() + tiff_payload.len();
        seg.extend_from_slice(&(len as u16).to_be_bytes());
        seg.extend_from_slice(&EXIF_SIGNATURE);
        seg.extend_from_slice(tiff_payload);
        seg
    }

    #[test]
    fn test_finds_tiff_in_first_app1() {
        let mut data = SOI.to_vec();
        data.extend_from_slice(&app1_exif_segment(&[0x49, 0x49]));
        assert_eq!(find_exif_tiff(&data).unwrap(), 12);
    }

    #[test]
    fn test_skips_non_exif_app_segments() {
        // JFIF APP0 first, then an APP1 holding XMP, then the Exif APP1.
        let mut data = SOI.to_vec();
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x04, 0x4A, 0x46]);
        data.extend_from_slice(&[0xFF, 0xE1, 0x00, 0x06, b'h', b't', b't', b'p']);
        let tiff_at = data.len() + 10;
        data.extend_from_slice(&app1_exif_segment(&[0x4D, 0x4D]));
        assert_eq!(find_exif_tiff(&data).unwrap(), tiff_at);
    }

    #[test]
    fn test_not_a_jpeg() {
        assert_eq!(
            find_exif_tiff(b"PNG and friends"),
            Err(ExifError::NoExifSegment)
        );
        assert_eq!(find_exif_tiff(&[0xFF, 0xD8]), Err(ExifError::NoExifSegment));
        assert_eq!(find_exif_tiff(&[]), Err(ExifError::NoExifSegment));
    }

    #[test]
    fn test_stops_at_eoi() {
        let mut data = SOI.to_vec();
        data.extend_from_slice(&[0xFF, 0xD9]);
        data.extend_from_slice(&app1_exif_segment(&[0x49, 0x49]));
        assert_eq!(find_exif_tiff(&data), Err(ExifError::NoExifSegment));
    }

    #[test]
    fn test_truncated_segment_length() {
        // APP1 marker with no length bytes behind it.
        let data = [0xFF, 0xD8, 0xFF, 0xE1];
        assert!(find_exif_tiff(&data).is_err());
    }

    #[test]
    fn test_no_exif_segment_before_end() {
        let mut data = SOI.to_vec();
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x02]);
        assert_eq!(find_exif_tiff(&data), Err(ExifError::NoExifSegment));
    }
}
