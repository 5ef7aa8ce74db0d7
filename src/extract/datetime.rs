//! Capture timestamp extraction.
//!
//! The original capture time lives in the Exif sub-IFD (reached through the
//! pointer tag in IFD0) as `DateTimeOriginal`, a fixed-layout ASCII string
//! `"YYYY:MM:DD HH:MM:SS\0"` with no timezone information.

use chrono::{Datelike, NaiveDateTime};
use tracing::{debug, trace};

use crate::format::tiff::{ExifTag, Ifd, TiffHeader, ValueReader};
use crate::reader::ByteReader;

/// Declared count of a well-formed DateTimeOriginal value, terminator included.
const DATETIME_COUNT: u32 = 20;

/// Exact layout of the EXIF datetime string.
const DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Plausibility bound: anything outside this range is treated as a placeholder
/// or corrupted value, not a real capture time.
const YEAR_MIN: i32 = 2000;
const YEAR_MAX: i32 = 2100;

/// Extract the capture time from IFD0, if present and plausible.
///
/// Returns `None` on any failure: missing Exif sub-IFD pointer, missing or
/// malformed tag, unparseable string, or an out-of-range year.
pub(crate) fn extract_capture_time(
    tiff: &[u8],
    header: &TiffHeader,
    ifd0: &Ifd,
) -> Option<NaiveDateTime> {
    let reader = ByteReader::new(tiff);
    let values = ValueReader::new(tiff, header);

    let pointer = ifd0.get(ExifTag::ExifIfdPointer)?;
    let exif_ifd_offset = values.read_u32(pointer).ok()?;
    let exif_ifd = Ifd::parse(&reader, exif_ifd_offset as usize, header.byte_order);
    trace!(offset = exif_ifd_offset, entries = exif_ifd.len(), "parsed Exif sub-IFD");

    let entry = exif_ifd.get(ExifTag::DateTimeOriginal)?;
    if entry.count != DATETIME_COUNT {
        debug!(count = entry.count, "DateTimeOriginal has unexpected length, skipping");
        return None;
    }

    let raw = values.read_ascii(entry).ok()?;
    if !has_datetime_shape(&raw) {
        debug!(%raw, "DateTimeOriginal does not match the EXIF datetime layout");
        return None;
    }
    let parsed = match NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT) {
        Ok(parsed) => parsed,
        Err(_) => {
            debug!(%raw, "DateTimeOriginal is not a valid calendar date");
            return None;
        }
    };

    // Placeholder timestamps (epoch dates, camera defaults) are common in the
    // wild and must not be surfaced as real data.
    if !(YEAR_MIN..=YEAR_MAX).contains(&parsed.year()) {
        debug!(year = parsed.year(), "capture year outside plausible range");
        return None;
    }

    Some(parsed)
}

/// Check the fixed-width "YYYY:MM:DD HH:MM:SS" layout position by position.
///
/// chrono's numeric parsing skips leading whitespace and accepts
/// variable-width numbers, so a value like `" 2024:06:15 4:30:00"` would
/// slip through [`NaiveDateTime::parse_from_str`] alone. The EXIF layout is
/// fixed-width: digits everywhere except `:` at 4/7/13/16 and a space at 10.
fn has_datetime_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != 19 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 | 13 | 16 => b == b':',
        10 => b == b' ',
        _ => b.is_ascii_digit(),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ByteOrder;

    /// Build a TIFF base slice holding IFD0 -> Exif sub-IFD -> DateTimeOriginal.
    fn tiff_with_datetime(datetime: &[u8], declared_count: u32) -> Vec<u8> {
        let mut tiff = Vec::new();
        // Header
        tiff.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00]);
        tiff.extend_from_slice(&8u32.to_le_bytes());
        // IFD0 at 8: one entry pointing at the Exif sub-IFD (offset 26)
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x8769u16.to_le_bytes());
        tiff.extend_from_slice(&4u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&26u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        // Exif sub-IFD at 26: DateTimeOriginal at offset 44
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x9003u16.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes());
        tiff.extend_from_slice(&declared_count.to_le_bytes());
        tiff.extend_from_slice(&44u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        // Data area at 44
        tiff.extend_from_slice(datetime);
        tiff
    }

    fn extract(tiff: &[u8]) -> Option<NaiveDateTime> {
        let header = TiffHeader::parse(tiff).unwrap();
        let ifd0 = Ifd::parse(
            &ByteReader::new(tiff),
            header.ifd0_offset as usize,
            ByteOrder::LittleEndian,
        );
        extract_capture_time(tiff, &header, &ifd0)
    }

    #[test]
    fn test_valid_datetime() {
        let tiff = tiff_with_datetime(b"2024:06:15 14:30:00\0", 20);
        let dt = extract(&tiff).unwrap();
        assert_eq!(dt.to_string(), "2024-06-15 14:30:00");
    }

    #[test]
    fn test_wrong_declared_count() {
        let tiff = tiff_with_datetime(b"2024:06:15 14:30:00\0", 19);
        assert_eq!(extract(&tiff), None);
    }

    #[test]
    fn test_malformed_string() {
        let tiff = tiff_with_datetime(b"2024-06-15 14:30:00\0", 20);
        assert_eq!(extract(&tiff), None);
    }

    #[test]
    fn test_lax_spacing_rejected() {
        // 19 characters and parseable by a lenient numeric parser, but not
        // the fixed-width EXIF layout: leading space, one-digit hour.
        let tiff = tiff_with_datetime(b" 2024:06:15 4:30:00\0", 20);
        assert_eq!(extract(&tiff), None);
    }

    #[test]
    fn test_datetime_shape() {
        assert!(has_datetime_shape("2024:06:15 14:30:00"));
        assert!(!has_datetime_shape(" 2024:06:15 4:30:00"));
        assert!(!has_datetime_shape("2024:06:15T14:30:00"));
        assert!(!has_datetime_shape("2024:06:15 14:30:0"));
        assert!(!has_datetime_shape("2024:06:15 14:30:000"));
    }

    #[test]
    fn test_implausible_year() {
        let tiff = tiff_with_datetime(b"1899:01:01 00:00:00\0", 20);
        assert_eq!(extract(&tiff), None);
    }

    #[test]
    fn test_invalid_calendar_date() {
        let tiff = tiff_with_datetime(b"2024:13:40 25:99:99\0", 20);
        assert_eq!(extract(&tiff), None);
    }

    #[test]
    fn test_missing_exif_pointer() {
        // IFD0 with no entries at all.
        let mut tiff = Vec::new();
        tiff.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00]);
        tiff.extend_from_slice(&8u32.to_le_bytes());
        tiff.extend_from_slice(&0u16.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(extract(&tiff), None);
    }
}
