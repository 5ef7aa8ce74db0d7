//! GPS position extraction.
//!
//! GPS data lives in its own sub-IFD reached through the pointer tag in IFD0.
//! Latitude and longitude are each stored as three RATIONALs (degrees,
//! minutes, seconds) plus a one-character hemisphere reference. All four
//! fields must be present; partial GPS data is not usable.

use serde::Serialize;
use tracing::{debug, trace};

use crate::format::tiff::{ExifTag, FieldType, Ifd, IfdEntry, TiffHeader, ValueReader};
use crate::reader::ByteReader;

// =============================================================================
// GpsCoordinates
// =============================================================================

/// A decoded GPS position in decimal degrees.
///
/// Values are rounded to 6 decimal places (~0.11 m) so that repeated
/// extraction, storage, and comparison stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsCoordinates {
    /// Latitude in [-90, 90]; negative is the southern hemisphere
    pub lat: f64,
    /// Longitude in [-180, 180]; negative is the western hemisphere
    pub lng: f64,
}

// =============================================================================
// Extraction
// =============================================================================

/// Extract the GPS position from IFD0, if present and valid.
///
/// Returns `None` when the GPS sub-IFD or any of its four required fields is
/// missing, when a coordinate falls outside the valid range, or when the
/// position is exactly (0, 0) - the no-fix sentinel many cameras write
/// instead of omitting the tags.
pub(crate) fn extract_gps(tiff: &[u8], header: &TiffHeader, ifd0: &Ifd) -> Option<GpsCoordinates> {
    let reader = ByteReader::new(tiff);
    let values = ValueReader::new(tiff, header);

    let pointer = ifd0.get(ExifTag::GpsIfdPointer)?;
    let gps_ifd_offset = values.read_u32(pointer).ok()?;
    let gps_ifd = Ifd::parse(&reader, gps_ifd_offset as usize, header.byte_order);
    trace!(offset = gps_ifd_offset, entries = gps_ifd.len(), "parsed GPS sub-IFD");

    let lat_ref = hemisphere(gps_ifd.get(ExifTag::GpsLatitudeRef)?)?;
    let lng_ref = hemisphere(gps_ifd.get(ExifTag::GpsLongitudeRef)?)?;
    let lat = dms_to_decimal(&values, gps_ifd.get(ExifTag::GpsLatitude)?)?;
    let lng = dms_to_decimal(&values, gps_ifd.get(ExifTag::GpsLongitude)?)?;

    let lat = if lat_ref == b'S' { -lat } else { lat };
    let lng = if lng_ref == b'W' { -lng } else { lng };

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        debug!(lat, lng, "GPS position outside valid coordinate ranges");
        return None;
    }
    // (0, 0) is the canonical "no fix" sentinel, not a real location.
    if lat == 0.0 && lng == 0.0 {
        debug!("GPS position is the (0, 0) no-fix sentinel, skipping");
        return None;
    }

    Some(GpsCoordinates {
        lat: round_coordinate(lat),
        lng: round_coordinate(lng),
    })
}

/// Decode a hemisphere reference entry into its ASCII character.
///
/// Refs are declared as ASCII with count 2 ("N\0" etc.), which always fits
/// inline. The character is the first payload byte in file order; reading it
/// byte-wise keeps the decode correct under both byte orders.
fn hemisphere(entry: &IfdEntry) -> Option<u8> {
    if entry.field_type != Some(FieldType::Ascii) || !entry.is_inline {
        return None;
    }
    Some(entry.value_offset_bytes[0])
}

/// Decode a degrees/minutes/seconds RATIONAL triple into decimal degrees.
///
/// The triple is 24 bytes and therefore always offset-based.
fn dms_to_decimal(values: &ValueReader<'_>, entry: &IfdEntry) -> Option<f64> {
    if entry.field_type != Some(FieldType::Rational) || entry.count != 3 {
        return None;
    }

    let offset = entry.value_offset(values.byte_order()) as usize;
    let degrees = values.read_rational_at(offset).ok()?;
    let minutes = values.read_rational_at(offset + 8).ok()?;
    let seconds = values.read_rational_at(offset + 16).ok()?;

    Some(degrees + minutes / 60.0 + seconds / 3600.0)
}

/// Round to 6 decimal places (~0.11 m of precision).
fn round_coordinate(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ByteOrder;

    fn rational(num: u32, den: u32) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[..4].copy_from_slice(&num.to_le_bytes());
        bytes[4..].copy_from_slice(&den.to_le_bytes());
        bytes
    }

    /// Build a TIFF base slice with a GPS sub-IFD holding all four fields.
    fn tiff_with_gps(lat_ref: u8, lng_ref: u8, dms: [[(u32, u32); 3]; 2]) -> Vec<u8> {
        let mut tiff = Vec::new();
        // Header
        tiff.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00]);
        tiff.extend_from_slice(&8u32.to_le_bytes());
        // IFD0 at 8: one entry pointing at the GPS sub-IFD (offset 26)
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x8825u16.to_le_bytes());
        tiff.extend_from_slice(&4u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&26u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        // GPS sub-IFD at 26: 4 entries, data area at 26 + 2 + 48 + 4 = 80
        tiff.extend_from_slice(&4u16.to_le_bytes());
        for (tag, type_, count, payload) in [
            (1u16, 2u16, 2u32, [lat_ref, 0, 0, 0]),
            (2, 5, 3, 80u32.to_le_bytes()),
            (3, 2, 2, [lng_ref, 0, 0, 0]),
            (4, 5, 3, 104u32.to_le_bytes()),
        ] {
            tiff.extend_from_slice(&tag.to_le_bytes());
            tiff.extend_from_slice(&type_.to_le_bytes());
            tiff.extend_from_slice(&count.to_le_bytes());
            tiff.extend_from_slice(&payload);
        }
        tiff.extend_from_slice(&0u32.to_le_bytes());
        // Rational triples at 80 and 104
        for triple in dms {
            for (num, den) in triple {
                tiff.extend_from_slice(&rational(num, den));
            }
        }
        tiff
    }

    fn extract(tiff: &[u8]) -> Option<GpsCoordinates> {
        let header = TiffHeader::parse(tiff).unwrap();
        let ifd0 = Ifd::parse(
            &ByteReader::new(tiff),
            header.ifd0_offset as usize,
            ByteOrder::LittleEndian,
        );
        extract_gps(tiff, &header, &ifd0)
    }

    const PITTSBURGH: [[(u32, u32); 3]; 2] =
        [[(40, 1), (26, 1), (468, 10)], [(79, 1), (58, 1), (360, 10)]];

    #[test]
    fn test_northern_western_position() {
        // 40 deg 26' 46.8" N, 79 deg 58' 36.0" W
        let tiff = tiff_with_gps(b'N', b'W', PITTSBURGH);
        let gps = extract(&tiff).unwrap();
        assert!((gps.lat - 40.446333).abs() < 1e-5);
        assert!((gps.lng - -79.976667).abs() < 1e-5);
    }

    #[test]
    fn test_southern_ref_negates_latitude_only() {
        let tiff = tiff_with_gps(b'S', b'W', PITTSBURGH);
        let gps = extract(&tiff).unwrap();
        assert!((gps.lat - -40.446333).abs() < 1e-5);
        assert!((gps.lng - -79.976667).abs() < 1e-5);
    }

    #[test]
    fn test_eastern_ref_keeps_longitude_positive() {
        let tiff = tiff_with_gps(b'N', b'E', PITTSBURGH);
        let gps = extract(&tiff).unwrap();
        assert!(gps.lng > 0.0);
    }

    #[test]
    fn test_zero_zero_sentinel_rejected() {
        let zeroes = [[(0, 1), (0, 1), (0, 1)], [(0, 1), (0, 1), (0, 1)]];
        let tiff = tiff_with_gps(b'N', b'E', zeroes);
        assert_eq!(extract(&tiff), None);
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let bad = [[(91, 1), (0, 1), (0, 1)], [(79, 1), (58, 1), (360, 10)]];
        let tiff = tiff_with_gps(b'N', b'W', bad);
        assert_eq!(extract(&tiff), None);
    }

    #[test]
    fn test_zero_denominator_components_read_as_zero() {
        // Denominator 0 decodes to 0.0, leaving only the valid components.
        let dms = [[(40, 1), (0, 0), (0, 0)], [(79, 1), (58, 1), (360, 10)]];
        let tiff = tiff_with_gps(b'N', b'W', dms);
        let gps = extract(&tiff).unwrap();
        assert!((gps.lat - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_field_yields_none() {
        // Truncate so the longitude triple is unreadable.
        let tiff = tiff_with_gps(b'N', b'W', PITTSBURGH);
        assert_eq!(extract(&tiff[..108]), None);
    }

    #[test]
    fn test_rounding_to_six_decimals() {
        let tiff = tiff_with_gps(b'N', b'W', PITTSBURGH);
        let gps = extract(&tiff).unwrap();
        assert_eq!(gps.lat, 40.446333);
        assert_eq!(gps.lng, -79.976667);
    }
}
