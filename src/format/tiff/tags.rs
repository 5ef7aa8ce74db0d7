//! TIFF field type and EXIF tag vocabularies.
//!
//! Only the types and tags needed to recover capture time and GPS position
//! are defined. Unknown tags are not an error; the directory parser keeps
//! them keyed by their raw id and the extractors simply never ask for them.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how tag values are encoded.
///
/// Each type has a fixed size per element, which decides whether a value fits
/// inline in the IFD entry's 4-byte payload or lives at an offset in the data
/// area. That inline-vs-offset split is the central invariant of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character, NUL-terminated strings (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two u32s, numerator then denominator (8 bytes)
    Rational = 5,

    /// Opaque byte data (1 byte per element)
    Undefined = 7,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte => 1,
            FieldType::Ascii => 1,
            FieldType::Short => 2,
            FieldType::Long => 4,
            FieldType::Rational => 8,
            FieldType::Undefined => 1,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            _ => None,
        }
    }

    /// Maximum bytes that fit inline in an IFD entry's value field.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Check if a value with this type and count fits inline in the entry.
    ///
    /// A RATIONAL never fits (8 bytes each); an ASCII value fits only up to
    /// 4 characters including the terminating NUL.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        self.size_in_bytes() as u64 * count as u64 <= Self::INLINE_THRESHOLD as u64
    }
}

// =============================================================================
// EXIF Tags
// =============================================================================

/// EXIF tag ids consumed by this crate.
///
/// Tag ids are scoped to the directory they appear in: the GPS tags 1–4 only
/// mean latitude/longitude inside the GPS sub-IFD reached via
/// [`ExifTag::GpsIfdPointer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    // -------------------------------------------------------------------------
    // IFD0
    // -------------------------------------------------------------------------
    /// Pointer to the Exif sub-IFD (LONG)
    ExifIfdPointer = 0x8769,

    /// Pointer to the GPS sub-IFD (LONG)
    GpsIfdPointer = 0x8825,

    // -------------------------------------------------------------------------
    // Exif sub-IFD
    // -------------------------------------------------------------------------
    /// Original capture time, ASCII[20] "YYYY:MM:DD HH:MM:SS\0"
    DateTimeOriginal = 0x9003,

    // -------------------------------------------------------------------------
    // GPS sub-IFD
    // -------------------------------------------------------------------------
    /// Latitude hemisphere, ASCII[2] "N" or "S"
    GpsLatitudeRef = 0x0001,

    /// Latitude as three RATIONALs: degrees, minutes, seconds
    GpsLatitude = 0x0002,

    /// Longitude hemisphere, ASCII[2] "E" or "W"
    GpsLongitudeRef = 0x0003,

    /// Longitude as three RATIONALs: degrees, minutes, seconds
    GpsLongitude = 0x0004,
}

impl ExifTag {
    /// Numeric tag id.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Tests
// =============================================================================
