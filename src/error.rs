use thiserror::Error;

/// Errors that can occur while decoding an EXIF block.
///
/// None of these escape [`extract_exif`](crate::extract_exif): the orchestrator
/// absorbs every failure into an absent output field. They are public so that
/// callers using the lower-level parsing API directly can match on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// A read would exceed the buffer bounds
    #[error("read out of bounds: {requested} bytes at offset {offset}, buffer is {size} bytes")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        size: usize,
    },

    /// No APP1 segment carrying the "Exif\0\0" signature was found
    #[error("no APP1 Exif segment found")]
    NoExifSegment,

    /// TIFF byte order marker is neither "II" nor "MM"
    #[error("invalid TIFF byte order marker: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// TIFF magic number is not 42
    #[error("invalid TIFF magic number: expected 42, got {0}")]
    InvalidMagic(u16),

    /// A required tag is not present in the directory
    #[error("tag 0x{0:04X} not present")]
    TagNotFound(u16),

    /// A tag is present but its type, count, or payload is unusable
    #[error("invalid value for tag 0x{tag:04X}: {message}")]
    InvalidTagValue { tag: u16, message: String },
}
