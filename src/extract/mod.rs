//! Metadata extraction: the never-fail orchestrator over the format layers.
//!
//! [`extract_exif`] locates the EXIF block once and then runs the capture
//! time and GPS extractions independently, absorbing every failure into an
//! absent output field. Callers treat metadata as a convenience; an image
//! with no, partial, or corrupted EXIF is a normal input, not an error.

pub mod datetime;
pub mod gps;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::error::ExifError;
use crate::format::jpeg;
use crate::format::tiff::{Ifd, TiffHeader};
use crate::reader::ByteReader;

pub use gps::GpsCoordinates;

// =============================================================================
// ExifMetadata
// =============================================================================

/// The metadata recovered from one image.
///
/// Both fields are independently optional: a failed date decode never
/// suppresses a successful GPS decode, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExifMetadata {
    /// Original capture time (`DateTimeOriginal`), local wall-clock
    pub capture_time: Option<NaiveDateTime>,

    /// GPS position at capture time, in decimal degrees
    pub gps: Option<GpsCoordinates>,
}

impl ExifMetadata {
    /// Metadata with both fields absent.
    pub const fn empty() -> Self {
        Self {
            capture_time: None,
            gps: None,
        }
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Extract capture time and GPS position from a JPEG buffer.
///
/// This is a pure function over the borrowed buffer: no I/O, no retained
/// references, no shared state. It never panics and never returns an error;
/// any stage that cannot complete leaves its output field `None`.
///
/// # Example
///
/// ```
/// let metadata = exif_capture::extract_exif(&[0xFF, 0xD8, 0xFF, 0xD9]);
/// assert!(metadata.capture_time.is_none());
/// assert!(metadata.gps.is_none());
/// ```
pub fn extract_exif(data: &[u8]) -> ExifMetadata {
    let (tiff, header, ifd0) = match locate_ifd0(data) {
        Ok(located) => located,
        Err(err) => {
            debug!(%err, "no usable EXIF block");
            return ExifMetadata::empty();
        }
    };

    ExifMetadata {
        capture_time: datetime::extract_capture_time(tiff, &header, &ifd0),
        gps: gps::extract_gps(tiff, &header, &ifd0),
    }
}

/// Locate the TIFF base slice and parse its header and IFD0.
fn locate_ifd0(data: &[u8]) -> Result<(&[u8], TiffHeader, Ifd), ExifError> {
    let tiff_start = jpeg::find_exif_tiff(data)?;
    let tiff = ByteReader::new(data)
        .read_bytes(tiff_start, data.len().saturating_sub(tiff_start))?;
    let header = TiffHeader::parse(tiff)?;
    let ifd0 = Ifd::parse(
        &ByteReader::new(tiff),
        header.ifd0_offset as usize,
        header.byte_order,
    );
    Ok((tiff, header, ifd0))
}
