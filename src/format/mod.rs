//! Binary format readers for the JPEG container and the embedded TIFF block.
//!
//! EXIF data lives inside a JPEG APP1 segment as a self-contained TIFF
//! structure. [`jpeg`] locates that segment; [`tiff`] decodes the structure.

pub mod jpeg;
pub mod tiff;

pub use jpeg::find_exif_tiff;
