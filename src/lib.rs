//! # exif-capture
//!
//! Extract the original capture timestamp and GPS coordinates embedded in a
//! JPEG image's EXIF block.
//!
//! The crate is a single-pass, pure, synchronous decoder over an in-memory
//! byte buffer. It performs no I/O: the caller produces the bytes (file read,
//! upload body) and consumes the two optional output fields.
//!
//! ## Guarantees
//!
//! - **Never fails**: [`extract_exif`] returns a value for any input,
//!   however malformed. Missing segments, truncated buffers, bad magic
//!   numbers, and implausible values all degrade to an absent field.
//! - **Bounds-checked**: every buffer access routes through one checked
//!   reader; there is no unchecked offset arithmetic.
//! - **Independent fields**: a failed date decode never suppresses a
//!   successful GPS decode, and vice versa.
//! - **Thread-safe**: a pure function over a borrowed slice; safe to call
//!   concurrently on independent buffers with no coordination.
//!
//! ## Example
//!
//! ```rust,no_run
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let metadata = exif_capture::extract_exif(&bytes);
//!
//! if let Some(taken_at) = metadata.capture_time {
//!     println!("taken at {taken_at}");
//! }
//! if let Some(gps) = metadata.gps {
//!     println!("taken near ({}, {})", gps.lat, gps.lng);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`reader`] - bounds-checked primitive reads and endianness handling
//! - [`mod@format`] - JPEG segment scanning and TIFF/IFD structure parsing
//! - [`extract`] - capture time and GPS extraction over the parsed structures

pub mod error;
pub mod extract;
pub mod format;
pub mod reader;

// Re-export commonly used types
pub use error::ExifError;
pub use extract::{extract_exif, ExifMetadata, GpsCoordinates};
pub use format::jpeg::find_exif_tiff;
pub use format::tiff::{
    ExifTag, FieldType, Ifd, IfdEntry, TiffHeader, ValueReader, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE,
};
pub use reader::{ByteOrder, ByteReader};
