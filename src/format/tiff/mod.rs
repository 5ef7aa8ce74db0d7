//! TIFF structure parsing for the EXIF block.
//!
//! The module is split by layer:
//!
//! - [`parser`] - TIFF header and IFD directory structures
//! - [`tags`] - field type and tag id vocabularies
//! - [`values`] - tag value decoding (ASCII, RATIONAL, scalar u32)

pub mod parser;
pub mod tags;
pub mod values;

pub use parser::{Ifd, IfdEntry, TiffHeader, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE};
pub use tags::{ExifTag, FieldType};
pub use values::ValueReader;
