//! A decoder for Exif metadata blocks.
//!
//! The input is the raw Exif block as it is stored inside an image container (for a JPEG that is
//! the payload of the APP1 segment, see [jpeg::find_exif_segment]). The output is the list of
//! entries of IFD0, the Exif sub-IFD and the GPS sub-IFD, plus the location of the embedded
//! thumbnail.
//!
//! ```
//! let profile = exif_reader::read_exif(b"Exif\0\0II\x2A\0\x08\0\0\0\0\0\0\0\0\0");
//! assert!(profile.values().is_empty());
//! assert!(!profile.thumbnail_locator().is_present());
//! ```

pub mod byte_order_rw;
pub mod directory_parser;
pub mod ifd;
pub mod jpeg;
pub mod profile;
pub mod tags;
pub mod value;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use directory_parser::{ExifDirectoryParser, ParsedExif, ThumbnailLocator};
pub use ifd::{ExifEntry, Ifd};
pub use profile::ExifProfile;
pub use tags::{ExifDataType, ExifTag, IfdType};
pub use value::ExifValue;

/// Decodes an Exif block. Malformed data produces an empty profile instead of an error.
pub fn read_exif(data: &[u8]) -> ExifProfile {
    ExifProfile::from_bytes(data)
}
