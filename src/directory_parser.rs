//! Parsing of a raw Exif block into decoded entries.
//!
//! # Layout
//! ```text
//! [ "Exif" 0x00 0x00 ]            optional, everything below is relative to the byte after it
//! "II" | "MM"                     byte order
//! 0x002A                          magic
//! u32                             offset of IFD0
//! IFD0: u16 count, count * 12 byte entries, u32 offset of the next (thumbnail) IFD
//! ```
//! IFD0 may point to an Exif sub-IFD (tag 0x8769) and a GPS sub-IFD (tag 0x8825). Their entries
//! are appended after the ones of IFD0. The next IFD is only searched for the thumbnail
//! location.
//!
//! Malformed data never produces an error. A broken header yields no entries, an entry whose
//! value lies outside of the buffer is skipped.

use crate::byte_order_rw::{ByteOrder, ByteOrderReader};
use crate::ifd::{ExifEntry, Ifd};
use crate::tags::{ifd, ExifDataType, ExifTag, IfdType};
use crate::value::{self, ExifValue};
use derivative::Derivative;
use log::{debug, trace};

const EXIF_PREFIX: &[u8] = b"Exif";
const EXIF_HEADER_SIZE: u64 = 6;
const TIFF_MAGIC: u16 = 0x002A;
const ENTRY_SIZE: u64 = 12;
const INLINE_VALUE_SIZE: u64 = 4;

/// Where the embedded thumbnail (JPEG interchange format) lives inside the parsed buffer.
///
/// `offset` is an absolute position in the buffer handed to the parser (the tag value plus the
/// length of an "Exif\0\0" prefix, if there was one). Both fields are 0 when no thumbnail was
/// found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThumbnailLocator {
    pub offset: u64,
    pub length: u32,
}
impl ThumbnailLocator {
    pub fn is_present(&self) -> bool {
        self.offset != 0 && self.length != 0
    }
}

/// The outcome of [ExifDirectoryParser::parse].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedExif {
    /// IFD0 entries, then Exif sub-IFD entries, then GPS sub-IFD entries
    pub entries: Ifd,
    pub thumbnail: ThumbnailLocator,
}

#[derive(Derivative)]
#[derivative(Debug)]
/// Decodes one Exif block. A parser is used for a single [parse][Self::parse] call.
///
/// # Examples
///
/// ```
/// use exif_reader::ExifDirectoryParser;
///
/// // little endian TIFF header, IFD0 at offset 8 holding Orientation = 6
/// let data = [
///     b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00,
///     0x01, 0x00,
///     0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00,
///     0x00, 0x00, 0x00, 0x00,
/// ];
/// let parsed = ExifDirectoryParser::new(&data).parse();
/// assert_eq!(parsed.entries.len(), 1);
/// println!("{}", parsed.entries.entries()[0]);
/// ```
pub struct ExifDirectoryParser<'a> {
    #[derivative(Debug = "ignore")]
    reader: ByteOrderReader<'a>,
    start_index: u64,
    exif_offset: u32,
    gps_offset: u32,
}

impl<'a> ExifDirectoryParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: ByteOrderReader::new(data, ByteOrder::default()),
            start_index: 0,
            exif_offset: 0,
            gps_offset: 0,
        }
    }

    pub fn parse(mut self) -> ParsedExif {
        let mut result = ParsedExif::default();
        if !self.read_header() {
            return result;
        }

        let ifd_offset = self.reader.read_u32();
        self.walk_directory(ifd_offset, IfdType::Ifd, &mut result.entries);

        // the cursor now sits right behind the last IFD0 entry
        let next_ifd_offset = self.reader.read_u32();
        result.thumbnail = self.locate_thumbnail(next_ifd_offset);

        if self.exif_offset != 0 {
            self.walk_directory(self.exif_offset, IfdType::Exif, &mut result.entries);
        }
        if self.gps_offset != 0 {
            self.walk_directory(self.gps_offset, IfdType::GpsInfo, &mut result.entries);
        }

        result
    }

    /// Returns false if the data does not start with a (possibly "Exif\0\0" prefixed) TIFF header.
    fn read_header(&mut self) -> bool {
        if self.reader.read_bytes(EXIF_PREFIX.len()) == Some(EXIF_PREFIX) {
            let padding = self.reader.read_u16();
            if padding != 0 {
                debug!("rejecting exif block: padding after 'Exif' is {padding:#06X}");
                return false;
            }
            self.start_index = EXIF_HEADER_SIZE;
        } else {
            self.reader.seek_to(0);
        }

        let marker = self.reader.read_bytes(2).unwrap_or_default();
        self.reader.set_byte_order(ByteOrder::from_marker(marker));

        let magic = self.reader.read_u16();
        if magic != TIFF_MAGIC {
            debug!("rejecting exif block: invalid magic (expected 42, got {magic})");
            return false;
        }
        true
    }

    /// Reads the IFD at `offset` (relative to the TIFF header) into `values`.
    ///
    /// Sub-IFD pointers are not added to `values`, their targets are remembered instead.
    /// Leaves the cursor behind the last entry, where the next-IFD pointer is stored.
    fn walk_directory(&mut self, offset: u32, ifd_type: IfdType, values: &mut Ifd) {
        self.reader.seek_to(self.start_index + offset as u64);
        let count = self.reader.read_u16();
        trace!("reading {ifd_type:?} directory at {offset:#X} with {count} entries");

        for _ in 0..count {
            if self.reader.remaining() < ENTRY_SIZE {
                trace!("{ifd_type:?} directory is truncated, stopping");
                break;
            }
            let Some(entry) = self.read_entry(ifd_type) else {
                continue;
            };

            let tag = u16::from(entry.tag);
            if tag == ifd::SubIFDOffset.tag {
                if let Some(offset) = Self::sub_ifd_pointer(&entry) {
                    trace!("found exif sub-IFD at {offset:#X}");
                    self.exif_offset = offset;
                }
            } else if tag == ifd::GPSIFDOffset.tag {
                if let Some(offset) = Self::sub_ifd_pointer(&entry) {
                    trace!("found gps sub-IFD at {offset:#X}");
                    self.gps_offset = offset;
                }
            } else if !values.insert(entry) {
                trace!("dropping duplicate {ifd_type:?} entry for tag {tag:#06X}");
            }
        }
    }

    fn sub_ifd_pointer(entry: &ExifEntry) -> Option<u32> {
        match (entry.data_type, &entry.value) {
            (ExifDataType::Long, Some(ExifValue::Long(offset))) => Some(*offset),
            _ => None,
        }
    }

    /// Reads the 12 byte entry at the cursor. Returns `None` if its value lies outside the buffer.
    fn read_entry(&mut self, ifd_type: IfdType) -> Option<ExifEntry> {
        let slot_end = self.reader.position() + ENTRY_SIZE;
        let tag = ExifTag::from_number(self.reader.read_u16(), ifd_type);
        let data_type = ExifDataType::from(self.reader.read_u16());
        if data_type.size() == 0 {
            self.reader.seek_to(slot_end);
            return Some(ExifEntry::placeholder(tag, ifd_type));
        }

        let components = self.reader.read_u32();
        let value_field = self.reader.read_bytes(INLINE_VALUE_SIZE as usize)?;
        let byte_order = self.reader.byte_order();
        let size = components as u64 * data_type.size() as u64;

        let value = if size > INLINE_VALUE_SIZE {
            let offset = byte_order.read_u32(value_field);
            let checkpoint = self.reader.checkpoint();
            self.reader.seek_to(self.start_index + offset as u64);
            let data = if self.reader.remaining() < size {
                None
            } else {
                self.reader.read_bytes(size as usize)
            };
            self.reader.restore(checkpoint);
            let Some(data) = data else {
                trace!("skipping {tag}: {size} bytes at {offset:#X} exceed the buffer");
                return None;
            };
            value::decode(data_type, data, components, byte_order)
        } else {
            // decoders get the whole field even when the value is shorter
            value::decode(data_type, value_field, components, byte_order)
        };

        Some(ExifEntry::new(tag, data_type, value, components, ifd_type))
    }

    /// Walks the IFD following IFD0 into a throwaway collection and picks out the location of
    /// the thumbnail.
    fn locate_thumbnail(&mut self, offset: u32) -> ThumbnailLocator {
        let mut locator = ThumbnailLocator::default();
        if offset == 0 {
            return locator;
        }

        let mut values = Ifd::new();
        self.walk_directory(offset, IfdType::Ifd, &mut values);
        for entry in values.iter().filter(|x| x.data_type == ExifDataType::Long) {
            let Some(value) = entry.value.as_ref().and_then(ExifValue::as_u32) else {
                continue;
            };
            if entry.tag == ifd::JPEGInterchangeFormat.as_maybe() {
                locator.offset = value as u64 + self.start_index;
            } else if entry.tag == ifd::JPEGInterchangeFormatLength.as_maybe() {
                locator.length = value;
            }
        }
        locator
    }
}
