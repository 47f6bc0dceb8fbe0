use crate::directory_parser::{ExifDirectoryParser, ThumbnailLocator};
use crate::ifd::{ExifEntry, Ifd};
use crate::tags::ExifTag;
use crate::value::ExifValue;
use derivative::Derivative;

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// An Exif block together with the values decoded from it.
///
/// # Examples
///
/// ```
/// use exif_reader::tags::ifd;
/// use exif_reader::ExifProfile;
///
/// let profile = ExifProfile::from_bytes(b"not exif at all".to_vec());
/// assert!(profile.values().is_empty());
/// assert_eq!(profile.value(ifd::Orientation), None);
/// assert_eq!(profile.thumbnail_data(), None);
/// ```
pub struct ExifProfile {
    #[derivative(Debug = "ignore")]
    data: Vec<u8>,
    entries: Ifd,
    thumbnail: ThumbnailLocator,
}
impl ExifProfile {
    /// Parses `data`, which is either a bare TIFF header or one prefixed with "Exif\0\0" (the
    /// layout of a JPEG APP1 payload).
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let parsed = ExifDirectoryParser::new(&data).parse();
        Self {
            entries: parsed.entries,
            thumbnail: parsed.thumbnail,
            data,
        }
    }

    pub fn values(&self) -> &[ExifEntry] {
        self.entries.entries()
    }
    pub fn entries(&self) -> &Ifd {
        &self.entries
    }
    pub fn entry(&self, tag: impl Into<ExifTag>) -> Option<&ExifEntry> {
        self.entries.entry_by_tag(tag)
    }
    pub fn value(&self, tag: impl Into<ExifTag>) -> Option<&ExifValue> {
        self.entry(tag).and_then(|entry| entry.value.as_ref())
    }

    pub fn thumbnail_locator(&self) -> ThumbnailLocator {
        self.thumbnail
    }
    /// The embedded thumbnail bytes, if the locator is set and fits into the buffer.
    pub fn thumbnail_data(&self) -> Option<&[u8]> {
        if !self.thumbnail.is_present() {
            return None;
        }
        let start = usize::try_from(self.thumbnail.offset).ok()?;
        let end = start.checked_add(self.thumbnail.length as usize)?;
        self.data.get(start..end)
    }

    pub fn raw(&self) -> &[u8] {
        &self.data
    }
}
