use crate::tags::{ExifDataType, ExifTag, IfdType};
use crate::value::ExifValue;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// An ordered collection of decoded entries.
///
/// Inserting keeps the first entry for a given tag and drops any later one, no matter which
/// directory either was read from. All unrecognized tags count as the same tag.
#[derive(Debug, Clone, Default)]
pub struct Ifd {
    entries: Vec<ExifEntry>,
    seen: HashSet<Option<u16>>,
}
impl Ifd {
    pub fn new() -> Self {
        Self::default()
    }
    /// Appends `entry` unless an entry with the same tag is already present.
    /// Returns whether the entry was kept.
    pub fn insert(&mut self, entry: ExifEntry) -> bool {
        if self.seen.insert(entry.tag.registered_id()) {
            self.entries.push(entry);
            true
        } else {
            false
        }
    }
    pub fn entries(&self) -> &[ExifEntry] {
        &self.entries
    }
    pub fn entry_by_tag(&self, tag: impl Into<ExifTag>) -> Option<&ExifEntry> {
        let tag = tag.into();
        self.entries.iter().find(|x| x.tag == tag)
    }
    pub fn iter(&self) -> impl Iterator<Item = &ExifEntry> {
        self.entries.iter()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Ifd {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl IntoIterator for Ifd {
    type Item = ExifEntry;
    type IntoIter = std::vec::IntoIter<ExifEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A single decoded IFD entry.
///
/// Entries whose data type is not known carry no value; they are kept so callers can see that
/// something was stored under that tag.
#[derive(Clone, Debug, PartialEq)]
pub struct ExifEntry {
    pub tag: ExifTag,
    pub data_type: ExifDataType,
    pub value: Option<ExifValue>,
    pub is_array: bool,
    /// the directory this entry was read from
    pub ifd_type: IfdType,
}
impl ExifEntry {
    /// `components` is the component count stored in the entry. An entry is an array when it
    /// has a value and more than one component, strings included.
    pub fn new(
        tag: ExifTag,
        data_type: ExifDataType,
        value: Option<ExifValue>,
        components: u32,
        ifd_type: IfdType,
    ) -> Self {
        let is_array = value.is_some() && components > 1;
        Self {
            tag,
            data_type,
            value,
            is_array,
            ifd_type,
        }
    }
    pub fn placeholder(tag: ExifTag, ifd_type: IfdType) -> Self {
        Self::new(tag, ExifDataType::Unknown, None, 0, ifd_type)
    }
}
impl Display for ExifEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} ({}): {:?}", self.tag, self.data_type.name(), value),
            None => write!(f, "{} ({}): -", self.tag, self.data_type.name()),
        }
    }
}
