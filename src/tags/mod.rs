use std::fmt::{Debug, Display, Formatter};

include!(concat!(env!("OUT_DIR"), "/tag_data.rs"));

/// An enum indicating the context (and thus valid tags) of an IFD (normal/EXIF/GPSInfo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IfdType {
    #[default]
    Ifd,
    Exif,
    GpsInfo,
}

impl IfdType {
    pub fn namespace(&self) -> &'static [ExifTagDescriptor] {
        match self {
            IfdType::Ifd => &ifd::ALL,
            IfdType::Exif => &exif::ALL,
            IfdType::GpsInfo => &gps_info::ALL,
        }
    }

    pub fn combined_namespace() -> impl Iterator<Item = &'static ExifTagDescriptor> {
        ifd::ALL
            .iter()
            .chain(exif::ALL.iter())
            .chain(gps_info::ALL.iter())
    }
}

/// A data structure describing one specific tag (2byte key) that can appear in an Exif IFD.
#[derive(Debug, Copy, Clone, Eq)]
pub struct ExifTagDescriptor {
    pub name: &'static str,
    pub tag: u16,
    pub ifd_type: IfdType,
    pub description: &'static str,
}

impl ExifTagDescriptor {
    pub fn as_maybe(&self) -> ExifTag {
        ExifTag::Known(*self)
    }
}

impl PartialEq for ExifTagDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.ifd_type == other.ifd_type
    }
}

impl From<ExifTagDescriptor> for ExifTag {
    fn from(x: ExifTagDescriptor) -> Self {
        ExifTag::Known(x)
    }
}

/// Represents a 2-byte IFD key, that is either known or unknown.
///
/// Unknown tags keep their numeric id so callers can still tell them apart.
#[derive(Clone, Eq, Copy)]
pub enum ExifTag {
    Known(ExifTagDescriptor),
    Unknown(u16),
}

impl ExifTag {
    pub fn from_number(tag: u16, ifd_kind: IfdType) -> Self {
        if let Some(description) = ifd_kind.namespace().iter().find(|x| x.tag == tag) {
            Self::Known(*description)
        } else {
            Self::Unknown(tag)
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        IfdType::combined_namespace()
            .find(|x| x.name == name)
            .map(|description| Self::Known(*description))
    }

    pub fn known_name(&self) -> Option<&'static str> {
        match self {
            Self::Known(descriptor) => Some(descriptor.name),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The numeric id if any namespace lists it, `None` for ids no namespace knows.
    ///
    /// Entries collected from IFD0 and its sub-IFDs are deduplicated on this key, so a listed id
    /// collides across directories and all unlisted ids collide with each other.
    pub fn registered_id(&self) -> Option<u16> {
        let id = u16::from(*self);
        IfdType::combined_namespace()
            .any(|x| x.tag == id)
            .then_some(id)
    }
}

impl From<ExifTag> for u16 {
    fn from(value: ExifTag) -> Self {
        match value {
            ExifTag::Known(descriptor) => descriptor.tag,
            ExifTag::Unknown(tag) => tag,
        }
    }
}

impl Display for ExifTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self {
            ExifTag::Known(tag) => Display::fmt(&tag.name, f),
            ExifTag::Unknown(tag) => f.write_fmt(format_args!("{:#06X}", &tag)),
        }
    }
}

impl Debug for ExifTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self) // call method from Display
    }
}

impl PartialEq for ExifTag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExifTag::Known(a), ExifTag::Known(b)) => a == b,
            _ => u16::from(*self) == u16::from(*other),
        }
    }
}

/// The data-type of an Exif value as stored in the type field of an IFD entry.
///
/// This does not include the fact that it is possible to have a list of every type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExifDataType {
    Unknown,
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SignedByte,
    Undefined,
    SignedShort,
    SignedLong,
    SignedRational,
    SingleFloat,
    DoubleFloat,
}

impl From<u16> for ExifDataType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::Byte,
            2 => Self::Ascii,
            3 => Self::Short,
            4 => Self::Long,
            5 => Self::Rational,
            6 => Self::SignedByte,
            7 => Self::Undefined,
            8 => Self::SignedShort,
            9 => Self::SignedLong,
            10 => Self::SignedRational,
            11 => Self::SingleFloat,
            12 => Self::DoubleFloat,
            _ => Self::Unknown,
        }
    }
}

impl From<ExifDataType> for u16 {
    fn from(value: ExifDataType) -> Self {
        match value {
            ExifDataType::Unknown => 0,
            ExifDataType::Byte => 1,
            ExifDataType::Ascii => 2,
            ExifDataType::Short => 3,
            ExifDataType::Long => 4,
            ExifDataType::Rational => 5,
            ExifDataType::SignedByte => 6,
            ExifDataType::Undefined => 7,
            ExifDataType::SignedShort => 8,
            ExifDataType::SignedLong => 9,
            ExifDataType::SignedRational => 10,
            ExifDataType::SingleFloat => 11,
            ExifDataType::DoubleFloat => 12,
        }
    }
}

impl ExifDataType {
    /// Size in bytes of a single component. `Unknown` has no size.
    pub fn size(&self) -> usize {
        match self {
            ExifDataType::Unknown => 0,
            ExifDataType::Byte => 1,
            ExifDataType::Ascii => 1,
            ExifDataType::Short => 2,
            ExifDataType::Long => 4,
            ExifDataType::Rational => 8,
            ExifDataType::SignedByte => 1,
            ExifDataType::Undefined => 1,
            ExifDataType::SignedShort => 2,
            ExifDataType::SignedLong => 4,
            ExifDataType::SignedRational => 8,
            ExifDataType::SingleFloat => 4,
            ExifDataType::DoubleFloat => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExifDataType::Unknown => "UNKNOWN",
            ExifDataType::Byte => "BYTE",
            ExifDataType::Ascii => "ASCII",
            ExifDataType::Short => "SHORT",
            ExifDataType::Long => "LONG",
            ExifDataType::Rational => "RATIONAL",
            ExifDataType::SignedByte => "SBYTE",
            ExifDataType::Undefined => "UNDEFINED",
            ExifDataType::SignedShort => "SSHORT",
            ExifDataType::SignedLong => "SLONG",
            ExifDataType::SignedRational => "SRATIONAL",
            ExifDataType::SingleFloat => "FLOAT",
            ExifDataType::DoubleFloat => "DOUBLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_namespaced() {
        assert_eq!(ExifTag::from_number(0x8769, IfdType::Ifd), ifd::SubIFDOffset.as_maybe());
        assert_eq!(ExifTag::from_number(0x0002, IfdType::GpsInfo), gps_info::GPSLatitude.as_maybe());
        assert!(!ExifTag::from_number(0x0002, IfdType::Ifd).is_known());
    }

    #[test]
    fn test_unknown_tags_keep_their_id() {
        let tag = ExifTag::from_number(0xBEEF, IfdType::Exif);
        assert_eq!(tag, ExifTag::Unknown(0xBEEF));
        assert_eq!(u16::from(tag), 0xBEEF);
        assert_eq!(tag.to_string(), "0xBEEF");
    }

    #[test]
    fn test_registered_id_spans_namespaces() {
        // Orientation is only listed for IFD0, but the id is still registered when read elsewhere
        let tag = ExifTag::from_number(0x0112, IfdType::Exif);
        assert!(!tag.is_known());
        assert_eq!(tag.registered_id(), Some(0x0112));
        assert_eq!(ifd::Orientation.as_maybe().registered_id(), Some(0x0112));
        assert_eq!(ExifTag::Unknown(0xC0DE).registered_id(), None);
        assert_eq!(ExifTag::Unknown(0xC0DF).registered_id(), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ExifTag::from_name("FNumber"), Some(exif::FNumber.as_maybe()));
        assert_eq!(ExifTag::from_name("NoSuchTag"), None);
    }

    #[test]
    fn test_data_type_codes() {
        for code in 1..=12u16 {
            let dtype = ExifDataType::from(code);
            assert_ne!(dtype, ExifDataType::Unknown);
            assert_eq!(u16::from(dtype), code);
            assert!(dtype.size() > 0);
        }
        assert_eq!(ExifDataType::from(0), ExifDataType::Unknown);
        assert_eq!(ExifDataType::from(13), ExifDataType::Unknown);
        assert_eq!(ExifDataType::Unknown.size(), 0);
    }
}
