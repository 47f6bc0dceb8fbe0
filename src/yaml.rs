use crate::ifd::{ExifEntry, Ifd};
use crate::profile::ExifProfile;
use crate::tags::IfdType;
use crate::value::ExifValue;

// byte blobs (maker notes, ...) longer than this are cut off in the dump
const MAX_DUMPED_BYTES: usize = 16;

/// Dumps decoded Exif entries into a friendly human readable text-representation
#[derive(Default)]
pub struct ExifYamlDumper {
    /// prefix every value with its data type, e.g. `!SHORT 1`
    pub dump_types: bool,
}
impl ExifYamlDumper {
    pub fn dump_profile(&self, profile: &ExifProfile) -> String {
        let mut out = self.dump_entries(profile.entries());
        let thumbnail = profile.thumbnail_locator();
        if thumbnail.is_present() {
            out += &format!(
                "Thumbnail:\n{}",
                textwrap::indent(
                    &format!("offset: {}\nlength: {}\n", thumbnail.offset, thumbnail.length),
                    "  "
                )
            );
        }
        out
    }

    /// Dumps the entries grouped by the directory they were read from.
    pub fn dump_entries(&self, entries: &Ifd) -> String {
        [IfdType::Ifd, IfdType::Exif, IfdType::GpsInfo]
            .iter()
            .filter_map(|ifd_type| {
                let section: String = entries
                    .iter()
                    .filter(|entry| entry.ifd_type == *ifd_type)
                    .map(|entry| self.dump_entry(entry))
                    .collect();
                if section.is_empty() {
                    None
                } else {
                    Some(format!(
                        "{}:\n{}",
                        Self::section_name(ifd_type),
                        textwrap::indent(&section, "  ")
                    ))
                }
            })
            .collect()
    }

    pub fn dump_entry(&self, entry: &ExifEntry) -> String {
        let value = match &entry.value {
            Some(value) => Self::dump_value(value),
            None => "~".to_string(),
        };
        if self.dump_types {
            format!("{}: !{} {}\n", entry.tag, entry.data_type.name(), value)
        } else {
            format!("{}: {}\n", entry.tag, value)
        }
    }

    pub fn dump_value(value: &ExifValue) -> String {
        match value {
            ExifValue::Byte(x) => format!("{x}"),
            ExifValue::Ascii(x) => format!("{x:?}"),
            ExifValue::Short(x) => format!("{x}"),
            ExifValue::Long(x) => format!("{x}"),
            ExifValue::Rational(x) => format!("{x}"),
            ExifValue::SignedByte(x) => format!("{x}"),
            ExifValue::Undefined(x) => format!("{x:#04X}"),
            ExifValue::SignedShort(x) => format!("{x}"),
            ExifValue::SignedLong(x) => format!("{x}"),
            ExifValue::SignedRational(x) => format!("{x}"),
            ExifValue::Float(x) => format!("{x}"),
            ExifValue::Double(x) => format!("{x}"),
            ExifValue::Bytes(bytes) => {
                let shown: Vec<String> = bytes
                    .iter()
                    .take(MAX_DUMPED_BYTES)
                    .map(|b| format!("{b:#04X}"))
                    .collect();
                if bytes.len() > MAX_DUMPED_BYTES {
                    format!("[{}, ...] # {} bytes", shown.join(", "), bytes.len())
                } else {
                    format!("[{}]", shown.join(", "))
                }
            }
            ExifValue::List(list) => {
                let comma_separated: Vec<String> = list.iter().map(Self::dump_value).collect();
                format!("[{}]", comma_separated.join(", "))
            }
        }
    }

    fn section_name(ifd_type: &IfdType) -> &'static str {
        match ifd_type {
            IfdType::Ifd => "IFD0",
            IfdType::Exif => "Exif",
            IfdType::GpsInfo => "GPSInfo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{exif, gps_info, ExifDataType, ExifTag};

    fn sample() -> Ifd {
        let mut ifd = Ifd::new();
        ifd.insert(ExifEntry::new(
            ExifTag::Unknown(0xC4A5),
            ExifDataType::Undefined,
            Some(ExifValue::Bytes((0..20).collect())),
            20,
            IfdType::Ifd,
        ));
        ifd.insert(ExifEntry::new(
            exif::FNumber.into(),
            ExifDataType::Rational,
            Some(ExifValue::Rational(2.8)),
            1,
            IfdType::Exif,
        ));
        ifd.insert(ExifEntry::new(
            gps_info::GPSLatitudeRef.into(),
            ExifDataType::Ascii,
            Some(ExifValue::Ascii("N".to_string())),
            2,
            IfdType::GpsInfo,
        ));
        ifd
    }

    #[test]
    fn test_dump_sections() {
        let dumped = ExifYamlDumper::default().dump_entries(&sample());
        assert!(dumped.starts_with("IFD0:\n  0xC4A5: [0x00, 0x01"));
        assert!(dumped.contains("# 20 bytes"));
        assert!(dumped.contains("Exif:\n  FNumber: 2.8\n"));
        assert!(dumped.ends_with("GPSInfo:\n  GPSLatitudeRef: \"N\"\n"));
    }

    #[test]
    fn test_dump_types() {
        let dumper = ExifYamlDumper { dump_types: true };
        let dumped = dumper.dump_entries(&sample());
        assert!(dumped.contains("FNumber: !RATIONAL 2.8"));
    }

    #[test]
    fn test_dump_lists_and_placeholders() {
        assert_eq!(
            ExifYamlDumper::dump_value(&ExifValue::List(vec![
                ExifValue::Short(8),
                ExifValue::Short(8)
            ])),
            "[8, 8]"
        );
        let placeholder = ExifEntry::placeholder(ExifTag::Unknown(0x0042), IfdType::Ifd);
        assert_eq!(ExifYamlDumper::default().dump_entry(&placeholder), "0x0042: ~\n");
    }
}
