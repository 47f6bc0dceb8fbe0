//! Locating the Exif block inside a JPEG file.
//!
//! The Exif block of a JPEG is the payload of the first APP1 segment that starts with
//! "Exif\0\0". The returned slice keeps that prefix, [ExifDirectoryParser][crate::ExifDirectoryParser]
//! expects it.

use thiserror::Error;

mod marker {
    pub const P: u8 = 0xFF;
    // not a marker but a stuffed 0xFF inside scan data
    pub const Z: u8 = 0x00;
    pub const TEM: u8 = 0x01;
    pub const RST0: u8 = 0xD0;
    pub const RST7: u8 = 0xD7;
    pub const SOI: u8 = 0xD8;
    pub const EOI: u8 = 0xD9;
    pub const APP1: u8 = 0xE1;
}

const JPEG_SIG: [u8; 2] = [marker::P, marker::SOI];
const EXIF_ID: &[u8] = b"Exif\0\0";

/// The error-type produced while searching a container for its Exif block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("not a JPEG file")]
    NotJpeg,
    #[error("JPEG data ends inside a marker segment")]
    Truncated,
    #[error("invalid length {0} of a JPEG marker segment")]
    InvalidSegmentLength(u16),
    #[error("unexpected JPEG marker {0:#04X}")]
    UnexpectedMarker(u8),
    #[error("no Exif data found")]
    NoExifSegment,
}

pub fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&JPEG_SIG)
}

/// Returns the payload of the Exif APP1 segment, starting with "Exif\0\0".
pub fn find_exif_segment(data: &[u8]) -> Result<&[u8], ContainerError> {
    if !is_jpeg(data) {
        return Err(ContainerError::NotJpeg);
    }
    let mut pos = JPEG_SIG.len();
    loop {
        // discard non-ff bytes, which appear inside scan data or when we are out of sync
        pos += data[pos..]
            .iter()
            .position(|&b| b == marker::P)
            .ok_or(ContainerError::Truncated)?;
        // skip fill bytes
        while data.get(pos) == Some(&marker::P) {
            pos += 1;
        }
        let code = *data.get(pos).ok_or(ContainerError::Truncated)?;
        pos += 1;

        match code {
            marker::Z | marker::TEM | marker::RST0..=marker::RST7 => continue,
            marker::SOI => return Err(ContainerError::UnexpectedMarker(code)),
            marker::EOI => return Err(ContainerError::NoExifSegment),
            _ => {}
        }

        let length_bytes = data.get(pos..pos + 2).ok_or(ContainerError::Truncated)?;
        let length = u16::from_be_bytes([length_bytes[0], length_bytes[1]]);
        if length < 2 {
            return Err(ContainerError::InvalidSegmentLength(length));
        }
        let segment = data
            .get(pos + 2..pos + length as usize)
            .ok_or(ContainerError::Truncated)?;
        if code == marker::APP1 && segment.starts_with(EXIF_ID) {
            return Ok(segment);
        }
        pos += length as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated() {
        let sets: &[&[u8]] = &[
            b"\xff\xd8",
            b"\xff\xd8\x00",
            b"\xff\xd8\xff",
            b"\xff\xd8\xff\xe1\x00",
            b"\xff\xd8\xff\xe1\x00\x08\x03\x04",
        ];
        for &data in sets {
            assert_eq!(find_exif_segment(data), Err(ContainerError::Truncated));
        }
    }

    #[test]
    fn test_not_jpeg() {
        assert_eq!(find_exif_segment(b""), Err(ContainerError::NotJpeg));
        assert_eq!(find_exif_segment(b"II*\0"), Err(ContainerError::NotJpeg));
    }

    #[test]
    fn test_no_exif() {
        let data = b"\xff\xd8\xff\xd9";
        assert_eq!(find_exif_segment(data), Err(ContainerError::NoExifSegment));
    }

    #[test]
    fn test_out_of_sync() {
        let data = b"\xff\xd8\x01\x02\x03\xff\x00\xff\xd9";
        assert_eq!(find_exif_segment(data), Err(ContainerError::NoExifSegment));
    }

    #[test]
    fn test_skips_other_segments() {
        let mut data = b"\xff\xd8".to_vec();
        // APP0 (JFIF)
        data.extend_from_slice(b"\xff\xe0\x00\x07JFIF\0");
        // APP1 that is XMP, not Exif
        data.extend_from_slice(b"\xff\xe1\x00\x05abc");
        // the Exif APP1
        data.extend_from_slice(b"\xff\xe1\x00\x0cExif\0\0II*\0");
        data.extend_from_slice(b"\xff\xd9");
        assert_eq!(find_exif_segment(&data), Ok(&b"Exif\0\0II*\0"[..]));
    }

    #[test]
    fn test_invalid_segment_length() {
        let data = b"\xff\xd8\xff\xe1\x00\x01";
        assert_eq!(
            find_exif_segment(data),
            Err(ContainerError::InvalidSegmentLength(1))
        );
    }
}
