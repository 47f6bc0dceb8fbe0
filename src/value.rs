//! Decoding of raw IFD value bytes into typed Exif values.
//!
//! Every decoder is a plain function over a byte slice that has already been cut out of the
//! Exif block. Decoders never fail: a slice that is too short for the fixed size of its type
//! decodes to the zero value of that type.

use crate::byte_order_rw::ByteOrder;
use crate::tags::ExifDataType;

#[derive(Clone, Debug, PartialEq)]
pub enum ExifValue {
    Byte(u8),
    Ascii(String),
    Short(u16),
    Long(u32),
    Rational(f64),
    SignedByte(i8),
    Undefined(u8),
    SignedShort(i16),
    SignedLong(i32),
    SignedRational(f64),
    Float(f32),
    Double(f64),

    /// raw bytes of a `Byte` or `Undefined` entry with more than one component
    Bytes(Vec<u8>),
    List(Vec<ExifValue>),
}
impl ExifValue {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            ExifValue::Byte(x) => Some(*x as u32),
            ExifValue::Short(x) => Some(*x as u32),
            ExifValue::Long(x) => Some(*x),
            ExifValue::Undefined(x) => Some(*x as u32),
            _ => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ExifValue::Byte(x) => Some(*x as f64),
            ExifValue::Short(x) => Some(*x as f64),
            ExifValue::Long(x) => Some(*x as f64),
            ExifValue::Rational(x) => Some(*x),
            ExifValue::SignedByte(x) => Some(*x as f64),
            ExifValue::Undefined(x) => Some(*x as f64),
            ExifValue::SignedShort(x) => Some(*x as f64),
            ExifValue::SignedLong(x) => Some(*x as f64),
            ExifValue::SignedRational(x) => Some(*x),
            ExifValue::Float(x) => Some(*x as f64),
            ExifValue::Double(x) => Some(*x),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExifValue::Ascii(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ExifValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
    pub fn as_list(&self) -> Option<&[ExifValue]> {
        match self {
            ExifValue::List(l) => Some(l),
            _ => None,
        }
    }
    /// Number of values this holds (string length for `Ascii`).
    pub fn count(&self) -> usize {
        match self {
            ExifValue::Bytes(b) => b.len(),
            ExifValue::List(l) => l.len(),
            ExifValue::Ascii(s) => s.len(),
            _ => 1,
        }
    }
    /// The data type this value decodes from. `Bytes` reports `Byte`, even when it was read
    /// from an `Undefined` entry.
    pub fn data_type(&self) -> ExifDataType {
        match self {
            ExifValue::Byte(_) => ExifDataType::Byte,
            ExifValue::Ascii(_) => ExifDataType::Ascii,
            ExifValue::Short(_) => ExifDataType::Short,
            ExifValue::Long(_) => ExifDataType::Long,
            ExifValue::Rational(_) => ExifDataType::Rational,
            ExifValue::SignedByte(_) => ExifDataType::SignedByte,
            ExifValue::Undefined(_) => ExifDataType::Undefined,
            ExifValue::SignedShort(_) => ExifDataType::SignedShort,
            ExifValue::SignedLong(_) => ExifDataType::SignedLong,
            ExifValue::SignedRational(_) => ExifDataType::SignedRational,
            ExifValue::Float(_) => ExifDataType::SingleFloat,
            ExifValue::Double(_) => ExifDataType::DoubleFloat,
            ExifValue::Bytes(_) => ExifDataType::Byte,
            ExifValue::List(list) => list
                .first()
                .map_or(ExifDataType::Unknown, |first| first.data_type()),
        }
    }
}

type Converter = fn(&[u8], ByteOrder) -> ExifValue;

/// Maps a data type to the function decoding a single component of it.
fn converter(data_type: ExifDataType) -> Option<Converter> {
    let converter: Converter = match data_type {
        ExifDataType::Unknown => return None,
        ExifDataType::Ascii => |data, _| ExifValue::Ascii(to_string(data)),
        ExifDataType::Byte => |data, _| ExifValue::Byte(to_byte(data)),
        ExifDataType::Undefined => |data, _| ExifValue::Undefined(to_byte(data)),
        ExifDataType::SignedByte => |data, _| ExifValue::SignedByte(to_signed_byte(data)),
        ExifDataType::Short => |data, order| ExifValue::Short(to_short(data, order)),
        ExifDataType::SignedShort => {
            |data, order| ExifValue::SignedShort(to_signed_short(data, order))
        }
        ExifDataType::Long => |data, order| ExifValue::Long(to_long(data, order)),
        ExifDataType::SignedLong => |data, order| ExifValue::SignedLong(to_signed_long(data, order)),
        ExifDataType::SingleFloat => |data, order| ExifValue::Float(to_single(data, order)),
        ExifDataType::DoubleFloat => |data, order| ExifValue::Double(to_double(data, order)),
        ExifDataType::Rational => |data, order| ExifValue::Rational(to_rational(data, order)),
        ExifDataType::SignedRational => {
            |data, order| ExifValue::SignedRational(to_signed_rational(data, order))
        }
    };
    Some(converter)
}

/// Decodes the value bytes of one IFD entry.
///
/// Returns `None` for an empty slice and for `Unknown` data. A single component decodes the start
/// of `data` as a scalar. Any other component count (zero included) produces an array sized by
/// `data` rather than by the count: raw [ExifValue::Bytes] for `Byte`/`Undefined`, a
/// [ExifValue::List] of one value per whole component for everything else. `Ascii` is always a
/// single string.
pub fn decode(
    data_type: ExifDataType,
    data: &[u8],
    components: u32,
    byte_order: ByteOrder,
) -> Option<ExifValue> {
    if data.is_empty() {
        return None;
    }
    let convert = converter(data_type)?;
    let value = match data_type {
        ExifDataType::Ascii => convert(data, byte_order),
        _ if components == 1 => convert(data, byte_order),
        ExifDataType::Byte | ExifDataType::Undefined => ExifValue::Bytes(data.to_vec()),
        _ => ExifValue::List(
            data.chunks_exact(data_type.size())
                .map(|chunk| convert(chunk, byte_order))
                .collect(),
        ),
    };
    Some(value)
}

pub fn to_byte(data: &[u8]) -> u8 {
    data.first().copied().unwrap_or_default()
}

/// Computes `byte - 255` wrapped into an `i8`. This is not the two's complement reading of the
/// byte (`0xFF` decodes to `0`, `0x00` to `1`), and existing consumers rely on exactly this.
pub fn to_signed_byte(data: &[u8]) -> i8 {
    (to_byte(data) as i32 - u8::MAX as i32) as i8
}

pub fn to_short(data: &[u8], byte_order: ByteOrder) -> u16 {
    byte_order.read_u16(data)
}

pub fn to_signed_short(data: &[u8], byte_order: ByteOrder) -> i16 {
    byte_order.read_i16(data)
}

pub fn to_long(data: &[u8], byte_order: ByteOrder) -> u32 {
    byte_order.read_u32(data)
}

pub fn to_signed_long(data: &[u8], byte_order: ByteOrder) -> i32 {
    byte_order.read_i32(data)
}

pub fn to_single(data: &[u8], byte_order: ByteOrder) -> f32 {
    byte_order.read_f32(data)
}

pub fn to_double(data: &[u8], byte_order: ByteOrder) -> f64 {
    byte_order.read_f64(data)
}

/// numerator / denominator, both unsigned. A zero denominator gives inf or NaN.
pub fn to_rational(data: &[u8], byte_order: ByteOrder) -> f64 {
    if data.len() < 8 {
        return 0.0;
    }
    let numerator = byte_order.read_u32(&data[0..4]);
    let denominator = byte_order.read_u32(&data[4..8]);
    numerator as f64 / denominator as f64
}

pub fn to_signed_rational(data: &[u8], byte_order: ByteOrder) -> f64 {
    if data.len() < 8 {
        return 0.0;
    }
    let numerator = byte_order.read_i32(&data[0..4]);
    let denominator = byte_order.read_i32(&data[4..8]);
    numerator as f64 / denominator as f64
}

/// Decodes UTF-8 (invalid sequences are replaced) and cuts at the first NUL.
pub fn to_string(data: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(data);
    match decoded.find('\0') {
        Some(end) => decoded[..end].to_string(),
        None => decoded.into_owned(),
    }
}
