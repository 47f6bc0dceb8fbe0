use byteorder::{BigEndian, ByteOrder as Endianness, LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Byte order of an Exif block, fixed once by the "II"/"MM" marker of the TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    LittleEndian,
    #[default]
    BigEndian,
}

impl ByteOrder {
    /// "II" selects little endian. Anything else (including "MM" and garbage) is big endian.
    pub fn from_marker(marker: &[u8]) -> Self {
        if marker == b"II" {
            Self::LittleEndian
        } else {
            Self::BigEndian
        }
    }

    pub fn is_little_endian(&self) -> bool {
        matches!(self, Self::LittleEndian)
    }
}

// slice reads yield the zero value of the type when the slice is too short
macro_rules! generate_slice_read_function {
    ($name:ident, $kind:ty) => {
        #[allow(unused)]
        pub fn $name(self, bytes: &[u8]) -> $kind {
            if bytes.len() < std::mem::size_of::<$kind>() {
                return <$kind>::default();
            }
            match self {
                ByteOrder::LittleEndian => LittleEndian::$name(bytes),
                ByteOrder::BigEndian => BigEndian::$name(bytes),
            }
        }
    };
}
impl ByteOrder {
    generate_slice_read_function!(read_u16, u16);
    generate_slice_read_function!(read_i16, i16);
    generate_slice_read_function!(read_u32, u32);
    generate_slice_read_function!(read_i32, i32);
    generate_slice_read_function!(read_f32, f32);
    generate_slice_read_function!(read_f64, f64);
}

/// A saved cursor position, see [ByteOrderReader::checkpoint].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(u64);

/// A cursor over an in-memory Exif block that reads multi-byte values in the block's byte order.
///
/// Reads never fail: a read that would run past the end of the buffer yields the zero value
/// and leaves the cursor where it was.
pub struct ByteOrderReader<'a> {
    reader: Cursor<&'a [u8]>,
    byte_order: ByteOrder,
}
impl<'a> ByteOrderReader<'a> {
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            reader: Cursor::new(data),
            byte_order,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order
    }

    pub fn position(&self) -> u64 {
        self.reader.position()
    }
    pub fn seek_to(&mut self, position: u64) {
        self.reader.set_position(position)
    }
    pub fn len(&self) -> usize {
        self.reader.get_ref().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Number of bytes between the cursor and the end of the buffer (0 if the cursor is past it).
    pub fn remaining(&self) -> u64 {
        (self.len() as u64).saturating_sub(self.position())
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position())
    }
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.seek_to(checkpoint.0)
    }

    /// Borrows the next `length` bytes straight out of the underlying buffer.
    pub fn read_bytes(&mut self, length: usize) -> Option<&'a [u8]> {
        if self.remaining() < length as u64 {
            return None;
        }
        let data: &'a [u8] = *self.reader.get_ref();
        let start = self.position() as usize;
        self.seek_to((start + length) as u64);
        Some(&data[start..start + length])
    }
}

macro_rules! generate_read_function {
    ($name:ident, $kind:ty) => {
        #[allow(unused)]
        pub fn $name(&mut self) -> $kind {
            let checkpoint = self.checkpoint();
            let value = if self.byte_order.is_little_endian() {
                self.reader.$name::<LittleEndian>()
            } else {
                self.reader.$name::<BigEndian>()
            };
            value.unwrap_or_else(|_| {
                self.restore(checkpoint);
                <$kind>::default()
            })
        }
    };
}
impl<'a> ByteOrderReader<'a> {
    generate_read_function!(read_u16, u16);
    generate_read_function!(read_u32, u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_detection() {
        assert_eq!(ByteOrder::from_marker(b"II"), ByteOrder::LittleEndian);
        assert_eq!(ByteOrder::from_marker(b"MM"), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::from_marker(b"XX"), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::from_marker(b"I"), ByteOrder::BigEndian);
    }

    #[test]
    fn test_slice_reads_respect_order() {
        let bytes = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(ByteOrder::LittleEndian.read_u16(&bytes), 0x0201);
        assert_eq!(ByteOrder::BigEndian.read_u16(&bytes), 0x0102);
        assert_eq!(ByteOrder::LittleEndian.read_u32(&bytes), 0x04030201);
        assert_eq!(ByteOrder::BigEndian.read_u32(&bytes), 0x01020304);
    }

    #[test]
    fn test_short_slices_yield_zero() {
        assert_eq!(ByteOrder::LittleEndian.read_u16(&[0xFF]), 0);
        assert_eq!(ByteOrder::BigEndian.read_i32(&[0xFF, 0xFF, 0xFF]), 0);
        assert_eq!(ByteOrder::BigEndian.read_f64(&[0xFF; 7]), 0.0);
    }

    #[test]
    fn test_exhausted_reader_does_not_advance() {
        let data = [0x2A, 0x00, 0x07];
        let mut reader = ByteOrderReader::new(&data, ByteOrder::LittleEndian);
        assert_eq!(reader.read_u16(), 42);
        assert_eq!(reader.read_u16(), 0);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.read_u32(), 0);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_checkpoint_restore() {
        let data = [1, 2, 3, 4, 5, 6];
        let mut reader = ByteOrderReader::new(&data, ByteOrder::BigEndian);
        reader.seek_to(1);
        let checkpoint = reader.checkpoint();
        reader.seek_to(4);
        assert_eq!(reader.read_bytes(2), Some(&data[4..6]));
        assert_eq!(reader.read_bytes(1), None);
        reader.restore(checkpoint);
        assert_eq!(reader.position(), 1);

        reader.seek_to(100);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.read_u32(), 0);
    }
}
