use byteorder::ByteOrder;
use bytes::{Bytes, BytesMut};

use super::errors::{EncodeError, EncodeErrorValue};

/// Append-only buffer for view payloads
#[derive(Debug, Default)]
pub struct ViewWriter {
    bytes: BytesMut,
}

impl ViewWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: BytesMut::new(),
        }
    }

    pub fn write_u8(&mut self, byte: u8) {
        self.bytes.extend_from_slice(&[byte]);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_u32<T: ByteOrder>(&mut self, value: u32) {
        let mut buf = [0u8; 4];
        T::write_u32(&mut buf, value);
        self.bytes.extend_from_slice(&buf);
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Length-prefixed count or size, rejected if it does not fit in u32
    pub fn write_len<T: ByteOrder>(
        &mut self,
        field: &'static str,
        length: usize,
    ) -> Result<(), EncodeError> {
        let prefix = u32::try_from(length)
            .map_err(|_| EncodeErrorValue::LengthOverflow { field, length })?;
        self.write_u32::<T>(prefix);
        Ok(())
    }

    /// UTF-8 string with a u32 byte length prefix
    pub fn write_string<T: ByteOrder>(
        &mut self,
        field: &'static str,
        value: &str,
    ) -> Result<(), EncodeError> {
        self.write_len::<T>(field, value.len())?;
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn get_current_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn freeze(self) -> Bytes {
        self.bytes.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::BigEndian;

    #[test]
    fn test_big_endian_layout() {
        let mut writer = ViewWriter::new();
        writer.write_u32::<BigEndian>(0x0102_0304);
        writer.write_bool(true);
        assert_eq!(writer.get_current_bytes(), &[1, 2, 3, 4, 1]);
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let mut writer = ViewWriter::new();
        writer.write_string::<BigEndian>("name", "Steve").unwrap();
        assert_eq!(writer.len(), 4 + 5);
        assert_eq!(&writer.get_current_bytes()[..4], &[0, 0, 0, 5]);
        assert_eq!(&writer.get_current_bytes()[4..], b"Steve");
    }
}
