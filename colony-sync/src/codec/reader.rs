use byteorder::ByteOrder;
use bytes::{Buf, Bytes};

use super::errors::{DecodeError, DecodeErrorValue};

/// Cursor over a received view payload
///
/// Every read checks the remaining length first, so a truncated payload
/// fails with [`DecodeErrorValue::NotEnoughBytes`] instead of panicking.
#[derive(Debug, Clone)]
pub struct ViewReader {
    buffer: Bytes,
}

impl ViewReader {
    #[must_use]
    pub const fn new(buffer: Bytes) -> Self {
        Self { buffer }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }

    fn ensure(&self, field: &'static str, needed: usize) -> Result<(), DecodeError> {
        if self.buffer.len() < needed {
            return Err(DecodeErrorValue::NotEnoughBytes {
                field,
                needed,
                remaining: self.buffer.len(),
            }
            .into());
        }
        Ok(())
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        self.ensure(field, 1)?;
        Ok(self.buffer.get_u8())
    }

    /// Strict boolean: only `0` and `1` are accepted
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        match self.read_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeErrorValue::InvalidBool(other).into()),
        }
    }

    pub fn read_u32<T: ByteOrder>(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        self.ensure(field, 4)?;
        let value = T::read_u32(&self.buffer[..4]);
        self.buffer.advance(4);
        Ok(value)
    }

    pub fn read_bytes(&mut self, field: &'static str, len: usize) -> Result<Bytes, DecodeError> {
        self.ensure(field, len)?;
        Ok(self.buffer.split_to(len))
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        self.ensure(field, N)?;
        let mut out = [0u8; N];
        self.buffer.copy_to_slice(&mut out);
        Ok(out)
    }

    /// u32 count prefix bounded by `max`
    pub fn read_len<T: ByteOrder>(
        &mut self,
        field: &'static str,
        max: u32,
    ) -> Result<usize, DecodeError> {
        let length = self.read_u32::<T>(field)?;
        if length > max {
            return Err(DecodeErrorValue::LimitExceeded { field, length, max }.into());
        }
        Ok(length as usize)
    }

    /// u32 length-prefixed UTF-8 string of at most `max_len` bytes
    pub fn read_string<T: ByteOrder>(
        &mut self,
        field: &'static str,
        max_len: u32,
    ) -> Result<String, DecodeError> {
        let len = self.read_len::<T>(field, max_len)?;
        let raw = self.read_bytes(field, len)?;
        String::from_utf8(raw.to_vec())
            .map_err(|source| DecodeErrorValue::InvalidUtf8 { field, source }.into())
    }

    /// Unread tail of the buffer
    #[must_use]
    pub fn into_remaining(self) -> Bytes {
        self.buffer
    }
}
