use std::string::FromUtf8Error;

use colony_core::models::Rank;

#[derive(Debug, thiserror::Error)]
pub enum DecodeErrorValue {
    #[error("not enough bytes to read {field}: need {needed}, have {remaining}")]
    NotEnoughBytes {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },
    #[error("invalid utf-8 in {field}: {source}")]
    InvalidUtf8 {
        field: &'static str,
        #[source]
        source: FromUtf8Error,
    },
    #[error("unknown {field} token: {token}")]
    UnknownToken { field: &'static str, token: String },
    #[error("unknown action bits {bits:#x} for rank {rank}")]
    UnknownActionBits { rank: Rank, bits: u32 },
    #[error("{field} length {length} exceeds limit {max}")]
    LimitExceeded {
        field: &'static str,
        length: u32,
        max: u32,
    },
    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),
}

#[derive(Debug, thiserror::Error)]
#[error("{value}")]
pub struct DecodeError {
    pub value: DecodeErrorValue,
}

impl From<DecodeErrorValue> for DecodeError {
    fn from(val: DecodeErrorValue) -> Self {
        Self { value: val }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeErrorValue {
    #[error("{field} length {length} does not fit a u32 prefix")]
    LengthOverflow { field: &'static str, length: usize },
}

#[derive(Debug, thiserror::Error)]
#[error("{value}")]
pub struct EncodeError {
    pub value: EncodeErrorValue,
}

impl From<EncodeErrorValue> for EncodeError {
    fn from(val: EncodeErrorValue) -> Self {
        Self { value: val }
    }
}
