//! Error types for view synchronization

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for view synchronization
pub type Result<T> = std::result::Result<T, Error>;
