//! Binary primitives for colony view payloads
//!
//! All integers are big-endian. Strings carry a u32 byte length prefix.

pub mod errors;
pub mod reader;
pub mod writer;

pub use errors::{DecodeError, DecodeErrorValue, EncodeError, EncodeErrorValue};
pub use reader::ViewReader;
pub use writer::ViewWriter;

/// Byte order used on the wire
pub type WireOrder = byteorder::BigEndian;
