//! # dsample-codec
//!
//! Byte-level decoding of the RGIS datastream binary format: the 40-byte
//! record header, the type-code-to-numeric-type mapping, and the typed
//! record payload reader. All multi-byte fields are little-endian, matching
//! the producing toolchain.

mod error;
mod header;
mod record;
mod value_type;

pub use error::CodecError;
pub use header::{HEADER_LEN, Header, Missing};
pub use record::{Record, read_record};
pub use value_type::ValueType;
