//! # dsample-source
//!
//! Uniform byte sources for datastream decoding: raw or gzip-compressed
//! files (selected by file-name suffix), standard input, and the stdout
//! pipe of the external `rgis2ds` grid converter. All sources are
//! forward-only; nothing here assumes seekability.

mod bridge;
mod error;
mod resolve;

pub use bridge::{CONVERTER, spawn_converter};
pub use error::SourceError;
pub use resolve::{ByteSource, is_compressed};
