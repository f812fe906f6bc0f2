//! # dsample-sampler
//!
//! The decode-and-remap pipeline: a lazy iterator turning a datastream
//! byte source into (grid, date) record pairs, per-layer output tables,
//! the per-variable encoding registry, and the orchestration that writes
//! one CSV time-series table per mask layer.

mod encoding;
mod error;
mod iter;
mod sample;
mod table;

pub use encoding::{VarEncoding, encoding, known_variables};
pub use error::SampleError;
pub use iter::RecordIter;
pub use sample::{DataInput, MaskTable, build_tables, sample_datastream, sample_gdbc, sample_records};
pub use table::OutputTable;
