//! Error types for the dsample-sampler crate.

use std::path::PathBuf;

use dsample_codec::CodecError;
use dsample_mask::MaskError;
use dsample_source::SourceError;

/// Error type for all fallible operations in the dsample-sampler crate.
///
/// Everything here is unrecoverable for the current sampling run: the
/// input stream is corrupt or the mask/resolution configuration is wrong,
/// and retrying cannot change the outcome.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// Returned when a mask layer's grid shape disagrees with the
    /// dataset's `ID` grid.
    #[error(
        "layer '{layer}' shape {got_ny}x{got_nx} does not match ID grid {ny}x{nx}"
    )]
    ShapeMismatch {
        /// Name of the offending layer.
        layer: String,
        /// ID grid rows.
        ny: usize,
        /// ID grid columns.
        nx: usize,
        /// Layer rows.
        got_ny: usize,
        /// Layer columns.
        got_nx: usize,
    },

    /// Returned when the ID grid names an identifier larger than the
    /// stream's item count, which would index past the record.
    #[error("identifier {max_id} exceeds stream item count {item_count}")]
    IdOutOfRange {
        /// Largest identifier present in the ID grid.
        max_id: u32,
        /// Item count declared by the stream header.
        item_count: usize,
    },

    /// Returned when a variable name is absent from the encoding registry.
    #[error("unknown variable {name:?} (not in the encoding registry)")]
    UnknownVariable {
        /// The unrecognized variable name.
        name: String,
    },

    /// Returned when a gdbc network template does not carry a `gdbn`
    /// suffix.
    #[error("network template must be a gdbn file: {}", path.display())]
    NotANetwork {
        /// The offending template path.
        path: PathBuf,
    },

    /// Wraps a datastream decoding failure, with the index of the record
    /// being decoded.
    #[error("record {record}: {source}")]
    Decode {
        /// Zero-based index of the record where decoding failed.
        record: usize,
        /// The underlying codec failure.
        source: CodecError,
    },

    /// Wraps a byte-source resolution or bridge failure.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Wraps a mask dataset failure.
    #[error(transparent)]
    Mask(#[from] MaskError),

    /// Wraps a CSV serialization failure.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an I/O failure (directory creation, table writes).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for SampleError {
    fn from(e: csv::Error) -> Self {
        SampleError::Csv {
            reason: e.to_string(),
        }
    }
}
