//! Error types for the dsample-codec crate.

/// Error type for all fallible operations in the dsample-codec crate.
///
/// Every variant indicates a corrupt or truncated input stream and is
/// unrecoverable for the current decode run.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Returned when a header carries a type code outside {5, 6, 7, 8}.
    #[error("unknown value format: type {code}")]
    UnknownFormat {
        /// The unrecognized type code.
        code: i16,
    },

    /// Returned when the stream ends before a full 40-byte header.
    #[error("truncated header: expected {expected} bytes, got {got}")]
    TruncatedHeader {
        /// Number of header bytes required.
        expected: usize,
        /// Number of bytes actually available.
        got: usize,
    },

    /// Returned when the stream ends before a full record payload.
    #[error("truncated record: expected {expected} bytes, got {got}")]
    TruncatedRecord {
        /// Number of payload bytes required.
        expected: usize,
        /// Number of bytes actually available.
        got: usize,
    },

    /// Returned when the header date string does not parse under the
    /// format implied by the active resolution.
    #[error("malformed header date {text:?} (expected format {format})")]
    MalformedDate {
        /// The date text found in the header.
        text: String,
        /// The `chrono` format string that was expected.
        format: String,
    },

    /// Returned when the header item count is not a positive integer.
    #[error("invalid item count: {count}")]
    InvalidItemCount {
        /// The non-positive item count read from the header.
        count: i32,
    },

    /// Wraps a non-EOF I/O failure from the underlying byte source.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
