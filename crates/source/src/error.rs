//! Error types for the dsample-source crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the dsample-source crate.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Returned when a file name does not end in a recognized datastream
    /// suffix (`gds`, `ds`, `gds.gz`, `ds.gz`).
    #[error("unsupported extension on {name:?} (must be gds, ds, gds.gz, or ds.gz)")]
    UnsupportedExtension {
        /// The offending file name.
        name: String,
    },

    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when the external converter process fails to start.
    #[error("failed to launch decoder {program:?}: {reason}")]
    DecoderLaunch {
        /// The executable that could not be spawned.
        program: String,
        /// Description of the launch failure.
        reason: String,
    },

    /// Wraps an I/O failure while opening a source.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
