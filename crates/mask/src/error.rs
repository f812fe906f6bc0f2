//! Error types for the dsample-mask crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the dsample-mask crate.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    /// Returned when the mask dataset file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a required layer is not present in the dataset.
    #[error("layer '{name}' not found in {}", path.display())]
    MissingLayer {
        /// Name of the missing layer.
        name: String,
        /// Path to the dataset that was inspected.
        path: PathBuf,
    },

    /// Returned when a layer lacks the `Type` attribute.
    #[error("layer '{layer}' has no 'Type' attribute")]
    MissingType {
        /// Name of the untyped layer.
        layer: String,
    },

    /// Returned when a layer's `Type` attribute is neither `Point` nor
    /// `Polygon`.
    #[error("layer '{layer}' has unknown mask type {kind:?}")]
    UnknownMaskType {
        /// Name of the layer.
        layer: String,
        /// The unrecognized `Type` attribute value.
        kind: String,
    },

    /// Returned when a layer is not a 2-D grid or its shape disagrees
    /// with the dataset's `ID` grid.
    #[error("layer '{name}' dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the layer.
        name: String,
        /// Expected value (dimension count or cell count).
        expected: usize,
        /// Actual value.
        got: usize,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },
}

impl From<netcdf::Error> for MaskError {
    fn from(e: netcdf::Error) -> Self {
        MaskError::Netcdf {
            reason: e.to_string(),
        }
    }
}
