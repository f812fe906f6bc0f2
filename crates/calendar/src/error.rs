//! Error types for the dsample-calendar crate.

/// Error type for all fallible operations in the dsample-calendar crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a temporal resolution string is not recognized.
    #[error("invalid resolution: {value:?} (must be annual, monthly, or daily)")]
    InvalidResolution {
        /// The unrecognized resolution string that was provided.
        value: String,
    },
}
