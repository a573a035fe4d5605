//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building or applying a gamma table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LutError {
    /// Gamma is negative, NaN or infinite.
    #[error("invalid gamma: {gamma} (must be finite and >= 0)")]
    InvalidGamma {
        /// Rejected gamma
        gamma: f64,
    },

    /// Source and destination buffers differ in length.
    #[error("length mismatch: source has {src} values, destination {dst}")]
    LengthMismatch {
        /// Source length
        src: usize,
        /// Destination length
        dst: usize,
    },

    /// A math kernel rejected its slices.
    #[error(transparent)]
    Core(#[from] chroma_core::Error),
}
