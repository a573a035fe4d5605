//! Error types for chroma-core.
//!
//! The numeric kernels in this workspace are total over their element
//! domain; errors only surface when a caller hands in malformed input, such
//! as a tier name from the environment, a premultiplied color that breaks
//! the `channel <= alpha` invariant, or slices of unequal length.
//!
//! # Usage
//!
//! ```rust
//! use chroma_core::{Error, Premul8};
//!
//! let err = Premul8::try_new(200, 10, 10, 100).unwrap_err();
//! assert!(matches!(err, Error::InvalidPremultiplied { .. }));
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while constructing chroma values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A capability tier name could not be parsed.
    ///
    /// Accepted names are `scalar`, `x2`, `x4` and `auto`.
    #[error("unknown SIMD tier {name:?} (expected scalar, x2, x4 or auto)")]
    InvalidTier {
        /// The rejected name
        name: String,
    },

    /// A premultiplied color has a color channel larger than its alpha.
    #[error("premultiplied channel {channel} = {value} exceeds alpha {alpha}")]
    InvalidPremultiplied {
        /// Channel name (`r`, `g` or `b`)
        channel: char,
        /// Offending channel value, widened to f32
        value: f32,
        /// Alpha value, widened to f32
        alpha: f32,
    },

    /// Slices passed to an element-wise kernel differ in length.
    #[error("slice length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the first operand
        expected: usize,
        /// Length of the offending slice
        actual: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidTier`] error.
    #[inline]
    pub fn invalid_tier(name: impl Into<String>) -> Self {
        Self::InvalidTier { name: name.into() }
    }

    /// Returns [`Error::LengthMismatch`] unless `actual == expected`.
    #[inline]
    pub fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LengthMismatch { expected, actual })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tier_message() {
        let err = Error::invalid_tier("avx9000");
        let msg = err.to_string();
        assert!(msg.contains("avx9000"));
        assert!(msg.contains("scalar"));
    }

    #[test]
    fn test_invalid_premultiplied_message() {
        let err = Error::InvalidPremultiplied {
            channel: 'g',
            value: 12.0,
            alpha: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("g = 12"));
        assert!(msg.contains("alpha 10"));
    }

    #[test]
    fn test_check_len() {
        assert_eq!(Error::check_len(4, 4), Ok(()));
        let err = Error::check_len(4, 3).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { expected: 4, actual: 3 });
        assert_eq!(err.to_string(), "slice length mismatch: expected 4, got 3");
    }
}
