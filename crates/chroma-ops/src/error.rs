//! Error types for compositing operations.
//!
//! Per-pixel operations are total; only the slice helpers and parameter
//! validation return errors.

use thiserror::Error;

/// Error type for compositing operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Buffers have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for compositing operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Checks that two slices match in length.
pub(crate) fn check_len(what: &str, fg: usize, bg: usize) -> OpsResult<()> {
    if fg != bg {
        return Err(OpsError::SizeMismatch(format!(
            "{what}: fg has {fg} pixels, bg has {bg}"
        )));
    }
    Ok(())
}
