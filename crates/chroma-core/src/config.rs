//! Environment configuration.
//!
//! # Environment Variables
//!
//! - `CHROMA_SIMD_TIER` - force a kernel tier: `scalar`, `x2`, `x4` or
//!   `auto` (default). Read once, the first time [`crate::Tier::current`]
//!   runs. Unknown values are logged and ignored.

use std::env;

use tracing::warn;

use crate::error::Result;
use crate::tier::Tier;

/// Name of the tier override variable.
pub const SIMD_TIER_ENV: &str = "CHROMA_SIMD_TIER";

/// Reads the tier override from the environment.
///
/// Returns `None` when the variable is unset, empty, `auto`, or invalid.
pub fn tier_override() -> Option<Tier> {
    let raw = env::var(SIMD_TIER_ENV).ok()?;
    match parse_tier_override(&raw) {
        Ok(tier) => tier,
        Err(e) => {
            warn!(variable = SIMD_TIER_ENV, "ignoring override: {}", e);
            None
        }
    }
}

/// Parses an override value; `auto` and empty strings mean "no override".
pub fn parse_tier_override(value: &str) -> Result<Option<Tier>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    value.parse().map(Some)
}
