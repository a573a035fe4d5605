//! SIMD capability tiers.
//!
//! A [`Tier`] is the opaque capability tag the kernels are dispatched on.
//! It only says how many `f64` lanes one kernel step processes; the
//! algorithms themselves are identical across tiers.
//!
//! | Tier | Lanes | Selected when |
//! |------|-------|---------------|
//! | [`Tier::Scalar`] | 1 | no SIMD detected |
//! | [`Tier::X2`] | 2 | SSE2 (x86) or NEON (aarch64) |
//! | [`Tier::X4`] | 4 | AVX (x86) |
//!
//! [`Tier::current`] probes the host once, applies the
//! `CHROMA_SIMD_TIER` override (see [`crate::config`]) and caches the
//! answer for the lifetime of the process.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::debug;

use crate::config;
use crate::error::{Error, Result};

/// Cached process-wide tier.
static CURRENT_TIER: OnceLock<Tier> = OnceLock::new();

/// Vector width tier used to pick a kernel implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Tier {
    /// One lane, plain scalar code.
    #[default]
    Scalar,
    /// Two `f64` lanes (128-bit vectors).
    X2,
    /// Four `f64` lanes (256-bit vectors).
    X4,
}

impl Tier {
    /// Every tier, narrowest first.
    pub const ALL: [Tier; 3] = [Tier::Scalar, Tier::X2, Tier::X4];

    /// Number of `f64` lanes processed per step.
    #[inline]
    pub const fn lanes(self) -> usize {
        match self {
            Tier::Scalar => 1,
            Tier::X2 => 2,
            Tier::X4 => 4,
        }
    }

    /// Lower-case tier name, as accepted by [`FromStr`].
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Tier::Scalar => "scalar",
            Tier::X2 => "x2",
            Tier::X4 => "x4",
        }
    }

    /// Probes the widest tier the host supports.
    ///
    /// Unlike [`Tier::current`] this runs the probe on every call and
    /// ignores the environment override.
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub fn detect() -> Self {
        if is_x86_feature_detected!("avx") {
            Tier::X4
        } else if is_x86_feature_detected!("sse2") {
            Tier::X2
        } else {
            Tier::Scalar
        }
    }

    /// Probes the widest tier the host supports.
    #[cfg(target_arch = "aarch64")]
    pub fn detect() -> Self {
        Tier::X2
    }

    /// Probes the widest tier the host supports.
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    pub fn detect() -> Self {
        Tier::Scalar
    }

    /// Tier used by the default dispatch, probed once per process.
    ///
    /// An override wider than the detected tier is narrowed to the detected
    /// tier. The returned value never changes after the first call.
    pub fn current() -> Self {
        *CURRENT_TIER.get_or_init(|| {
            let detected = Self::detect();
            let tier = match config::tier_override() {
                Some(requested) => requested.min(detected),
                None => detected,
            };
            debug!(tier = %tier, detected = %detected, "selected SIMD tier");
            tier
        })
    }

    /// Whether this tier can run on the current host.
    #[inline]
    pub fn is_supported(self) -> bool {
        self <= Self::detect()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" | "x1" => Ok(Tier::Scalar),
            "x2" | "sse2" | "neon" => Ok(Tier::X2),
            "x4" | "avx" | "avx2" => Ok(Tier::X4),
            _ => Err(Error::invalid_tier(s)),
        }
    }
}
