//! Dense gamma lookup tables for integer channels.
//!
//! A [`GammaTable<T>`] has one entry per channel value (256 for `u8`,
//! 65536 for `u16`) and maps a channel directly to its gamma-corrected
//! value:
//!
//! ```text
//! table[i] = floor(MAX * (i / MAX)^(1 / gamma) + 0.5)
//! ```
//!
//! [`NarrowingGammaTable`] does the same from a 16-bit index to an 8-bit
//! value, for pipelines that keep 16 bits of precision until the final
//! gamma step.
//!
//! # Example
//!
//! ```rust
//! use chroma_lut::GammaTable;
//!
//! let table = GammaTable::<u8>::build(2.2).unwrap();
//! assert_eq!(table.len(), 256);
//! assert_eq!(table.look_up(0), 0);
//! assert_eq!(table.look_up(255), 255);
//! assert!(table.look_up(64) > 64);
//! ```
//!
//! Entries are computed in lane batches through the tier's
//! `pow_positive` slice kernel; the result does not depend on the tier.

use chroma_core::{IntChannel, Tier};
use chroma_math::Kernels;
use tracing::{debug, trace};

use crate::{LutError, LutResult};

/// Gammas closer to zero than this build the degenerate table.
pub const GAMMA_EPSILON: f64 = 1e-6;

/// Inputs evaluated per kernel call.
const BLOCK: usize = 256;

/// Lookup table from a channel value to its gamma-corrected value.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaTable<T: IntChannel> {
    gamma: f64,
    entries: Vec<T>,
}

impl<T: IntChannel> GammaTable<T> {
    /// Builds the table on the host's tier.
    ///
    /// # Errors
    ///
    /// [`LutError::InvalidGamma`] if `gamma` is negative, NaN or infinite.
    pub fn build(gamma: f64) -> LutResult<Self> {
        Self::build_with_tier(gamma, Tier::current())
    }

    /// Builds the table with an explicit lane width.
    pub fn build_with_tier(gamma: f64, tier: Tier) -> LutResult<Self> {
        let entries = build_entries::<T>(T::MAX_WIDE, gamma, tier)?;
        Ok(Self { gamma, entries })
    }

    /// Gamma the table was built for.
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Number of entries (`MAX + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a table covers every channel value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Entry at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.entries.get(index).copied()
    }

    /// Gamma-corrected value for a channel value.
    #[inline]
    pub fn look_up(&self, value: T) -> T {
        // Every channel value indexes a live entry.
        self.entries[value.widen() as usize]
    }

    /// Maps every value in place.
    pub fn apply(&self, values: &mut [T]) {
        for v in values {
            *v = self.look_up(*v);
        }
    }

    /// Takes the entries.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }
}

/// Lookup table from a 16-bit channel value to a gamma-corrected 8-bit
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrowingGammaTable {
    gamma: f64,
    entries: Vec<u8>,
}

impl NarrowingGammaTable {
    /// Builds the 65536-entry table on the host's tier.
    pub fn build(gamma: f64) -> LutResult<Self> {
        Self::build_with_tier(gamma, Tier::current())
    }

    /// Builds the table with an explicit lane width.
    pub fn build_with_tier(gamma: f64, tier: Tier) -> LutResult<Self> {
        let entries = build_entries::<u8>(<u16 as IntChannel>::MAX_WIDE, gamma, tier)?;
        Ok(Self { gamma, entries })
    }

    /// Gamma the table was built for.
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Number of entries (65536).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.entries
    }

    /// 8-bit gamma-corrected value for a 16-bit channel.
    #[inline]
    pub fn look_up(&self, value: u16) -> u8 {
        self.entries[usize::from(value)]
    }

    /// Narrows `src` into `dst`.
    ///
    /// # Errors
    ///
    /// [`LutError::LengthMismatch`] if the buffers differ in length.
    pub fn apply(&self, src: &[u16], dst: &mut [u8]) -> LutResult<()> {
        if src.len() != dst.len() {
            return Err(LutError::LengthMismatch {
                src: src.len(),
                dst: dst.len(),
            });
        }
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = self.look_up(s);
        }
        Ok(())
    }
}

/// Computes `index_max + 1` entries scaled to `T::MAX`.
fn build_entries<T: IntChannel>(index_max: u64, gamma: f64, tier: Tier) -> LutResult<Vec<T>> {
    if !gamma.is_finite() {
        return Err(LutError::InvalidGamma { gamma });
    }

    let size = index_max as usize + 1;
    trace!(gamma, size, tier = %tier, "building gamma table");

    if gamma.abs() < GAMMA_EPSILON {
        debug!(gamma, size, "degenerate gamma, building step table");
        let mut entries = vec![T::ZERO; size];
        if let Some(last) = entries.last_mut() {
            *last = T::MAX;
        }
        return Ok(entries);
    }
    if gamma < 0.0 {
        return Err(LutError::InvalidGamma { gamma });
    }

    let pow = Kernels::for_tier(tier).pow_positive;
    let out_max = T::MAX_WIDE as f64;
    let in_max = index_max as f64;
    let exponent = [1.0 / gamma; BLOCK];
    let mut input = [0.0; BLOCK];
    let mut output = [0.0; BLOCK];

    let mut entries = Vec::with_capacity(size);
    let mut start = 0;
    while start < size {
        let n = BLOCK.min(size - start);
        for (k, x) in input[..n].iter_mut().enumerate() {
            *x = (start + k) as f64 / in_max;
        }
        pow(&input[..n], &exponent[..n], &mut output[..n])?;
        entries.extend(output[..n].iter().map(|&v| quantize::<T>(v, out_max)));
        start += n;
    }
    Ok(entries)
}

/// `floor(max * v + 0.5)` saturated to the channel range.
#[inline]
fn quantize<T: IntChannel>(v: f64, max: f64) -> T {
    let scaled = (max * v + 0.5).floor().clamp(0.0, max);
    T::narrow(scaled as u64)
}
