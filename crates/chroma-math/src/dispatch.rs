//! Capability-tiered slice kernels.
//!
//! A [`Kernels`] value is a table of plain function pointers, one table per
//! [`Tier`]. The tables differ only in the [`Lanes`] type their kernels are
//! instantiated with, so every tier computes bit-identical results; wider
//! tiers just do it in fewer iterations.
//!
//! ```rust
//! use chroma_core::Tier;
//! use chroma_math::Kernels;
//!
//! let src = [0.25, 4.0, 9.0];
//! let exponent = [0.5; 3];
//! let mut out = [0.0; 3];
//!
//! (Kernels::for_tier(Tier::X4).pow)(&src, &exponent, &mut out)?;
//! assert!((out[2] - 3.0).abs() < 1e-12);
//! # Ok::<(), chroma_core::Error>(())
//! ```
//!
//! # Remainders
//!
//! Slices are walked in chunks of `LANES`. The final partial chunk is padded
//! with `1.0` (a value every kernel accepts) in a stack buffer and only the
//! live lanes are written back.
//!
//! # Errors
//!
//! Every kernel returns [`Error::LengthMismatch`] when its slices differ in
//! length; nothing is written in that case.

use chroma_core::{Error, Result, Tier};
use wide::{f64x2, f64x4};

use crate::exp::exp;
use crate::lanes::{Lanes, MAX_LANES};
use crate::log::ln;
use crate::pow::{pow, pow_positive};
use crate::powi::powi;

/// `src -> dst` slice kernel.
pub type UnaryFn = fn(&[f64], &mut [f64]) -> Result<()>;

/// `(a, b) -> dst` slice kernel.
pub type BinaryFn = fn(&[f64], &[f64], &mut [f64]) -> Result<()>;

/// `src ^ n -> dst` slice kernel with one shared integer exponent.
pub type PowiFn = fn(&[f64], i32, &mut [f64]) -> Result<()>;

/// Function-pointer table for one capability tier.
#[derive(Debug)]
pub struct Kernels {
    /// Tier these kernels were instantiated for.
    pub tier: Tier,
    /// Natural log of every element.
    pub ln: UnaryFn,
    /// `e^x` of every element.
    pub exp: UnaryFn,
    /// Fully resolved `base ^ exponent`.
    pub pow: BinaryFn,
    /// `base ^ exponent` on `base >= 0, exponent > 0` only.
    pub pow_positive: BinaryFn,
    /// Integer power with one exponent for the whole slice.
    pub powi: PowiFn,
}

static SCALAR: Kernels = Kernels {
    tier: Tier::Scalar,
    ln: ln_into::<f64>,
    exp: exp_into::<f64>,
    pow: pow_into::<f64>,
    pow_positive: pow_positive_into::<f64>,
    powi: powi_into::<f64>,
};

static X2: Kernels = Kernels {
    tier: Tier::X2,
    ln: ln_into::<f64x2>,
    exp: exp_into::<f64x2>,
    pow: pow_into::<f64x2>,
    pow_positive: pow_positive_into::<f64x2>,
    powi: powi_into::<f64x2>,
};

static X4: Kernels = Kernels {
    tier: Tier::X4,
    ln: ln_into::<f64x4>,
    exp: exp_into::<f64x4>,
    pow: pow_into::<f64x4>,
    pow_positive: pow_positive_into::<f64x4>,
    powi: powi_into::<f64x4>,
};

impl Kernels {
    /// Table for an explicit tier.
    ///
    /// Any tier may be requested; the kernels are portable, the tier only
    /// picks the lane width.
    #[inline]
    pub fn for_tier(tier: Tier) -> &'static Kernels {
        match tier {
            Tier::Scalar => &SCALAR,
            Tier::X2 => &X2,
            Tier::X4 => &X4,
        }
    }

    /// Table for the tier probed on this host (see [`Tier::current`]).
    #[inline]
    pub fn current() -> &'static Kernels {
        Self::for_tier(Tier::current())
    }
}

/// Applies a lane kernel over `src`, writing `dst`.
pub fn map_unary<V: Lanes>(src: &[f64], dst: &mut [f64], f: impl Fn(V) -> V) -> Result<()> {
    Error::check_len(src.len(), dst.len())?;

    let mut src_chunks = src.chunks_exact(V::LANES);
    let mut dst_chunks = dst.chunks_exact_mut(V::LANES);
    for (s, d) in (&mut src_chunks).zip(&mut dst_chunks) {
        f(V::load(s)).store(d);
    }

    let rest = src_chunks.remainder();
    if !rest.is_empty() {
        let mut buf = [1.0; MAX_LANES];
        buf[..rest.len()].copy_from_slice(rest);
        let mut out = [0.0; MAX_LANES];
        f(V::load(&buf[..V::LANES])).store(&mut out[..V::LANES]);
        dst_chunks.into_remainder().copy_from_slice(&out[..rest.len()]);
    }
    Ok(())
}

/// Applies a two-operand lane kernel element-wise over `a` and `b`.
pub fn map_binary<V: Lanes>(
    a: &[f64],
    b: &[f64],
    dst: &mut [f64],
    f: impl Fn(V, V) -> V,
) -> Result<()> {
    Error::check_len(a.len(), b.len())?;
    Error::check_len(a.len(), dst.len())?;

    let n = V::LANES;
    let full = a.len() - a.len() % n;
    for i in (0..full).step_by(n) {
        let r = f(V::load(&a[i..i + n]), V::load(&b[i..i + n]));
        r.store(&mut dst[i..i + n]);
    }

    let rest = a.len() - full;
    if rest > 0 {
        let mut lhs = [1.0; MAX_LANES];
        let mut rhs = [1.0; MAX_LANES];
        lhs[..rest].copy_from_slice(&a[full..]);
        rhs[..rest].copy_from_slice(&b[full..]);
        let mut out = [0.0; MAX_LANES];
        f(V::load(&lhs[..n]), V::load(&rhs[..n])).store(&mut out[..n]);
        dst[full..].copy_from_slice(&out[..rest]);
    }
    Ok(())
}

fn ln_into<V: Lanes>(src: &[f64], dst: &mut [f64]) -> Result<()> {
    map_unary(src, dst, ln::<V>)
}

fn exp_into<V: Lanes>(src: &[f64], dst: &mut [f64]) -> Result<()> {
    map_unary(src, dst, exp::<V>)
}

fn pow_into<V: Lanes>(base: &[f64], exponent: &[f64], dst: &mut [f64]) -> Result<()> {
    map_binary(base, exponent, dst, pow::<V>)
}

fn pow_positive_into<V: Lanes>(base: &[f64], exponent: &[f64], dst: &mut [f64]) -> Result<()> {
    map_binary(base, exponent, dst, pow_positive::<V>)
}

fn powi_into<V: Lanes>(src: &[f64], n: i32, dst: &mut [f64]) -> Result<()> {
    map_unary(src, dst, |v: V| powi(v, n))
}

/// [`Kernels::ln`] on the current tier.
pub fn ln_slice(src: &[f64], dst: &mut [f64]) -> Result<()> {
    (Kernels::current().ln)(src, dst)
}

/// [`Kernels::exp`] on the current tier.
pub fn exp_slice(src: &[f64], dst: &mut [f64]) -> Result<()> {
    (Kernels::current().exp)(src, dst)
}

/// [`Kernels::pow`] on the current tier.
pub fn pow_slice(base: &[f64], exponent: &[f64], dst: &mut [f64]) -> Result<()> {
    (Kernels::current().pow)(base, exponent, dst)
}

/// [`Kernels::powi`] on the current tier.
pub fn powi_slice(src: &[f64], n: i32, dst: &mut [f64]) -> Result<()> {
    (Kernels::current().powi)(src, n, dst)
}
