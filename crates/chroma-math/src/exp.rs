//! Natural exponential by integer/fraction split.
//!
//! `p` is clamped to `±2^53`, split into `n = floor(p)` and `f = p - n` in
//! `[0, 1)`. `e^f` comes from its Taylor series under an active-lane mask
//! (at most [`EXP_MAX_TERMS`] terms) and `e^n` from [`powi_lanes`].
//!
//! NaN lanes are parked at 0 for the computation and restored at the end;
//! without that they would fall through the integer power as `e^0 = 1`.

use std::f64::consts::E;

use crate::lanes::{Lanes, Mask};
use crate::powi::powi_lanes;

/// Upper bound on series terms; `1/k!` reaches f64 resolution near k = 18.
pub const EXP_MAX_TERMS: usize = 32;

/// `e^p` for every lane.
///
/// `+inf` gives `+inf`, `-inf` and very negative values give 0, NaN gives
/// NaN.
///
/// ```
/// use chroma_math::exp;
///
/// assert!((exp(1.0_f64) - std::f64::consts::E).abs() < 1e-15);
/// assert_eq!(exp(f64::NEG_INFINITY), 0.0);
/// assert!(exp(f64::NAN).is_nan());
/// ```
pub fn exp<V: Lanes>(p: V) -> V {
    let nan_lanes = p.nan_mask();
    let p = nan_lanes.select(V::splat(0.0), p).clamp_exact();

    let n = p.floor();
    let f = p - n;

    let whole = powi_lanes(V::splat(E), n);
    let result = exp_reduced(f) * whole;
    nan_lanes.select(V::splat(f64::NAN), result)
}

/// `e^f` for `f` in `[0, 1)`.
fn exp_reduced<V: Lanes>(f: V) -> V {
    let mut term = V::splat(1.0);
    let mut sum = V::splat(1.0);
    let mut active = Mask::<V>::all_set();

    for k in 1..=EXP_MAX_TERMS {
        term = term * f / V::splat(k as f64);
        let next = sum + term;
        active = active & !next.eq_mask(sum);
        if active.none() {
            break;
        }
        sum = active.select(next, sum);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use wide::f64x4;

    #[test]
    fn test_exp_matches_std() {
        let inputs = [-700.0, -50.5, -1.0, -1e-9, 0.0, 1e-9, 0.5, 1.0, 2.302585, 10.25, 300.0, 709.0];
        for &p in &inputs {
            let got = exp(p);
            let want = p.exp();
            let rel = ((got - want) / want).abs();
            assert!(rel < 1e-12, "exp({p}) = {got}, want {want}");
        }
    }

    #[test]
    fn test_exp_zero_is_one() {
        assert_eq!(exp(0.0_f64), 1.0);
        assert_eq!(exp(-0.0_f64), 1.0);
    }

    #[test]
    fn test_exp_specials() {
        let r = exp(f64x4::from([f64::INFINITY, f64::NEG_INFINITY, 1e300, -1e300])).to_array();
        assert_eq!(r, [f64::INFINITY, 0.0, f64::INFINITY, 0.0]);
    }

    #[test]
    fn test_exp_nan_is_not_one() {
        let r = exp(f64x4::from([f64::NAN, 0.0, f64::NAN, 1.0])).to_array();
        assert!(r[0].is_nan());
        assert_eq!(r[1], 1.0);
        assert!(r[2].is_nan());
        assert!((r[3] - E).abs() < 1e-15);
    }

    #[test]
    fn test_exp_overflow_boundary() {
        assert_eq!(exp(710.0_f64), f64::INFINITY);
        assert_eq!(exp(-746.0_f64), 0.0);
    }
}
