//! Natural logarithm by range reduction and a Taylor series.
//!
//! # Algorithm
//!
//! 1. Subnormal inputs are first scaled by `2^64` so the reduction below
//!    never multiplies a value with a short mantissa.
//! 2. Move each lane into `(1/e, 1]`: multiply by `e` while the value is
//!    `<= 1/e` (count `-1` per step), then divide by `e` while it is `> 1`
//!    (count `+1`). The two loops run one after the other so a lane can
//!    never ping-pong between them.
//! 3. With `d = 1 - x`, sum `ln(1 - d) = -(d + d^2/2 + d^3/3 + ...)` until
//!    the running sum stops changing, at most [`LN_MAX_TERMS`] terms.
//! 4. `ln(x) = count + series` (minus `64 ln 2` for scaled lanes).
//!
//! Every loop runs under an active-lane mask; a finished lane is never
//! updated again.

use std::f64::consts::{E, LN_2};

use crate::lanes::{Lanes, Mask};

/// Upper bound on series terms. With `d <= 1 - 1/e` the terms drop below
/// f64 resolution well before this.
pub const LN_MAX_TERMS: usize = 96;

const INV_E: f64 = 1.0 / E;

/// `2^64`, applied to subnormal inputs before reduction.
const SUBNORMAL_SCALE: f64 = 18_446_744_073_709_551_616.0;

/// Natural logarithm of every lane.
///
/// | input | result |
/// |-------|--------|
/// | `0` | `-inf` |
/// | `< 0`, NaN | NaN |
/// | `+inf` | `+inf` |
///
/// ```
/// use chroma_math::ln;
///
/// assert!((ln(std::f64::consts::E) - 1.0).abs() < 1e-15);
/// assert_eq!(ln(0.0_f64), f64::NEG_INFINITY);
/// assert!(ln(-1.0_f64).is_nan());
/// ```
pub fn ln<V: Lanes>(x: V) -> V {
    let zero = V::splat(0.0);
    let one = V::splat(1.0);
    let e = V::splat(E);
    let inv_e = V::splat(INV_E);

    let nan_lanes = x.nan_mask() | x.lt_mask(zero);
    let zero_lanes = x.eq_mask(zero);
    let inf_lanes = x.eq_mask(V::splat(f64::INFINITY));
    let special = nan_lanes | zero_lanes | inf_lanes;

    let subnormal = !special & x.lt_mask(V::splat(f64::MIN_POSITIVE));
    let mut r = special.select(one, x);
    r = subnormal.select(r * V::splat(SUBNORMAL_SCALE), r);
    let bias = subnormal.select(V::splat(-64.0 * LN_2), zero);
    let mut count = zero;

    loop {
        let active = r.le_mask(inv_e);
        if active.none() {
            break;
        }
        r = active.select(r * e, r);
        count = active.select(count - one, count);
    }

    loop {
        let active = r.gt_mask(one);
        if active.none() {
            break;
        }
        r = active.select(r / e, r);
        count = active.select(count + one, count);
    }

    let result = count + ln_reduced(r) + bias;
    let result = zero_lanes.select(V::splat(f64::NEG_INFINITY), result);
    let result = inf_lanes.select(V::splat(f64::INFINITY), result);
    nan_lanes.select(V::splat(f64::NAN), result)
}

/// `ln(x)` for `x` already reduced to about `(1/e, 1]`.
fn ln_reduced<V: Lanes>(x: V) -> V {
    let d = V::splat(1.0) - x;
    let mut power = d;
    let mut sum = V::splat(0.0);
    let mut active = Mask::<V>::all_set();

    for k in 1..=LN_MAX_TERMS {
        let next = sum + power / V::splat(k as f64);
        active = active & !next.eq_mask(sum);
        if active.none() {
            break;
        }
        sum = active.select(next, sum);
        power = power * d;
    }
    V::splat(0.0) - sum
}
