//! Integer powers by binary exponentiation.
//!
//! Two forms:
//!
//! - [`powi`] - one exponent shared by every lane
//! - [`powi_lanes`] - one integral exponent per lane
//!
//! Negative exponents invert the base with a full division before the loop.
//! An exponent of zero yields 1 in every lane, including a zero base; the
//! `0^0` convention for real exponents is decided by [`crate::pow`].

use crate::lanes::Lanes;

/// Raises every lane of `base` to the integer power `n`.
///
/// ```
/// use chroma_math::powi;
///
/// assert_eq!(powi(3.0_f64, 4), 81.0);
/// assert_eq!(powi(2.0_f64, -2), 0.25);
/// assert_eq!(powi(0.0_f64, 0), 1.0);
/// ```
#[inline]
pub fn powi<V: Lanes>(base: V, n: i32) -> V {
    let (mut term, mut bits) = if n < 0 {
        (V::splat(1.0) / base, n.unsigned_abs())
    } else {
        (base, n.unsigned_abs())
    };

    let mut acc = V::splat(1.0);
    while bits > 0 {
        if bits & 1 == 1 {
            acc = acc * term;
        }
        bits >>= 1;
        if bits > 0 {
            term = term * term;
        }
    }
    acc
}

/// Raises each lane of `base` to the integral power in the same lane of
/// `exponent`.
///
/// Exponents are clamped to `±2^53` and truncated toward zero. NaN
/// exponents behave as zero; callers that care resolve NaN beforehand.
///
/// ```
/// use chroma_math::powi_lanes;
/// use wide::f64x2;
///
/// let r = powi_lanes(f64x2::from([2.0, 10.0]), f64x2::from([10.0, -1.0]));
/// assert_eq!(r.to_array(), [1024.0, 0.1]);
/// ```
pub fn powi_lanes<V: Lanes>(base: V, exponent: V) -> V {
    let zero = V::splat(0.0);
    let one = V::splat(1.0);
    let half = V::splat(0.5);
    let two = V::splat(2.0);

    let e = exponent.nan_mask().select(zero, exponent).clamp_exact();
    let negative = e.lt_mask(zero);
    let mut term = negative.select(one / base, base);
    let mut n = negative.select(e.negate(), e).floor();
    let mut acc = one;

    loop {
        let active = n.gt_mask(zero);
        if active.none() {
            break;
        }
        let halved = (n * half).floor();
        let odd = active & (n - halved * two).eq_mask(one);
        acc = odd.select(acc * term, acc);
        term = active.select(term * term, term);
        n = halved;
    }
    acc
}
