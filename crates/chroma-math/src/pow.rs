//! Real exponentiation built on [`ln`] and [`exp`].
//!
//! [`pow`] resolves every sign, zero, infinity and NaN combination per lane
//! with host `powf` conventions, then evaluates `exp(y * ln|x|)` on the
//! lanes that remain. [`pow_positive`] skips the resolution for callers
//! whose domain is already known to be `x >= 0, y > 0`.
//!
//! # Resolution order
//!
//! Later rules override earlier ones:
//!
//! 1. general lanes: `exp(y * ln|x|)`, negated for a negative base with an
//!    odd exponent, NaN for a negative base with a fractional exponent
//! 2. infinite exponent; `|x| == 1` gives 1 here, so `pow(-1, ±inf)` is 1
//!    as with host `powf`, not 0
//! 3. zero base, infinite base
//! 4. NaN in either operand
//! 5. exponent exactly 1: the base itself, exact even for subnormals
//! 6. base exactly 1
//! 7. exponent exactly 0
//!
//! # Example
//!
//! ```
//! use chroma_math::pow;
//!
//! assert!((pow(2.0_f64, 0.5) - 2.0_f64.sqrt()).abs() < 1e-15);
//! assert!((pow(-2.0_f64, 3.0) + 8.0).abs() < 1e-12);
//! assert!(pow(-2.0_f64, 0.5).is_nan());
//! assert_eq!(pow(f64::NAN, 0.0), 1.0);
//! ```

use crate::exp::exp;
use crate::lanes::Lanes;
use crate::log::ln;

/// `base ^ exponent` for every lane.
pub fn pow<V: Lanes>(base: V, exponent: V) -> V {
    let zero = V::splat(0.0);
    let one = V::splat(1.0);
    let inf = V::splat(f64::INFINITY);
    let nan = V::splat(f64::NAN);

    let x_nan = base.nan_mask();
    let y_nan = exponent.nan_mask();
    let y_inf = exponent.abs().eq_mask(inf);
    let mag = base.abs();
    let x_zero = mag.eq_mask(zero);
    let x_inf = mag.eq_mask(inf);

    let y = exponent.clamp_exact();
    let is_int = y.floor().eq_mask(y);
    let is_odd = is_int & (y - (y * V::splat(0.5)).floor() * V::splat(2.0)).eq_mask(one);
    // 1/-0 is -inf, which is how a negative zero shows itself.
    let neg_sign = base.lt_mask(zero) | (one / base).lt_mask(zero);
    let flip = neg_sign & is_odd;

    let general = !(x_zero | x_inf | x_nan | y_nan | y_inf);
    let safe_mag = general.select(mag, one);
    let safe_y = general.select(y, zero);
    let mut r = exp(safe_y * ln(safe_mag));
    r = (general & flip).select(r.negate(), r);
    r = (general & neg_sign & !is_int).select(nan, r);

    let y_pos = exponent.gt_mask(zero);
    let y_neg = exponent.lt_mask(zero);

    let above = mag.gt_mask(one);
    let below = mag.lt_mask(one);
    // |x| == 1 falls through to 1, including x = -1.
    let at_inf_y = above.select(
        y_pos.select(inf, zero),
        below.select(y_pos.select(zero, inf), one),
    );
    r = (y_inf & !x_nan).select(at_inf_y, r);

    let finite_y = !(y_inf | y_nan);
    let signed_zero = flip.select(zero.negate(), zero);
    let signed_inf = flip.select(inf.negate(), inf);
    r = (x_zero & finite_y & y_pos).select(signed_zero, r);
    r = (x_zero & finite_y & y_neg).select(signed_inf, r);
    r = (x_inf & finite_y & y_pos).select(signed_inf, r);
    r = (x_inf & finite_y & y_neg).select(signed_zero, r);

    r = (x_nan | y_nan).select(nan, r);
    r = exponent.eq_mask(one).select(base, r);
    r = base.eq_mask(one).select(one, r);
    exponent.eq_mask(zero).select(one, r)
}

/// `base ^ exponent` for `base >= 0` and `exponent > 0`.
///
/// No sign, NaN or infinity handling: a zero base gives `exp(-inf) = 0`,
/// which is the right answer on this domain. Outside it the result is
/// unspecified.
#[inline]
pub fn pow_positive<V: Lanes>(base: V, exponent: V) -> V {
    exp(exponent * ln(base))
}

/// Scalar [`pow`].
#[inline]
pub fn pow_f64(base: f64, exponent: f64) -> f64 {
    pow(base, exponent)
}

/// Scalar [`pow`] for `f32` operands, computed in `f64`.
#[inline]
pub fn pow_f32(base: f32, exponent: f32) -> f32 {
    pow(f64::from(base), f64::from(exponent)) as f32
}

/// Scalar [`ln`].
#[inline]
pub fn ln_f64(x: f64) -> f64 {
    ln(x)
}

/// Scalar [`exp`].
#[inline]
pub fn exp_f64(p: f64) -> f64 {
    exp(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use wide::f64x4;

    const INF: f64 = f64::INFINITY;

    fn same(a: f64, b: f64) -> bool {
        (a.is_nan() && b.is_nan()) || (a == b && a.is_sign_negative() == b.is_sign_negative())
    }

    #[test]
    fn test_pow_general() {
        assert_relative_eq!(pow(2.0_f64, 10.0), 1024.0, max_relative = 1e-13);
        assert_relative_eq!(pow(10.0_f64, -2.0), 0.01, max_relative = 1e-13);
        assert_relative_eq!(pow(0.5_f64, 1.0 / 2.4), 0.5_f64.powf(1.0 / 2.4), max_relative = 1e-14);
        assert_relative_eq!(pow(1e-5_f64, 2.4), 1e-5_f64.powf(2.4), max_relative = 1e-13);
    }

    #[test]
    fn test_pow_negative_base() {
        assert_relative_eq!(pow(-2.0_f64, 2.0), 4.0, max_relative = 1e-14);
        assert_relative_eq!(pow(-2.0_f64, 3.0), -8.0, max_relative = 1e-14);
        assert_relative_eq!(pow(-0.5_f64, -3.0), -8.0, max_relative = 1e-14);
        assert!(pow(-2.0_f64, 1.5).is_nan());
    }

    #[test]
    fn test_pow_zero_base() {
        assert!(same(pow(0.0, 3.0), 0.0));
        assert!(same(pow(-0.0, 3.0), -0.0));
        assert!(same(pow(-0.0, 2.0), 0.0));
        assert!(same(pow(-0.0, 0.5), 0.0));
        assert!(same(pow(0.0, -1.0), INF));
        assert!(same(pow(-0.0, -1.0), -INF));
        assert!(same(pow(-0.0, -2.0), INF));
    }

    #[test]
    fn test_pow_infinite_base() {
        assert!(same(pow(INF, 2.0), INF));
        assert!(same(pow(INF, -2.0), 0.0));
        assert!(same(pow(-INF, 3.0), -INF));
        assert!(same(pow(-INF, 2.0), INF));
        assert!(same(pow(-INF, -3.0), -0.0));
        assert!(same(pow(-INF, -0.5), 0.0));
    }

    #[test]
    fn test_pow_infinite_exponent() {
        assert!(same(pow(2.0, INF), INF));
        assert!(same(pow(2.0, -INF), 0.0));
        assert!(same(pow(0.5, INF), 0.0));
        assert!(same(pow(-0.5, -INF), INF));
        assert!(same(pow(-1.0, INF), 1.0));
        assert!(same(pow(0.0, -INF), INF));
    }

    #[test]
    fn test_pow_unit_base_infinite_exponent() {
        assert!(same(pow(-1.0, INF), 1.0));
        assert!(same(pow(-1.0, -INF), 1.0));
        assert!(same(pow(1.0, -INF), 1.0));
        assert_eq!(pow(-1.0, INF), (-1.0_f64).powf(INF));
    }

    #[test]
    fn test_pow_unit_exponent_is_exact() {
        let tiny = f64::from_bits(1);
        assert_eq!(pow(tiny, 1.0).to_bits(), tiny.to_bits());
        assert_eq!(pow(-tiny, 1.0).to_bits(), (-tiny).to_bits());
        assert!(same(pow(-0.0, 1.0), -0.0));
        assert!(same(pow(-INF, 1.0), -INF));
        assert!(pow(f64::NAN, 1.0).is_nan());
        assert_eq!(pow(1e-310, 1.0), 1e-310);

        let lanes = pow(f64x4::from([tiny, -3.5, 1e-320, 7.0]), f64x4::splat(1.0));
        assert_eq!(lanes.to_array(), [tiny, -3.5, 1e-320, 7.0]);
    }

    #[test]
    fn test_pow_nan_rules() {
        assert!(pow(f64::NAN, 2.0).is_nan());
        assert!(pow(2.0, f64::NAN).is_nan());
        assert_eq!(pow(1.0, f64::NAN), 1.0);
        assert_eq!(pow(f64::NAN, 0.0), 1.0);
        assert_eq!(pow(0.0, 0.0), 1.0);
        assert_eq!(pow(INF, -0.0), 1.0);
    }

    #[test]
    fn test_pow_huge_exponent_is_clamped() {
        // 1e300 is an even integer; the clamp keeps it even.
        assert_eq!(pow(-2.0, 1e300), INF);
        assert_eq!(pow(-0.5, 1e300), 0.0);
    }

    #[test]
    fn test_pow_lanes_match_scalar() {
        let bases = [-2.0, 0.0, 3.5, f64::NAN];
        let exps = [3.0, -1.0, 0.25, 0.0];
        let v = pow(f64x4::from(bases), f64x4::from(exps)).to_array();
        for i in 0..4 {
            assert!(same(v[i], pow(bases[i], exps[i])), "lane {i}");
        }
    }

    #[test]
    fn test_pow_positive() {
        assert_eq!(pow_positive(0.0_f64, 2.4), 0.0);
        assert_relative_eq!(pow_positive(0.25_f64, 0.5), 0.5, max_relative = 1e-15);
    }

    #[test]
    fn test_scalar_helpers() {
        assert_relative_eq!(pow_f32(3.0, 2.0), 9.0, max_relative = 1e-6);
        assert_relative_eq!(pow_f64(3.0, 2.0), 9.0, max_relative = 1e-14);
        assert_relative_eq!(ln_f64(10.0), std::f64::consts::LN_10, max_relative = 1e-14);
        assert_relative_eq!(exp_f64(2.0), 2.0_f64.exp(), max_relative = 1e-14);
    }
}
