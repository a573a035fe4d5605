//! Alpha compositing for 8-bit, 16-bit and float colors.
//!
//! # Operations
//!
//! - [`over_opaque`] - partially transparent source over an opaque backdrop
//! - [`over`] - Porter-Duff over, straight alpha on both sides
//! - [`premul_over`] - Porter-Duff over on premultiplied colors
//! - [`premultiply`] / [`unpremultiply`] - encoding conversions
//! - [`over_gamma`] - float over in linear light
//!
//! Each formula is implemented once per encoding through [`Composite`].
//!
//! # Rounding
//!
//! Integer encodings compute in `u64` and divide with round-half-up,
//! `(num + den / 2) / den`, then saturate. The one exception is
//! [`DivisionPolicy::Shift`] for [`over_opaque_with`], which replaces the
//! division by `MAX` with a shift by the channel width. Float encodings
//! compute in normalized units without clamping.
//!
//! # Example
//!
//! ```rust
//! use chroma_core::{Color8, Premul8};
//! use chroma_ops::composite::{over, over_opaque, premul_over};
//!
//! let fg = Color8::new(255, 0, 0, 128);
//! let bg = Color8::opaque(0, 0, 255);
//! assert_eq!(over_opaque(fg, bg).to_array(), [128, 0, 127, 255]);
//! assert_eq!(over(fg, bg).to_array(), [128, 0, 127, 255]);
//!
//! let p = premul_over(Premul8::new(128, 0, 0, 128), Premul8::new(0, 0, 255, 255));
//! assert_eq!(p.to_array(), [128, 0, 127, 255]);
//! ```

use chroma_core::{Channel, Color, ColorF, IntChannel, Premul};
use chroma_transfer::{linear_to_srgb_rgba, srgb_to_linear_rgba};
use tracing::{debug, trace, warn};

use crate::error::{check_len, OpsResult};

/// How [`over_opaque_with`] divides by `MAX` on integer channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionPolicy {
    /// True division with round-half-up.
    #[default]
    Exact,
    /// `(n + MAX) >> BITS`.
    ///
    /// Off by at most one unit from [`Exact`](Self::Exact); exact when the
    /// source alpha is 0 or `MAX`. Float channels ignore this setting.
    Shift,
}

/// Whether premultiplied results are checked against `channel <= alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Results are not checked and never flagged.
    #[default]
    Lenient,
    /// Every result is checked.
    Strict,
}

/// A result with a validity flag attached.
///
/// Compositing never aborts on bad input; in strict mode an invalid
/// result is returned with `valid == false` for the caller to act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checked<T> {
    /// The computed value.
    pub value: T,
    /// False if a check ran and failed.
    pub valid: bool,
}

impl<T> Checked<T> {
    /// The value if it passed, else `None`.
    #[inline]
    pub fn ok(self) -> Option<T> {
        self.valid.then_some(self.value)
    }

    /// The value, regardless of the flag.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Per-encoding compositing arithmetic.
pub trait Composite: Channel {
    /// `fg * a + bg * (MAX - a)` over `MAX`, with `a` the source alpha.
    fn mix_opaque(fg: Self, bg: Self, a: Self, policy: DivisionPolicy) -> Self;

    /// Porter-Duff over on straight colors.
    fn over_straight(fg: Color<Self>, bg: Color<Self>) -> Color<Self>;

    /// Porter-Duff over on premultiplied colors.
    fn over_premul(fg: Premul<Self>, bg: Premul<Self>) -> Premul<Self>;

    /// `c * a / MAX`.
    fn premultiply_channel(c: Self, a: Self) -> Self;

    /// `c * MAX / a`, zero when `a` is zero.
    fn unpremultiply_channel(c: Self, a: Self) -> Self;
}

#[inline]
fn div_round(num: u64, den: u64) -> u64 {
    (num + den / 2) / den
}

macro_rules! impl_int_composite {
    ($ty:ty) => {
        impl Composite for $ty {
            #[inline]
            fn mix_opaque(fg: Self, bg: Self, a: Self, policy: DivisionPolicy) -> Self {
                let max = <$ty as IntChannel>::MAX_WIDE;
                let a = a.widen();
                let n = fg.widen() * a + bg.widen() * (max - a);
                let v = match policy {
                    DivisionPolicy::Exact => div_round(n, max),
                    DivisionPolicy::Shift => (n + max) >> <$ty as Channel>::BITS,
                };
                <$ty as IntChannel>::narrow(v)
            }

            fn over_straight(fg: Color<Self>, bg: Color<Self>) -> Color<Self> {
                let max = <$ty as IntChannel>::MAX_WIDE;
                let af = fg.a.widen();
                let ab = bg.a.widen();
                let rest = max - af;
                // alpha_out scaled by MAX
                let a_num = af * max + ab * rest;
                if a_num == 0 {
                    return Color::transparent();
                }
                let ch = |cf: $ty, cb: $ty| {
                    let num = cf.widen() * af * max + cb.widen() * ab * rest;
                    <$ty as IntChannel>::narrow(div_round(num, a_num))
                };
                Color::new(
                    ch(fg.r, bg.r),
                    ch(fg.g, bg.g),
                    ch(fg.b, bg.b),
                    <$ty as IntChannel>::narrow(div_round(a_num, max)),
                )
            }

            fn over_premul(fg: Premul<Self>, bg: Premul<Self>) -> Premul<Self> {
                let max = <$ty as IntChannel>::MAX_WIDE;
                let rest = max - fg.a.widen();
                let ch = |cf: $ty, cb: $ty| {
                    <$ty as IntChannel>::narrow(cf.widen() + div_round(cb.widen() * rest, max))
                };
                Premul::new(ch(fg.r, bg.r), ch(fg.g, bg.g), ch(fg.b, bg.b), ch(fg.a, bg.a))
            }

            #[inline]
            fn premultiply_channel(c: Self, a: Self) -> Self {
                let max = <$ty as IntChannel>::MAX_WIDE;
                <$ty as IntChannel>::narrow(div_round(c.widen() * a.widen(), max))
            }

            #[inline]
            fn unpremultiply_channel(c: Self, a: Self) -> Self {
                if a == 0 {
                    return 0;
                }
                let max = <$ty as IntChannel>::MAX_WIDE;
                <$ty as IntChannel>::narrow(div_round(c.widen() * max, a.widen()))
            }
        }
    };
}

impl_int_composite!(u8);
impl_int_composite!(u16);

impl Composite for f32 {
    #[inline]
    fn mix_opaque(fg: Self, bg: Self, a: Self, _policy: DivisionPolicy) -> Self {
        fg * a + bg * (1.0 - a)
    }

    fn over_straight(fg: Color<Self>, bg: Color<Self>) -> Color<Self> {
        let rest = 1.0 - fg.a;
        let a_out = fg.a + bg.a * rest;
        if a_out.is_nan() || a_out <= 0.0 {
            return Color::transparent();
        }
        let ch = |cf: f32, cb: f32| (cf * fg.a + cb * bg.a * rest) / a_out;
        Color::new(ch(fg.r, bg.r), ch(fg.g, bg.g), ch(fg.b, bg.b), a_out)
    }

    fn over_premul(fg: Premul<Self>, bg: Premul<Self>) -> Premul<Self> {
        let rest = 1.0 - fg.a;
        Premul::new(
            fg.r + bg.r * rest,
            fg.g + bg.g * rest,
            fg.b + bg.b * rest,
            fg.a + bg.a * rest,
        )
    }

    #[inline]
    fn premultiply_channel(c: Self, a: Self) -> Self {
        c * a
    }

    #[inline]
    fn unpremultiply_channel(c: Self, a: Self) -> Self {
        if a > 0.0 { c / a } else { 0.0 }
    }
}

/// Composites `fg` over an opaque `bg` with exact division.
///
/// `bg`'s alpha is ignored; the result is fully opaque.
#[inline]
pub fn over_opaque<T: Composite>(fg: Color<T>, bg: Color<T>) -> Color<T> {
    over_opaque_with(fg, bg, DivisionPolicy::Exact)
}

/// Composites `fg` over an opaque `bg` with the given division policy.
///
/// ```rust
/// use chroma_core::Color8;
/// use chroma_ops::composite::{over_opaque_with, DivisionPolicy};
///
/// let fg = Color8::new(200, 100, 50, 0);
/// let bg = Color8::opaque(10, 20, 30);
/// let out = over_opaque_with(fg, bg, DivisionPolicy::Shift);
/// assert_eq!(out, bg);
/// ```
#[inline]
pub fn over_opaque_with<T: Composite>(
    fg: Color<T>,
    bg: Color<T>,
    policy: DivisionPolicy,
) -> Color<T> {
    let mix = |f: T, b: T| T::mix_opaque(f, b, fg.a, policy);
    Color::new(mix(fg.r, bg.r), mix(fg.g, bg.g), mix(fg.b, bg.b), T::MAX)
}

/// Porter-Duff over on straight colors.
///
/// A fully transparent result is transparent black.
#[inline]
pub fn over<T: Composite>(fg: Color<T>, bg: Color<T>) -> Color<T> {
    T::over_straight(fg, bg)
}

/// Porter-Duff over on premultiplied colors. Needs no division.
#[inline]
pub fn premul_over<T: Composite>(fg: Premul<T>, bg: Premul<T>) -> Premul<T> {
    T::over_premul(fg, bg)
}

/// [`premul_over`] with an optional validity check of the result.
#[inline]
pub fn premul_over_checked<T: Composite>(
    fg: Premul<T>,
    bg: Premul<T>,
    strictness: Strictness,
) -> Checked<Premul<T>> {
    let value = premul_over(fg, bg);
    let valid = match strictness {
        Strictness::Lenient => true,
        Strictness::Strict => value.is_valid(),
    };
    Checked { value, valid }
}

/// Straight to premultiplied.
///
/// ```rust
/// use chroma_core::Color8;
/// use chroma_ops::composite::premultiply;
///
/// let p = premultiply(Color8::new(255, 128, 0, 128));
/// assert_eq!(p.to_array(), [128, 64, 0, 128]);
/// ```
#[inline]
pub fn premultiply<T: Composite>(c: Color<T>) -> Premul<T> {
    let p = |v: T| T::premultiply_channel(v, c.a);
    Premul::new(p(c.r), p(c.g), p(c.b), c.a)
}

/// Premultiplied to straight.
///
/// Alpha 0 gives transparent black. Channels above alpha saturate.
#[inline]
pub fn unpremultiply<T: Composite>(p: Premul<T>) -> Color<T> {
    let u = |v: T| T::unpremultiply_channel(v, p.a);
    Color::new(u(p.r), u(p.g), u(p.b), p.a)
}

/// Porter-Duff over in linear light for sRGB-encoded float colors.
///
/// Color channels are decoded, composited and re-encoded; alpha is
/// composited as is.
pub fn over_gamma(fg: ColorF, bg: ColorF) -> ColorF {
    let out = over(srgb_to_linear_rgba(fg), srgb_to_linear_rgba(bg));
    linear_to_srgb_rgba(out)
}

/// [`over`] for every pair of pixels.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`](crate::OpsError::SizeMismatch) if the slices
/// differ in length.
pub fn over_slice<T: Composite>(fg: &[Color<T>], bg: &[Color<T>]) -> OpsResult<Vec<Color<T>>> {
    trace!(pixels = fg.len(), "composite::over_slice");
    check_len("over_slice", fg.len(), bg.len())?;
    Ok(fg.iter().zip(bg).map(|(&f, &b)| over(f, b)).collect())
}

/// [`over_opaque_with`] for every pair of pixels.
pub fn over_opaque_slice<T: Composite>(
    fg: &[Color<T>],
    bg: &[Color<T>],
    policy: DivisionPolicy,
) -> OpsResult<Vec<Color<T>>> {
    trace!(pixels = fg.len(), ?policy, "composite::over_opaque_slice");
    check_len("over_opaque_slice", fg.len(), bg.len())?;
    Ok(fg
        .iter()
        .zip(bg)
        .map(|(&f, &b)| over_opaque_with(f, b, policy))
        .collect())
}

/// [`premul_over_checked`] for every pair of pixels.
///
/// In strict mode the number of invalid results is logged at `warn`.
pub fn premul_over_slice<T: Composite>(
    fg: &[Premul<T>],
    bg: &[Premul<T>],
    strictness: Strictness,
) -> OpsResult<Vec<Checked<Premul<T>>>> {
    trace!(pixels = fg.len(), ?strictness, "composite::premul_over_slice");
    check_len("premul_over_slice", fg.len(), bg.len())?;

    let out: Vec<_> = fg
        .iter()
        .zip(bg)
        .map(|(&f, &b)| premul_over_checked(f, b, strictness))
        .collect();

    if strictness == Strictness::Strict {
        let invalid = out.iter().filter(|c| !c.valid).count();
        if invalid > 0 {
            warn!(invalid, total = out.len(), "premultiplied results exceed alpha");
        } else {
            debug!(total = out.len(), "premultiplied results valid");
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chroma_core::{Color16, Color8, Premul16, Premul8, PremulF};

    #[test]
    fn test_over_opaque_endpoints() {
        let bg = Color8::opaque(10, 200, 30);
        let fg = Color8::new(250, 0, 90, 0);
        for policy in [DivisionPolicy::Exact, DivisionPolicy::Shift] {
            assert_eq!(over_opaque_with(fg, bg, policy), bg);
            let solid = Color8::new(250, 0, 90, 255);
            assert_eq!(over_opaque_with(solid, bg, policy), solid);
        }
        let bg16 = Color16::new(1, 2, 65535, 12);
        let out = over_opaque(Color16::new(9, 9, 9, 0), bg16);
        assert_eq!(out.to_array(), [1, 2, 65535, 65535]);
    }

    #[test]
    fn test_shift_within_one_unit() {
        for a in (0..=255u8).step_by(5) {
            for (f, b) in [(0u8, 255u8), (255, 0), (17, 240), (128, 127)] {
                let exact = u8::mix_opaque(f, b, a, DivisionPolicy::Exact);
                let shift = u8::mix_opaque(f, b, a, DivisionPolicy::Shift);
                assert!(exact.abs_diff(shift) <= 1, "a={a} f={f} b={b}");
            }
        }
    }

    #[test]
    fn test_over_transparent_bg_returns_fg() {
        let fg = Color8::new(200, 100, 50, 77);
        assert_eq!(over(fg, Color8::transparent()), fg);
        let fg16 = Color16::new(60000, 1, 32768, 1234);
        assert_eq!(over(fg16, Color16::new(5, 5, 5, 0)), fg16);
    }

    #[test]
    fn test_over_both_opaque_returns_fg() {
        let fg = Color8::opaque(1, 2, 3);
        assert_eq!(over(fg, Color8::opaque(200, 200, 200)), fg);
    }

    #[test]
    fn test_over_zero_alpha_out() {
        let out = over(Color8::new(9, 9, 9, 0), Color8::new(7, 7, 7, 0));
        assert_eq!(out, Color8::transparent());
        let out = over(ColorF::new(0.5, 0.5, 0.5, 0.0), ColorF::new(1.0, 1.0, 1.0, 0.0));
        assert_eq!(out, ColorF::transparent());
    }

    #[test]
    fn test_over_float() {
        let fg = ColorF::new(1.0, 0.0, 0.0, 0.5);
        let bg = ColorF::new(0.0, 0.0, 1.0, 1.0);
        let out = over(fg, bg);
        assert_relative_eq!(out.r, 0.5);
        assert_relative_eq!(out.b, 0.5);
        assert_relative_eq!(out.a, 1.0);
    }

    #[test]
    fn test_premul_over() {
        let out = premul_over(
            PremulF::new(0.25, 0.0, 0.0, 0.5),
            PremulF::new(0.0, 0.5, 0.0, 0.5),
        );
        assert_relative_eq!(out.r, 0.25);
        assert_relative_eq!(out.g, 0.25);
        assert_relative_eq!(out.a, 0.75);

        let out = premul_over(Premul16::transparent(), Premul16::new(5, 6, 7, 8));
        assert_eq!(out.to_array(), [5, 6, 7, 8]);
    }

    #[test]
    fn test_strict_flags_invalid() {
        let bad = Premul8::new(200, 0, 0, 100);
        let bg = Premul8::transparent();
        let checked = premul_over_checked(bad, bg, Strictness::Strict);
        assert!(!checked.valid);
        assert_eq!(checked.ok(), None);
        assert_eq!(checked.into_inner().r, 200);

        let lenient = premul_over_checked(bad, bg, Strictness::Lenient);
        assert!(lenient.valid);

        let good = premul_over_checked(Premul8::new(10, 0, 0, 100), bg, Strictness::Strict);
        assert_eq!(good.ok(), Some(Premul8::new(10, 0, 0, 100)));
    }

    #[test]
    fn test_premultiply_unpremultiply() {
        assert_eq!(premultiply(Color8::new(255, 0, 100, 0)), Premul8::transparent());
        assert_eq!(unpremultiply(Premul8::new(9, 9, 9, 0)), Color8::transparent());
        assert_eq!(unpremultiply(Premul8::new(64, 128, 0, 128)).to_array(), [128, 255, 0, 128]);
        // out of invariant saturates
        assert_eq!(unpremultiply(Premul8::new(200, 0, 0, 100)).r, 255);

        let p = premultiply(ColorF::new(0.5, 1.0, 0.0, 0.5));
        assert_eq!(p.to_array(), [0.25, 0.5, 0.0, 0.5]);
        assert_eq!(unpremultiply(p).to_array(), [0.5, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_over_gamma_alpha_untouched() {
        let fg = ColorF::new(1.0, 0.0, 0.0, 0.5);
        let bg = ColorF::new(0.0, 0.0, 1.0, 1.0);
        let out = over_gamma(fg, bg);
        assert_relative_eq!(out.a, 1.0);
        // Linear-light mixing is brighter than mixing encoded values.
        assert!(out.r > 0.7 && out.b > 0.7, "{out:?}");
        assert_eq!(over_gamma(fg, ColorF::transparent()).a, 0.5);
    }

    #[test]
    fn test_slices() {
        let fg = [Color8::new(255, 0, 0, 128); 3];
        let bg = [Color8::opaque(0, 0, 255); 3];
        let out = over_slice(&fg, &bg).unwrap();
        assert_eq!(out.len(), 3);
        assert!(over_slice(&fg, &bg[..2]).is_err());

        let out = over_opaque_slice(&fg, &bg, DivisionPolicy::Shift).unwrap();
        assert_eq!(out[0].a, 255);

        let pf = [Premul8::new(200, 0, 0, 100), Premul8::new(1, 1, 1, 1)];
        let pb = [Premul8::transparent(); 2];
        let out = premul_over_slice(&pf, &pb, Strictness::Strict).unwrap();
        assert_eq!(out.iter().filter(|c| !c.valid).count(), 1);
    }
}
