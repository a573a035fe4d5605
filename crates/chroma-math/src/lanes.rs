//! Lane abstraction over scalar and `wide` vector types.
//!
//! Every kernel in this crate is written once against [`Lanes`] and
//! instantiated for each width:
//!
//! - `f64` - one lane
//! - [`wide::f64x2`] - two lanes
//! - [`wide::f64x4`] - four lanes
//!
//! Control flow that would diverge per lane is expressed with [`Mask`]:
//! comparisons produce a mask, loops keep an *active* mask and stop when it
//! is empty, and results are merged with [`Mask::select`]. A lane that has
//! finished never changes again, so one lane's iteration count cannot affect
//! another lane's result.
//!
//! ```
//! use chroma_math::Lanes;
//! use wide::f64x2;
//!
//! let x = f64x2::from([1.0, -1.0]);
//! let negative = x.lt_mask(<f64x2 as Lanes>::splat(0.0));
//! let y = negative.select(<f64x2 as Lanes>::splat(0.0), x);
//! assert_eq!(y.to_array(), [1.0, 0.0]);
//! ```

use std::fmt::Debug;
use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Sub};

use wide::{CmpEq, CmpGe, CmpGt, CmpLe, CmpLt, f64x2, f64x4};

/// Largest integer such that it and every smaller integer are exactly
/// representable in `f64` (2^53).
pub const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Widest lane count of any [`Lanes`] implementation.
pub const MAX_LANES: usize = 4;

/// An N-wide vector of `f64` values.
pub trait Lanes:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Number of lanes.
    const LANES: usize;

    /// Raw mask storage used by [`Mask`].
    type Raw: Copy + Debug;

    /// Broadcasts one value to every lane.
    fn splat(v: f64) -> Self;

    /// Loads exactly [`LANES`](Lanes::LANES) values.
    ///
    /// # Panics
    ///
    /// Panics if `src.len() != LANES`.
    fn load(src: &[f64]) -> Self;

    /// Stores exactly [`LANES`](Lanes::LANES) values.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() != LANES`.
    fn store(self, dst: &mut [f64]);

    /// Per-lane floor.
    fn floor(self) -> Self;

    /// Per-lane absolute value.
    fn abs(self) -> Self;

    /// Lanes where `self < rhs`.
    fn lt_mask(self, rhs: Self) -> Mask<Self>;

    /// Lanes where `self <= rhs`.
    fn le_mask(self, rhs: Self) -> Mask<Self>;

    /// Lanes where `self > rhs`.
    fn gt_mask(self, rhs: Self) -> Mask<Self>;

    /// Lanes where `self >= rhs`.
    fn ge_mask(self, rhs: Self) -> Mask<Self>;

    /// Lanes where `self == rhs`.
    fn eq_mask(self, rhs: Self) -> Mask<Self>;

    /// Lanes holding NaN.
    fn nan_mask(self) -> Mask<Self>;

    #[doc(hidden)]
    fn raw_splat(on: bool) -> Self::Raw;
    #[doc(hidden)]
    fn raw_and(a: Self::Raw, b: Self::Raw) -> Self::Raw;
    #[doc(hidden)]
    fn raw_or(a: Self::Raw, b: Self::Raw) -> Self::Raw;
    #[doc(hidden)]
    fn raw_not(a: Self::Raw) -> Self::Raw;
    #[doc(hidden)]
    fn raw_any(a: Self::Raw) -> bool;
    #[doc(hidden)]
    fn raw_all(a: Self::Raw) -> bool;
    #[doc(hidden)]
    fn raw_select(a: Self::Raw, t: Self, f: Self) -> Self;

    /// Per-lane negation that keeps signed zeros and NaN payloads.
    #[inline]
    fn negate(self) -> Self {
        self * Self::splat(-1.0)
    }

    /// Clamps every lane to `[-MAX_EXACT_INT, MAX_EXACT_INT]`.
    ///
    /// NaN lanes stay NaN; infinities become the bound.
    #[inline]
    fn clamp_exact(self) -> Self {
        let hi = Self::splat(MAX_EXACT_INT);
        let lo = Self::splat(-MAX_EXACT_INT);
        let x = self.gt_mask(hi).select(hi, self);
        x.lt_mask(lo).select(lo, x)
    }
}

/// Active-lane mask for a [`Lanes`] type.
///
/// Combine with `&`, `|` and `!`; query with [`any`](Mask::any),
/// [`all`](Mask::all) and [`none`](Mask::none); merge values with
/// [`select`](Mask::select).
#[derive(Clone, Copy, Debug)]
pub struct Mask<L: Lanes>(L::Raw);

impl<L: Lanes> Mask<L> {
    /// Mask with every lane set.
    #[inline]
    pub fn all_set() -> Self {
        Mask(L::raw_splat(true))
    }

    /// Mask with no lane set.
    #[inline]
    pub fn all_clear() -> Self {
        Mask(L::raw_splat(false))
    }

    /// Whether at least one lane is set.
    #[inline]
    pub fn any(self) -> bool {
        L::raw_any(self.0)
    }

    /// Whether every lane is set.
    #[inline]
    pub fn all(self) -> bool {
        L::raw_all(self.0)
    }

    /// Whether no lane is set.
    #[inline]
    pub fn none(self) -> bool {
        !self.any()
    }

    /// Per lane: `if_true` where set, `if_false` elsewhere.
    #[inline]
    pub fn select(self, if_true: L, if_false: L) -> L {
        L::raw_select(self.0, if_true, if_false)
    }
}

impl<L: Lanes> BitAnd for Mask<L> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Mask(L::raw_and(self.0, rhs.0))
    }
}

impl<L: Lanes> BitOr for Mask<L> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Mask(L::raw_or(self.0, rhs.0))
    }
}

impl<L: Lanes> Not for Mask<L> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Mask(L::raw_not(self.0))
    }
}

impl Lanes for f64 {
    const LANES: usize = 1;
    type Raw = bool;

    #[inline]
    fn splat(v: f64) -> Self {
        v
    }

    #[inline]
    fn load(src: &[f64]) -> Self {
        assert_eq!(src.len(), 1);
        src[0]
    }

    #[inline]
    fn store(self, dst: &mut [f64]) {
        assert_eq!(dst.len(), 1);
        dst[0] = self;
    }

    #[inline]
    fn floor(self) -> Self {
        f64::floor(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn lt_mask(self, rhs: Self) -> Mask<Self> {
        Mask(self < rhs)
    }

    #[inline]
    fn le_mask(self, rhs: Self) -> Mask<Self> {
        Mask(self <= rhs)
    }

    #[inline]
    fn gt_mask(self, rhs: Self) -> Mask<Self> {
        Mask(self > rhs)
    }

    #[inline]
    fn ge_mask(self, rhs: Self) -> Mask<Self> {
        Mask(self >= rhs)
    }

    #[inline]
    fn eq_mask(self, rhs: Self) -> Mask<Self> {
        Mask(self == rhs)
    }

    #[inline]
    fn nan_mask(self) -> Mask<Self> {
        Mask(f64::is_nan(self))
    }

    #[inline]
    fn raw_splat(on: bool) -> bool {
        on
    }

    #[inline]
    fn raw_and(a: bool, b: bool) -> bool {
        a & b
    }

    #[inline]
    fn raw_or(a: bool, b: bool) -> bool {
        a | b
    }

    #[inline]
    fn raw_not(a: bool) -> bool {
        !a
    }

    #[inline]
    fn raw_any(a: bool) -> bool {
        a
    }

    #[inline]
    fn raw_all(a: bool) -> bool {
        a
    }

    #[inline]
    fn raw_select(a: bool, t: Self, f: Self) -> Self {
        if a { t } else { f }
    }
}

/// Implements [`Lanes`] for a `wide` f64 vector. Masks are the vector's
/// own all-ones / all-zeros lane patterns, as produced by `cmp_*`.
macro_rules! impl_wide_lanes {
    ($ty:ident, $n:literal) => {
        impl Lanes for $ty {
            const LANES: usize = $n;
            type Raw = $ty;

            #[inline]
            fn splat(v: f64) -> Self {
                $ty::splat(v)
            }

            #[inline]
            fn load(src: &[f64]) -> Self {
                let arr: [f64; $n] = src
                    .try_into()
                    .unwrap_or_else(|_| panic!("expected {} lanes, got {}", $n, src.len()));
                $ty::from(arr)
            }

            #[inline]
            fn store(self, dst: &mut [f64]) {
                dst.copy_from_slice(&self.to_array());
            }

            #[inline]
            fn floor(self) -> Self {
                $ty::from(self.to_array().map(f64::floor))
            }

            #[inline]
            fn abs(self) -> Self {
                $ty::abs(self)
            }

            #[inline]
            fn lt_mask(self, rhs: Self) -> Mask<Self> {
                Mask(CmpLt::cmp_lt(self, rhs))
            }

            #[inline]
            fn le_mask(self, rhs: Self) -> Mask<Self> {
                Mask(CmpLe::cmp_le(self, rhs))
            }

            #[inline]
            fn gt_mask(self, rhs: Self) -> Mask<Self> {
                Mask(CmpGt::cmp_gt(self, rhs))
            }

            #[inline]
            fn ge_mask(self, rhs: Self) -> Mask<Self> {
                Mask(CmpGe::cmp_ge(self, rhs))
            }

            #[inline]
            fn eq_mask(self, rhs: Self) -> Mask<Self> {
                Mask(CmpEq::cmp_eq(self, rhs))
            }

            #[inline]
            fn nan_mask(self) -> Mask<Self> {
                Mask($ty::is_nan(self))
            }

            #[inline]
            fn raw_splat(on: bool) -> $ty {
                if on {
                    $ty::splat(f64::from_bits(u64::MAX))
                } else {
                    $ty::splat(0.0)
                }
            }

            #[inline]
            fn raw_and(a: $ty, b: $ty) -> $ty {
                a & b
            }

            #[inline]
            fn raw_or(a: $ty, b: $ty) -> $ty {
                a | b
            }

            #[inline]
            fn raw_not(a: $ty) -> $ty {
                a ^ Self::raw_splat(true)
            }

            #[inline]
            fn raw_any(a: $ty) -> bool {
                a.any()
            }

            #[inline]
            fn raw_all(a: $ty) -> bool {
                a.all()
            }

            #[inline]
            fn raw_select(a: $ty, t: Self, f: Self) -> Self {
                a.blend(t, f)
            }
        }
    };
}

impl_wide_lanes!(f64x2, 2);
impl_wide_lanes!(f64x4, 4);
