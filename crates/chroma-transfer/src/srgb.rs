//! sRGB transfer function on the chroma pow kernel.
//!
//! The sRGB standard uses a piecewise function combining a linear segment
//! near black with a power curve (approximately gamma 2.2) for the rest.
//!
//! # Forms
//!
//! | Form | Encode | Decode |
//! |------|--------|--------|
//! | `f32` | [`linear_to_srgb`] | [`srgb_to_linear`] |
//! | lanes | [`linear_to_srgb_lanes`] | [`srgb_to_linear_lanes`] |
//! | RGBA | [`linear_to_srgb_rgba`] | [`srgb_to_linear_rgba`] |
//! | slice | [`linear_to_srgb_slice`] | [`srgb_to_linear_slice`] |
//!
//! Lane forms evaluate every segment and merge with masks, so a vector may
//! hold values from different segments. Inputs at or above 1 map to 1 and
//! NaN maps to 0. Alpha is never gamma coded.
//!
//! # Range
//!
//! - Input/Output: [0, 1]
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

use chroma_core::{ColorF, Result, Tier};
use chroma_math::{dispatch::UnaryFn, map_unary, pow_positive, Lanes};
use wide::{f64x2, f64x4};

/// Linear light below which the encoding is linear.
pub const LINEAR_CUTOFF: f64 = 0.0031308;

/// Encoded value below which the decoding is linear.
pub const ENCODED_CUTOFF: f64 = 0.04045;

/// Slope of the linear segment.
pub const LINEAR_SLOPE: f64 = 12.92;

/// Scale of the power segment.
pub const SCALE: f64 = 1.055;

/// Offset of the power segment.
pub const OFFSET: f64 = 0.055;

/// Exponent of the power segment (decode direction).
pub const EXPONENT: f64 = 2.4;

/// sRGB encode: linear light to gamma-encoded, per lane.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else if L < 1:
///     V = 1.055 * L^(1/2.4) - 0.055
/// else:
///     V = 1
/// ```
pub fn linear_to_srgb_lanes<V: Lanes>(x: V) -> V {
    let x = x.nan_mask().select(V::splat(0.0), x);
    let low = x.le_mask(V::splat(LINEAR_CUTOFF));
    let high = x.ge_mask(V::splat(1.0));

    // Keep the power segment on its domain in lanes that will not use it.
    let safe = (low | high).select(V::splat(0.5), x);
    let curve = V::splat(SCALE) * pow_positive(safe, V::splat(1.0 / EXPONENT)) - V::splat(OFFSET);

    let r = low.select(x * V::splat(LINEAR_SLOPE), curve);
    high.select(V::splat(1.0), r)
}

/// sRGB decode: gamma-encoded to linear light, per lane.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else if V < 1:
///     L = ((V + 0.055) / 1.055)^2.4
/// else:
///     L = 1
/// ```
pub fn srgb_to_linear_lanes<V: Lanes>(v: V) -> V {
    let v = v.nan_mask().select(V::splat(0.0), v);
    let low = v.le_mask(V::splat(ENCODED_CUTOFF));
    let high = v.ge_mask(V::splat(1.0));

    let safe = (low | high).select(V::splat(0.5), v);
    let curve = pow_positive(
        (safe + V::splat(OFFSET)) / V::splat(SCALE),
        V::splat(EXPONENT),
    );

    let r = low.select(v / V::splat(LINEAR_SLOPE), curve);
    high.select(V::splat(1.0), r)
}

/// sRGB encode of one value.
///
/// # Example
///
/// ```rust
/// use chroma_transfer::srgb::linear_to_srgb;
///
/// let encoded = linear_to_srgb(0.214);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_srgb(x: f32) -> f32 {
    linear_to_srgb_lanes(f64::from(x)) as f32
}

/// sRGB decode of one value.
///
/// # Example
///
/// ```rust
/// use chroma_transfer::srgb::srgb_to_linear;
///
/// let linear = srgb_to_linear(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn srgb_to_linear(v: f32) -> f32 {
    srgb_to_linear_lanes(f64::from(v)) as f32
}

/// Encodes r, g and b of a straight float color; alpha passes through.
#[inline]
pub fn linear_to_srgb_rgba(c: ColorF) -> ColorF {
    map_rgb_x4(c, linear_to_srgb_lanes::<f64x4>)
}

/// Decodes r, g and b of a straight float color; alpha passes through.
#[inline]
pub fn srgb_to_linear_rgba(c: ColorF) -> ColorF {
    map_rgb_x4(c, srgb_to_linear_lanes::<f64x4>)
}

fn map_rgb_x4(c: ColorF, f: fn(f64x4) -> f64x4) -> ColorF {
    let v = f(f64x4::from([
        f64::from(c.r),
        f64::from(c.g),
        f64::from(c.b),
        1.0,
    ]))
    .to_array();
    ColorF::new(v[0] as f32, v[1] as f32, v[2] as f32, c.a)
}

/// Per-tier sRGB slice kernels.
#[derive(Debug)]
pub struct SrgbKernels {
    /// Tier these kernels were instantiated for.
    pub tier: Tier,
    /// Slice form of [`linear_to_srgb_lanes`].
    pub linear_to_srgb: UnaryFn,
    /// Slice form of [`srgb_to_linear_lanes`].
    pub srgb_to_linear: UnaryFn,
}

static SCALAR: SrgbKernels = SrgbKernels {
    tier: Tier::Scalar,
    linear_to_srgb: encode_into::<f64>,
    srgb_to_linear: decode_into::<f64>,
};

static X2: SrgbKernels = SrgbKernels {
    tier: Tier::X2,
    linear_to_srgb: encode_into::<f64x2>,
    srgb_to_linear: decode_into::<f64x2>,
};

static X4: SrgbKernels = SrgbKernels {
    tier: Tier::X4,
    linear_to_srgb: encode_into::<f64x4>,
    srgb_to_linear: decode_into::<f64x4>,
};

impl SrgbKernels {
    /// Table for an explicit tier.
    pub fn for_tier(tier: Tier) -> &'static SrgbKernels {
        match tier {
            Tier::Scalar => &SCALAR,
            Tier::X2 => &X2,
            Tier::X4 => &X4,
        }
    }

    /// Table for the tier probed on this host.
    pub fn current() -> &'static SrgbKernels {
        Self::for_tier(Tier::current())
    }
}

fn encode_into<V: Lanes>(src: &[f64], dst: &mut [f64]) -> Result<()> {
    map_unary(src, dst, linear_to_srgb_lanes::<V>)
}

fn decode_into<V: Lanes>(src: &[f64], dst: &mut [f64]) -> Result<()> {
    map_unary(src, dst, srgb_to_linear_lanes::<V>)
}

/// Encodes `src` into `dst` on the current tier.
///
/// # Errors
///
/// [`Error::LengthMismatch`](chroma_core::Error::LengthMismatch) if the
/// slices differ in length.
pub fn linear_to_srgb_slice(src: &[f64], dst: &mut [f64]) -> Result<()> {
    (SrgbKernels::current().linear_to_srgb)(src, dst)
}

/// Decodes `src` into `dst` on the current tier.
///
/// # Errors
///
/// [`Error::LengthMismatch`](chroma_core::Error::LengthMismatch) if the
/// slices differ in length.
pub fn srgb_to_linear_slice(src: &[f64], dst: &mut [f64]) -> Result<()> {
    (SrgbKernels::current().srgb_to_linear)(src, dst)
}
