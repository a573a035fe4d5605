//! Pure power-law gamma curves.
//!
//! - 2.2: Legacy CRT approximation
//! - 2.4: BT.1886 reference EOTF
//! - 2.6: DCI theatrical projection
//!
//! Both directions run on the fully resolved [`pow`] kernel, so any gamma
//! the caller passes (including 0 or infinity) has a defined result.
//!
//! # Range
//!
//! - Input/Output: [0, 1]; values `<= 0` and NaN map to 0

use chroma_math::{pow, Lanes};

/// Encode: `l^(1/gamma)`, per lane.
pub fn gamma_encode_lanes<V: Lanes>(l: V, gamma: V) -> V {
    let positive = l.gt_mask(V::splat(0.0));
    let safe = positive.select(l, V::splat(1.0));
    positive.select(pow(safe, V::splat(1.0) / gamma), V::splat(0.0))
}

/// Decode: `v^gamma`, per lane.
pub fn gamma_decode_lanes<V: Lanes>(v: V, gamma: V) -> V {
    let positive = v.gt_mask(V::splat(0.0));
    let safe = positive.select(v, V::splat(1.0));
    positive.select(pow(safe, gamma), V::splat(0.0))
}

/// Encodes linear light with an arbitrary gamma: `l^(1/gamma)`.
///
/// # Example
///
/// ```rust
/// use chroma_transfer::gamma::gamma_encode;
///
/// let encoded = gamma_encode(0.218, 2.2);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn gamma_encode(l: f32, gamma: f32) -> f32 {
    gamma_encode_lanes(f64::from(l), f64::from(gamma)) as f32
}

/// Decodes to linear light with an arbitrary gamma: `v^gamma`.
///
/// # Example
///
/// ```rust
/// use chroma_transfer::gamma::gamma_decode;
///
/// let linear = gamma_decode(0.5, 2.2);
/// assert!((linear - 0.2176).abs() < 1e-3);
/// ```
#[inline]
pub fn gamma_decode(v: f32, gamma: f32) -> f32 {
    gamma_decode_lanes(f64::from(v), f64::from(gamma)) as f32
}

/// Gamma 2.2 decode.
#[inline]
pub fn decode_22(v: f32) -> f32 {
    gamma_decode(v, 2.2)
}

/// Gamma 2.2 encode.
#[inline]
pub fn encode_22(l: f32) -> f32 {
    gamma_encode(l, 2.2)
}

/// Gamma 2.4 decode (BT.1886 reference).
#[inline]
pub fn decode_24(v: f32) -> f32 {
    gamma_decode(v, 2.4)
}

/// Gamma 2.4 encode.
#[inline]
pub fn encode_24(l: f32) -> f32 {
    gamma_encode(l, 2.4)
}

/// Gamma 2.6 decode (DCI).
#[inline]
pub fn decode_26(v: f32) -> f32 {
    gamma_decode(v, 2.6)
}

/// Gamma 2.6 encode.
#[inline]
pub fn encode_26(l: f32) -> f32 {
    gamma_encode(l, 2.6)
}
