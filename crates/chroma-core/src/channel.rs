//! Channel encodings: 8-bit, 16-bit and 32-bit float.
//!
//! A [`Channel`] is one numeric slot of a color. Integer channels are
//! unsigned and span `0..=MAX`; float channels are nominally `[0, 1]` but
//! tolerate extended values and are never clamped by conversions.
//!
//! # Rounding
//!
//! Every float to integer conversion in this workspace goes through
//! [`round_half_up`] (`floor(x + 0.5)`) followed by saturation to
//! `0..=MAX`. NaN converts to zero. Nothing wraps around.
//!
//! ```
//! use chroma_core::Channel;
//!
//! assert_eq!(<u8 as Channel>::from_f32(127.5), 128);
//! assert_eq!(<u8 as Channel>::from_f32(300.0), 255);
//! assert_eq!(<u16 as Channel>::from_unit(0.5), 32768);
//! assert_eq!(<f32 as Channel>::from_f32(1.5), 1.5);
//! ```

use std::fmt;

/// Rounds half-way cases up: `floor(v + 0.5)`.
///
/// This is the single float to integer rounding policy of the workspace.
#[inline]
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// Numeric type usable as a color channel.
///
/// Values are expressed in *native units*: `0..=255` for `u8`,
/// `0..=65535` for `u16` and `0.0..=1.0` for `f32`.
pub trait Channel: Copy + Default + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Number of bits per channel.
    const BITS: u32;

    /// Whether this is a floating-point encoding.
    const IS_FLOAT: bool;

    /// Fully opaque / full intensity value.
    const MAX: Self;

    /// Zero value.
    const ZERO: Self;

    /// [`MAX`](Channel::MAX) as f32 (1.0 for floats).
    const MAX_F32: f32;

    /// Widens to f32 in native units.
    fn to_f32(self) -> f32;

    /// Narrows from f32 in native units.
    ///
    /// Integer channels round half-up and saturate; floats pass through.
    fn from_f32(v: f32) -> Self;

    /// Normalized value (`MAX` maps to 1.0).
    #[inline]
    fn to_unit(self) -> f32 {
        self.to_f32() / Self::MAX_F32
    }

    /// Builds a channel from a normalized value.
    #[inline]
    fn from_unit(v: f32) -> Self {
        Self::from_f32(v * Self::MAX_F32)
    }
}

/// Integer channel with exact widened arithmetic.
///
/// Compositing on integer channels runs in `u64` so that products of up to
/// three channel values never overflow.
pub trait IntChannel: Channel + Ord {
    /// [`MAX`](Channel::MAX) widened to u64.
    const MAX_WIDE: u64;

    /// Widens to u64.
    fn widen(self) -> u64;

    /// Narrows from u64, saturating at `MAX`.
    fn narrow(v: u64) -> Self;
}

impl Channel for u8 {
    const BITS: u32 = 8;
    const IS_FLOAT: bool = false;
    const MAX: Self = u8::MAX;
    const ZERO: Self = 0;
    const MAX_F32: f32 = 255.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        if v.is_nan() {
            return 0;
        }
        round_half_up(v).clamp(0.0, Self::MAX_F32) as u8
    }
}

impl IntChannel for u8 {
    const MAX_WIDE: u64 = u8::MAX as u64;

    #[inline]
    fn widen(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn narrow(v: u64) -> Self {
        u8::try_from(v).unwrap_or(u8::MAX)
    }
}

impl Channel for u16 {
    const BITS: u32 = 16;
    const IS_FLOAT: bool = false;
    const MAX: Self = u16::MAX;
    const ZERO: Self = 0;
    const MAX_F32: f32 = 65535.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        if v.is_nan() {
            return 0;
        }
        round_half_up(v).clamp(0.0, Self::MAX_F32) as u16
    }
}

impl IntChannel for u16 {
    const MAX_WIDE: u64 = u16::MAX as u64;

    #[inline]
    fn widen(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn narrow(v: u64) -> Self {
        u16::try_from(v).unwrap_or(u16::MAX)
    }
}

impl Channel for f32 {
    const BITS: u32 = 32;
    const IS_FLOAT: bool = true;
    const MAX: Self = 1.0;
    const ZERO: Self = 0.0;
    const MAX_F32: f32 = 1.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }
}
