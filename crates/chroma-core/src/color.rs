//! Straight and premultiplied RGBA colors.
//!
//! # Types
//!
//! - [`Color`] - straight alpha: channels are independent of alpha
//! - [`Premul`] - premultiplied alpha: channels are already scaled by alpha
//!
//! Both are generic over the [`Channel`] encoding, with aliases for the
//! three encodings used by the compositor:
//!
//! | Straight | Premultiplied | Channel |
//! |----------|---------------|---------|
//! | [`Color8`] | [`Premul8`] | `u8` |
//! | [`Color16`] | [`Premul16`] | `u16` |
//! | [`ColorF`] | [`PremulF`] | `f32` |
//!
//! # Premultiplied invariant
//!
//! Every color channel of a [`Premul`] must be `<= a`. The invariant is
//! *reported*, not enforced: [`Premul::new`] accepts anything and
//! [`Premul::is_valid`] tells the caller whether it holds. Use
//! [`Premul::try_new`] to reject invalid input up front.
//!
//! ```
//! use chroma_core::{Color8, Premul8};
//!
//! let c = Color8::new(255, 128, 64, 255);
//! assert_eq!(c.to_array(), [255, 128, 64, 255]);
//!
//! let p = Premul8::new(10, 200, 10, 100);
//! assert!(!p.is_valid());
//! ```
//!
//! # Memory Layout
//!
//! Both types use `#[repr(C)]` with `[R, G, B, A]` order.

use std::cmp::Ordering;

use crate::channel::Channel;
use crate::error::{Error, Result};

/// Straight-alpha RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color<T: Channel> {
    /// Red channel value.
    pub r: T,
    /// Green channel value.
    pub g: T,
    /// Blue channel value.
    pub b: T,
    /// Alpha channel value.
    pub a: T,
}

/// Premultiplied-alpha RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Premul<T: Channel> {
    /// Red channel, scaled by alpha.
    pub r: T,
    /// Green channel, scaled by alpha.
    pub g: T,
    /// Blue channel, scaled by alpha.
    pub b: T,
    /// Alpha channel value.
    pub a: T,
}

/// 8-bit straight color.
pub type Color8 = Color<u8>;
/// 16-bit straight color.
pub type Color16 = Color<u16>;
/// Float straight color.
pub type ColorF = Color<f32>;

/// 8-bit premultiplied color.
pub type Premul8 = Premul<u8>;
/// 16-bit premultiplied color.
pub type Premul16 = Premul<u16>;
/// Float premultiplied color.
pub type PremulF = Premul<f32>;

impl<T: Channel> Color<T> {
    /// Creates a color from all four channels.
    #[inline]
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    #[inline]
    pub const fn opaque(r: T, g: T, b: T) -> Self {
        Self::new(r, g, b, T::MAX)
    }

    /// Fully transparent black.
    #[inline]
    pub const fn transparent() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ZERO)
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Color channels as `[r, g, b]`.
    #[inline]
    pub fn rgb(self) -> [T; 3] {
        [self.r, self.g, self.b]
    }

    /// Replaces the color channels, keeping alpha.
    #[inline]
    pub fn with_rgb(self, rgb: [T; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], self.a)
    }

    /// Applies `f` to r, g and b. Alpha is passed through.
    #[inline]
    pub fn map_rgb(self, mut f: impl FnMut(T) -> T) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Whether alpha is at its maximum.
    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= T::MAX
    }

    /// Converts to another channel encoding through normalized space.
    ///
    /// ```
    /// use chroma_core::{Color8, Color16};
    ///
    /// let c = Color8::new(255, 0, 128, 255);
    /// let wide: Color16 = c.convert();
    /// assert_eq!(wide.to_array(), [65535, 0, 32896, 65535]);
    /// ```
    #[inline]
    pub fn convert<U: Channel>(self) -> Color<U> {
        Color::new(
            U::from_unit(self.r.to_unit()),
            U::from_unit(self.g.to_unit()),
            U::from_unit(self.b.to_unit()),
            U::from_unit(self.a.to_unit()),
        )
    }
}

impl<T: Channel> From<[T; 4]> for Color<T> {
    #[inline]
    fn from(arr: [T; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl<T: Channel> From<Color<T>> for [T; 4] {
    #[inline]
    fn from(c: Color<T>) -> Self {
        c.to_array()
    }
}

impl<T: Channel> Premul<T> {
    /// Creates a premultiplied color without checking the invariant.
    #[inline]
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color, rejecting channels above alpha.
    pub fn try_new(r: T, g: T, b: T, a: T) -> Result<Self> {
        let c = Self::new(r, g, b, a);
        match c.first_violation() {
            None => Ok(c),
            Some((channel, value)) => Err(Error::InvalidPremultiplied {
                channel,
                value: value.to_f32(),
                alpha: a.to_f32(),
            }),
        }
    }

    /// Fully transparent black.
    #[inline]
    pub const fn transparent() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ZERO)
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether every color channel is `<= a`.
    ///
    /// NaN channels are reported invalid.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.first_violation().is_none()
    }

    fn first_violation(self) -> Option<(char, T)> {
        [('r', self.r), ('g', self.g), ('b', self.b)]
            .into_iter()
            .find(|&(_, v)| {
                !matches!(
                    v.partial_cmp(&self.a),
                    Some(Ordering::Less | Ordering::Equal)
                )
            })
    }
}

impl<T: Channel> From<[T; 4]> for Premul<T> {
    #[inline]
    fn from(arr: [T; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl<T: Channel> From<Premul<T>> for [T; 4] {
    #[inline]
    fn from(c: Premul<T>) -> Self {
        c.to_array()
    }
}
