//! Per-channel tone adjustments.
//!
//! Every adjustment is an affine map on r, g and b in native units. Alpha
//! is never touched. Integer results round half-up and saturate; float
//! results are not clamped.
//!
//! | Operation | Formula |
//! |-----------|---------|
//! | [`darken`] | `c * f` |
//! | [`lighten`] | `c + (MAX - c) * f` |
//! | [`contrast`] | `(c - MAX/2) * f + MAX/2` |
//! | [`invert`] | `MAX - c` |
//!
//! # Example
//!
//! ```rust
//! use chroma_core::Color8;
//! use chroma_ops::adjust::darken;
//!
//! let c = darken(Color8::new(128, 255, 64, 200), 0.5);
//! assert_eq!(c.to_array(), [64, 128, 32, 200]);
//! ```

use chroma_core::{Channel, Color};
use tracing::trace;

use crate::{OpsError, OpsResult};

/// Scales color channels toward black.
#[inline]
pub fn darken<T: Channel>(c: Color<T>, factor: f32) -> Color<T> {
    c.map_rgb(|v| T::from_f32(v.to_f32() * factor))
}

/// Moves color channels toward full intensity.
#[inline]
pub fn lighten<T: Channel>(c: Color<T>, factor: f32) -> Color<T> {
    c.map_rgb(|v| {
        let v = v.to_f32();
        T::from_f32(v + (T::MAX_F32 - v) * factor)
    })
}

/// Scales color channels around mid-intensity.
#[inline]
pub fn contrast<T: Channel>(c: Color<T>, factor: f32) -> Color<T> {
    let mid = T::MAX_F32 * 0.5;
    c.map_rgb(|v| T::from_f32((v.to_f32() - mid) * factor + mid))
}

/// Inverts color channels.
#[inline]
pub fn invert<T: Channel>(c: Color<T>) -> Color<T> {
    c.map_rgb(|v| T::from_f32(T::MAX_F32 - v.to_f32()))
}

/// An adjustment with its parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// [`darken`] by a factor.
    Darken(f32),
    /// [`lighten`] by a factor.
    Lighten(f32),
    /// [`contrast`] by a factor.
    Contrast(f32),
    /// [`invert`].
    Invert,
}

impl Adjustment {
    /// Checks that the factor is finite.
    pub fn validate(self) -> OpsResult<Self> {
        match self {
            Self::Darken(f) | Self::Lighten(f) | Self::Contrast(f) if !f.is_finite() => Err(
                OpsError::InvalidParameter(format!("{self:?}: factor must be finite")),
            ),
            _ => Ok(self),
        }
    }

    /// Applies the adjustment to one color.
    #[inline]
    pub fn apply<T: Channel>(self, c: Color<T>) -> Color<T> {
        match self {
            Self::Darken(f) => darken(c, f),
            Self::Lighten(f) => lighten(c, f),
            Self::Contrast(f) => contrast(c, f),
            Self::Invert => invert(c),
        }
    }
}

/// Applies `adjustment` to every color in place.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if the factor is NaN or infinite; the
/// buffer is left untouched.
pub fn adjust_slice<T: Channel>(colors: &mut [Color<T>], adjustment: Adjustment) -> OpsResult<()> {
    let adjustment = adjustment.validate()?;
    trace!(pixels = colors.len(), ?adjustment, "adjust::adjust_slice");
    for c in colors {
        *c = adjustment.apply(*c);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_core::{Color16, Color8, ColorF};

    #[test]
    fn test_darken_rounds_half_up() {
        let c = darken(Color8::new(128, 255, 64, 255), 0.5);
        assert_eq!(c.to_array(), [64, 128, 32, 255]);
    }

    #[test]
    fn test_alpha_untouched() {
        let c = Color16::new(100, 200, 300, 4321);
        assert_eq!(darken(c, 0.1).a, 4321);
        assert_eq!(lighten(c, 0.9).a, 4321);
        assert_eq!(contrast(c, 3.0).a, 4321);
        assert_eq!(invert(c).a, 4321);
    }

    #[test]
    fn test_lighten() {
        let c = lighten(Color8::new(0, 255, 100, 1), 0.5);
        assert_eq!(c.to_array(), [128, 255, 178, 1]);
    }

    #[test]
    fn test_contrast_saturates() {
        let c = contrast(Color8::new(0, 128, 255, 255), 2.0);
        assert_eq!(c.to_array(), [0, 129, 255, 255]);
        let f = contrast(ColorF::new(0.0, 0.5, 1.0, 1.0), 2.0);
        assert_eq!(f.to_array(), [-0.5, 0.5, 1.5, 1.0]);
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert(Color8::new(0, 1, 255, 9)).to_array(), [255, 254, 0, 9]);
        assert_eq!(invert(Color16::new(0, 65535, 1, 0)).to_array(), [65535, 0, 65534, 0]);
        assert_eq!(invert(ColorF::new(0.25, 0.0, 1.0, 0.5)).to_array(), [0.75, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_adjust_slice() {
        let mut px = [Color8::new(10, 20, 30, 40); 4];
        adjust_slice(&mut px, Adjustment::Invert).unwrap();
        assert_eq!(px[3].to_array(), [245, 235, 225, 40]);

        let err = adjust_slice(&mut px, Adjustment::Darken(f32::NAN)).unwrap_err();
        assert!(matches!(err, OpsError::InvalidParameter(_)));
        assert_eq!(px[0].r, 245);
    }
}
