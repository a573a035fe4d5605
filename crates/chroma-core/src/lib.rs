//! # chroma-core
//!
//! Core value types shared by every chroma crate.
//!
//! - [`Channel`], [`IntChannel`] - 8-bit, 16-bit and float channel encodings
//! - [`Color`], [`Premul`] - straight and premultiplied RGBA colors
//! - [`Tier`] - SIMD capability tag with a one-time host probe
//! - [`Error`], [`Result`] - construction errors
//!
//! ## Crate Structure
//!
//! ```text
//! chroma-core (this crate)
//!    ^
//!    |
//!    +-- chroma-math (pow / ln / exp kernels, dispatch)
//!    +-- chroma-transfer (sRGB and gamma curves)
//!    +-- chroma-lut (gamma lookup tables)
//!    +-- chroma-ops (alpha compositing)
//! ```
//!
//! All values are plain `Copy` data; nothing here holds mutable state except
//! the write-once tier cache behind [`Tier::current`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod color;
pub mod config;
pub mod error;
pub mod tier;

pub use channel::{round_half_up, Channel, IntChannel};
pub use color::{Color, Color16, Color8, ColorF, Premul, Premul16, Premul8, PremulF};
pub use error::{Error, Result};
pub use tier::Tier;

/// Prelude module for convenient imports.
///
/// ```
/// use chroma_core::prelude::*;
///
/// let c: Color8 = Color::opaque(1, 2, 3);
/// assert_eq!(c.a, u8::MAX);
/// ```
pub mod prelude {
    pub use crate::channel::{Channel, IntChannel};
    pub use crate::color::{Color, Color16, Color8, ColorF, Premul, Premul16, Premul8, PremulF};
    pub use crate::error::{Error, Result};
    pub use crate::tier::Tier;
}
