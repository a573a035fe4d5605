//! # chroma-ops
//!
//! Alpha compositing and tone adjustments on single colors and color
//! slices, for 8-bit, 16-bit and float channels.
//!
//! # Modules
//!
//! - [`composite`] - over-opaque, Porter-Duff over (straight and
//!   premultiplied), premultiply/unpremultiply, gamma-aware over
//! - [`adjust`] - darken, lighten, contrast, invert
//!
//! # Example
//!
//! ```rust
//! use chroma_core::{Color8, ColorF};
//! use chroma_ops::{adjust, composite};
//!
//! let fg = Color8::new(255, 0, 0, 128);
//! let bg = Color8::opaque(0, 0, 255);
//! let out = composite::over(fg, bg);
//! assert_eq!(out.a, 255);
//!
//! let dim = adjust::darken(out, 0.5);
//! assert_eq!(dim.a, 255);
//!
//! let p = composite::premultiply(ColorF::new(1.0, 0.5, 0.0, 0.5));
//! assert!(p.is_valid());
//! ```
//!
//! # Dependencies
//!
//! - `chroma-core` - Color and channel types
//! - `chroma-transfer` - sRGB curve for [`composite::over_gamma`]
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Batch diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adjust;
pub mod composite;
mod error;

pub use adjust::Adjustment;
pub use composite::{Checked, Composite, DivisionPolicy, Strictness};
pub use error::{OpsError, OpsResult};
