//! # chroma-math
//!
//! Software `pow`, `ln` and `exp` for pixel math, written once and run at
//! any lane width.
//!
//! - [`Lanes`], [`Mask`] - lane abstraction over `f64`, `f64x2`, `f64x4`
//! - [`powi`], [`powi_lanes`] - integer powers
//! - [`ln`], [`exp`] - natural log and exponential
//! - [`pow`], [`pow_positive`] - real powers
//! - [`Kernels`] - per-tier slice kernels
//!
//! # Design
//!
//! Every kernel is generic over [`Lanes`] and uses masked control flow:
//! each lane iterates until it alone has converged, then stops changing.
//! The same algorithm therefore produces the same bits for a value whether
//! it is computed alone or next to three others, and the capability tier
//! only decides how many values are processed per step.
//!
//! All computation is in `f64`; `f32` callers widen on entry.
//!
//! # Usage
//!
//! ```rust
//! use chroma_math::{pow, Kernels};
//! use wide::f64x4;
//!
//! let v = pow(f64x4::from([4.0, -8.0, 0.0, 2.0]), f64x4::splat(0.5));
//! let [a, b, c, _] = v.to_array();
//! assert!((a - 2.0).abs() < 1e-12);
//! assert!(b.is_nan());
//! assert_eq!(c, 0.0);
//!
//! let mut out = [0.0; 3];
//! (Kernels::current().exp)(&[0.0, 1.0, 2.0], &mut out)?;
//! assert_eq!(out[0], 1.0);
//! # Ok::<(), chroma_core::Error>(())
//! ```
//!
//! # Dependencies
//!
//! - [`wide`] - Portable SIMD vectors
//! - `chroma-core` - [`Tier`](chroma_core::Tier) capability tag
//!
//! # Used By
//!
//! - `chroma-transfer` - sRGB curve
//! - `chroma-lut` - gamma table generation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod dispatch;
mod exp;
mod lanes;
mod log;
mod pow;
mod powi;

pub use dispatch::{exp_slice, ln_slice, map_binary, map_unary, pow_slice, powi_slice, Kernels};
pub use exp::{exp, EXP_MAX_TERMS};
pub use lanes::{Lanes, Mask, MAX_EXACT_INT, MAX_LANES};
pub use log::{ln, LN_MAX_TERMS};
pub use pow::{exp_f64, ln_f64, pow, pow_f32, pow_f64, pow_positive};
pub use powi::{powi, powi_lanes};
