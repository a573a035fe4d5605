//! # chroma-transfer
//!
//! Transfer functions for encoding and decoding channel values.
//!
//! Transfer functions convert between linear light values and encoded values
//! for storage or display.
//!
//! # Supported Transfer Functions
//!
//! | Function | Use Case | Range |
//! |----------|----------|-------|
//! | [`srgb`] | Web, consumer displays | [0, 1] |
//! | [`gamma`] | Pure power law (2.2, 2.4, 2.6, custom) | [0, 1] |
//!
//! # Usage
//!
//! ```rust
//! use chroma_transfer::srgb;
//!
//! // Decode sRGB to linear
//! let linear = srgb::srgb_to_linear(0.5);
//!
//! // Encode linear to sRGB
//! let encoded = srgb::linear_to_srgb(linear);
//! assert!((encoded - 0.5).abs() < 1e-5);
//! ```
//!
//! Every curve is built on the software `pow` from `chroma-math`, so results
//! do not depend on the platform's libm.
//!
//! # Dependencies
//!
//! - `chroma-core` - Color types, tiers
//! - `chroma-math` - pow kernel, lane types
//! - [`wide`] - Vector types for the RGBA and slice forms
//!
//! # Used By
//!
//! - `chroma-ops` - Gamma-aware compositing

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod gamma;
pub mod srgb;

pub use gamma::{gamma_decode, gamma_encode};
pub use srgb::{
    linear_to_srgb, linear_to_srgb_rgba, linear_to_srgb_slice, srgb_to_linear,
    srgb_to_linear_rgba, srgb_to_linear_slice, SrgbKernels,
};
