//! # chroma-lut
//!
//! Gamma lookup tables for integer channels.
//!
//! - [`GammaTable<u8>`](GammaTable) - 256 entries
//! - [`GammaTable<u16>`](GammaTable) - 65536 entries
//! - [`NarrowingGammaTable`] - 16-bit index, 8-bit value
//!
//! # Usage
//!
//! ```rust
//! use chroma_core::Tier;
//! use chroma_lut::GammaTable;
//!
//! let table = GammaTable::<u16>::build_with_tier(2.4, Tier::Scalar)?;
//! let mut pixels = [0u16, 1000, 65535];
//! table.apply(&mut pixels);
//! assert_eq!(pixels[2], 65535);
//! # Ok::<(), chroma_lut::LutError>(())
//! ```
//!
//! Tables are plain data: build once, share freely.
//!
//! # Dependencies
//!
//! - `chroma-core` - Channel types, tiers
//! - `chroma-math` - Slice pow kernels
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Build diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod gamma_table;

pub use error::{LutError, LutResult};
pub use gamma_table::{GammaTable, NarrowingGammaTable, GAMMA_EPSILON};
