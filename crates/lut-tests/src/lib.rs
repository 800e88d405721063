//! # lut-tests
//!
//! Accuracy and parity testing for srgblut.
//!
//! This crate provides:
//! - Dense error sweeps of the fitted curve and the quantized table
//! - Wrappers around an independent sRGB implementation (`palette`)
//!
//! ## Test Categories
//!
//! 1. **Table accuracy**: lookup error against the exact curve, per region
//! 2. **Reference parity**: transfer function against `palette`
//! 3. **Generator output**: forced points, layout, determinism

pub mod reference;
pub mod sweep;

pub use reference::{palette_code, palette_encode};
pub use sweep::{FitErrorStats, RegionReport, fit_error, region_report};

/// The table produced by the default options
pub fn default_table() -> anyhow::Result<srgblut_core::GammaTable> {
    Ok(srgblut_core::generate(
        &srgblut_core::GeneratorOptions::default(),
    )?)
}
