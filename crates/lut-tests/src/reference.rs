//! Reference sRGB implementation
//!
//! `palette` implements the IEC 61966-2-1 encoding independently of
//! srgblut-core; agreement between the two guards the ground truth the table
//! is fitted against.

use palette::{LinSrgb, Srgb};

/// Encode linear light [0,1] with palette
pub fn palette_encode(linear: f64) -> f64 {
    let encoded: Srgb<f64> = Srgb::from_linear(LinSrgb::new(linear, linear, linear));
    encoded.red
}

/// Encode a 16-bit linear code with palette, rounded to the nearest code
pub fn palette_code(x: u16) -> u16 {
    let max = u16::MAX as f64;
    (palette_encode(x as f64 / max) * max).round().clamp(0.0, max) as u16
}
