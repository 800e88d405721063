//! sRGB transfer function
//!
//! The IEC 61966-2-1 curve in both directions. `srgb_gamma_encode` is the
//! ground truth every generated table is fitted against.

/// Linear values at or below this use the linear segment when encoding
pub const SRGB_ENCODE_THRESHOLD: f64 = 0.0031308;

/// Encoded values at or below this use the linear segment when decoding
pub const SRGB_DECODE_THRESHOLD: f64 = 0.04045;

/// Slope of the linear segment near black
pub const SRGB_LINEAR_SLOPE: f64 = 12.92;

/// sRGB gamma encode (linear → encoded)
///
/// Converts linear light [0,1] to sRGB-encoded value [0,1].
#[inline]
pub fn srgb_gamma_encode(linear: f64) -> f64 {
    if linear <= SRGB_ENCODE_THRESHOLD {
        linear * SRGB_LINEAR_SLOPE
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// sRGB gamma decode (encoded → linear)
#[inline]
pub fn srgb_gamma_decode(encoded: f64) -> f64 {
    if encoded <= SRGB_DECODE_THRESHOLD {
        encoded / SRGB_LINEAR_SLOPE
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode a linear code value on a [0, `max`] scale, returning the encoded
/// value on the same scale without rounding.
#[inline]
pub fn srgb_encode_scaled(x: f64, max: f64) -> f64 {
    srgb_gamma_encode(x / max) * max
}
