//! Mathematical operations for table generation
//!
//! - sRGB transfer function evaluation
//! - Symmetric tridiagonal solver for the fit's normal equations
//! - Interpolation for fit and table evaluation

pub mod gamma;
pub mod interpolation;
pub mod tridiagonal;

pub use gamma::{srgb_encode_scaled, srgb_gamma_decode, srgb_gamma_encode};
pub use interpolation::{lerp, lerp_u16, locate_segment, piecewise_linear};
pub use tridiagonal::SymTridiagonal;
