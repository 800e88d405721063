//! # srgblut - piecewise-linear sRGB encoding tables
//!
//! Generates a 256-entry `u16` table approximating the sRGB transfer function
//! (linear → encoded) over 16-bit code values. Entry `i` is the value at
//! linear input `i * 257`; consumers interpolate between neighbouring entries.
//!
//! The table is a least-squares piecewise-linear fit of the exact curve,
//! constrained to pass through a few forced points near black where the curve
//! is steepest.
//!
//! ## Quick Start
//!
//! ```no_run
//! use srgblut_core::{GeneratorOptions, generate};
//!
//! let options = GeneratorOptions::default();
//! let table = generate(&options).unwrap();
//!
//! let mut out = std::io::stdout();
//! table.write_hex(&mut out, options.values_per_line).unwrap();
//!
//! // Encode a linear 16-bit value
//! let encoded = table.lookup(0x8000);
//! # let _ = encoded;
//! ```

pub mod accuracy;
pub mod error;
pub mod fit;
pub mod generator;
pub mod math;
pub mod sample;
pub mod table;

pub use accuracy::ErrorStats;
pub use error::{Error, Result};
pub use fit::{ForcedPoint, PiecewiseLinearFit};
pub use generator::{DEFAULT_FORCED_POINTS, GeneratorOptions, fit_curve, generate};
pub use sample::Sample;
pub use table::GammaTable;

/// Version of srgblut
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
