//! Dense error sweeps
//!
//! The fitted curve is compared with the exact encoding at every 16-bit input
//! in parallel. The quantized table is reported per region: the steep section
//! near black where the forced points hold error up, and the rest of the
//! range, which should be within one code value.

use rayon::prelude::*;
use srgblut_core::math::srgb_encode_scaled;
use srgblut_core::{ErrorStats, GammaTable, PiecewiseLinearFit};
use std::fmt;

/// Start of the region where the table should be within one code value
pub const SHALLOW_REGION_START: u16 = 8192;

/// Error of the unquantized fit against the exact curve
#[derive(Debug, Clone, Copy)]
pub struct FitErrorStats {
    /// Maximum absolute error in code values
    pub max_abs: f64,
    /// Input where `max_abs` occurs
    pub max_at: u16,
    /// Root-mean-square error in code values
    pub rms: f64,
}

/// Sweep every 16-bit input through the fitted curve
pub fn fit_error(fit: &PiecewiseLinearFit) -> FitErrorStats {
    let max = u16::MAX as f64;
    let errors: Vec<(u16, f64)> = (0u32..=u16::MAX as u32)
        .into_par_iter()
        .map(|x| {
            let xf = x as f64;
            (x as u16, fit.predict(xf) - srgb_encode_scaled(xf, max))
        })
        .collect();

    let (max_at, max_abs) = errors
        .iter()
        .map(|&(x, e)| (x, e.abs()))
        .fold((0u16, 0.0f64), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
    let rms = (errors.iter().map(|(_, e)| e * e).sum::<f64>() / errors.len() as f64).sqrt();

    FitErrorStats {
        max_abs,
        max_at,
        rms,
    }
}

/// Table error split at [`SHALLOW_REGION_START`]
#[derive(Debug, Clone, Copy)]
pub struct RegionReport {
    pub steep: ErrorStats,
    pub shallow: ErrorStats,
    pub total: ErrorStats,
}

impl fmt::Display for RegionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, s) in [
            ("steep", &self.steep),
            ("shallow", &self.shallow),
            ("total", &self.total),
        ] {
            writeln!(
                f,
                "{:8} correct {}/{}, abs error: {}, error bias: {}, max: {} at {}",
                name, s.exact, s.count, s.abs_sum, s.bias, s.max_abs, s.max_at
            )?;
        }
        Ok(())
    }
}

/// Measure `table` over the steep region, the shallow region, and overall
pub fn region_report(table: &GammaTable) -> RegionReport {
    let (steep, (shallow, total)) = rayon::join(
        || ErrorStats::measure_range(table, 0..=SHALLOW_REGION_START - 1),
        || {
            rayon::join(
                || ErrorStats::measure_range(table, SHALLOW_REGION_START..=u16::MAX),
                || ErrorStats::measure(table),
            )
        },
    );
    RegionReport {
        steep,
        shallow,
        total,
    }
}
