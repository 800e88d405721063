//! End-to-end table generation
//!
//! sample → fit → quantize. Formatting is left to [`GammaTable::write_hex`].

use crate::fit::{ForcedPoint, PiecewiseLinearFit};
use crate::sample::{break_points, srgb_samples};
use crate::table::GammaTable;
use crate::{Error, Result};
use tracing::debug;

/// Anchors of the default table
///
/// Both endpoints, plus the first two interior break points where the curve is
/// steepest. Unconstrained, the fit strays furthest from the curve there and
/// dips below zero at black.
pub const DEFAULT_FORCED_POINTS: [ForcedPoint; 4] = [
    ForcedPoint::new(0.0, 0.0),
    ForcedPoint::new(257.0, 3324.0),
    ForcedPoint::new(514.0, 5625.0),
    ForcedPoint::new(65535.0, 65535.0),
];

/// Parameters of a generated table
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Distance between samples of the exact curve
    pub sample_step: u32,
    /// Distance between break points; must divide `domain_max`
    pub break_stride: u32,
    /// Largest input and output code value
    pub domain_max: u32,
    /// Points the fit must reproduce exactly
    pub forced_points: Vec<ForcedPoint>,
    /// Literals per printed line
    pub values_per_line: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            sample_step: 5,
            break_stride: 257,
            domain_max: u16::MAX as u32,
            forced_points: DEFAULT_FORCED_POINTS.to_vec(),
            values_per_line: 8,
        }
    }
}

impl GeneratorOptions {
    /// Check the options describe a table that fits in 16 bits
    pub fn validate(&self) -> Result<()> {
        if self.domain_max == 0 || self.domain_max > u16::MAX as u32 {
            return Err(Error::InvalidOptions(format!(
                "domain maximum {} is outside 1..=65535",
                self.domain_max
            )));
        }
        if self.values_per_line == 0 {
            return Err(Error::InvalidOptions("values per line must be non-zero".into()));
        }
        Ok(())
    }
}

/// Fit the exact curve under `options` without quantizing
pub fn fit_curve(options: &GeneratorOptions) -> Result<PiecewiseLinearFit> {
    options.validate()?;

    let samples = srgb_samples(options.sample_step, options.domain_max)?;
    let breaks: Vec<f64> = break_points(options.break_stride, options.domain_max)?
        .into_iter()
        .map(f64::from)
        .collect();
    debug!(
        samples = samples.len(),
        breaks = breaks.len(),
        "generated sample set and break points"
    );

    PiecewiseLinearFit::fit(&samples, &breaks, &options.forced_points)
}

/// Generate the quantized table under `options`
pub fn generate(options: &GeneratorOptions) -> Result<GammaTable> {
    let fit = fit_curve(options)?;
    let table = GammaTable::quantize(&fit)?;
    debug!(entries = table.len(), "quantized table");
    Ok(table)
}
