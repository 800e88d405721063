//! Constrained piecewise-linear least-squares fit
//!
//! The fitted function is continuous and linear between consecutive break
//! points. In the hat-function basis its value at break `j` is the unknown
//! `c_j`, and a sample at `x` between breaks `j` and `j + 1` contributes
//! `(1 - t)·c_j + t·c_{j+1}`. The normal equations are therefore symmetric
//! tridiagonal.
//!
//! Forced points pin `c_j` to a given value. Their columns are moved to the
//! right-hand side and their rows dropped; what remains is still tridiagonal
//! over the free unknowns and is solved with [`SymTridiagonal`].

use crate::math::{SymTridiagonal, locate_segment, piecewise_linear};
use crate::sample::Sample;
use crate::{Error, Result};
use tracing::debug;

/// Tolerance for matching a forced point to a break point
const BREAK_MATCH_EPSILON: f64 = 1e-9;

/// A point the fit must pass through exactly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcedPoint {
    pub x: f64,
    pub y: f64,
}

impl ForcedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Accumulated normal equations `G·c = b` in the hat-function basis
struct NormalEquations {
    gram: SymTridiagonal,
    rhs: Vec<f64>,
}

impl NormalEquations {
    fn accumulate(breaks: &[f64], samples: &[Sample]) -> Result<Self> {
        let n = breaks.len();
        let (lo, hi) = (breaks[0], breaks[n - 1]);
        let mut gram = SymTridiagonal::zeros(n);
        let mut rhs = vec![0.0; n];

        for s in samples {
            if !(lo..=hi).contains(&s.x) {
                return Err(Error::SampleOutOfRange { x: s.x });
            }
            let (j, t) = locate_segment(breaks, s.x);
            let (w0, w1) = (1.0 - t, t);
            gram.diag[j] += w0 * w0;
            gram.diag[j + 1] += w1 * w1;
            gram.off[j] += w0 * w1;
            rhs[j] += w0 * s.y;
            rhs[j + 1] += w1 * s.y;
        }

        Ok(Self { gram, rhs })
    }
}

/// A continuous piecewise-linear function given by its values at the breaks
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinearFit {
    breaks: Vec<f64>,
    values: Vec<f64>,
}

impl PiecewiseLinearFit {
    /// Least-squares fit of `samples` with vertices at `breaks`, passing
    /// exactly through every point in `forced`.
    ///
    /// `breaks` must be strictly increasing with at least two entries and must
    /// span every sample. Each forced x must coincide with a break point.
    pub fn fit(samples: &[Sample], breaks: &[f64], forced: &[ForcedPoint]) -> Result<Self> {
        validate_breaks(breaks)?;
        if samples.is_empty() {
            return Err(Error::InvalidOptions("no samples to fit".into()));
        }

        let n = breaks.len();
        let mut pinned: Vec<Option<f64>> = vec![None; n];
        for f in forced {
            let j = break_index(breaks, f.x).ok_or(Error::ForcedPointOffBreak { x: f.x })?;
            match pinned[j] {
                Some(y) if y != f.y => {
                    return Err(Error::InvalidOptions(format!(
                        "conflicting forced values {} and {} at x={}",
                        y, f.y, f.x
                    )));
                }
                _ => pinned[j] = Some(f.y),
            }
        }

        let normal = NormalEquations::accumulate(breaks, samples)?;
        let free: Vec<usize> = (0..n).filter(|&j| pinned[j].is_none()).collect();
        debug!(
            samples = samples.len(),
            breaks = n,
            forced = n - free.len(),
            "accumulated normal equations"
        );

        // Reduced system over the free unknowns
        let mut reduced = SymTridiagonal::zeros(free.len());
        let mut rhs = Vec::with_capacity(free.len());
        for (k, &j) in free.iter().enumerate() {
            reduced.diag[k] = normal.gram.diag[j];
            if let Some(&next) = free.get(k + 1) {
                if next == j + 1 {
                    reduced.off[k] = normal.gram.off[j];
                }
            }

            let mut b = normal.rhs[j];
            if j > 0 {
                if let Some(y) = pinned[j - 1] {
                    b -= normal.gram.off[j - 1] * y;
                }
            }
            if j + 1 < n {
                if let Some(y) = pinned[j + 1] {
                    b -= normal.gram.off[j] * y;
                }
            }
            rhs.push(b);
        }

        let solved = reduced.solve(&rhs).map_err(|e| match e {
            // Report the break index rather than the reduced row
            Error::Singular { row } => Error::Singular { row: free[row] },
            other => other,
        })?;

        let mut values: Vec<f64> = pinned.iter().map(|p| p.unwrap_or(0.0)).collect();
        for (&j, v) in free.iter().zip(solved) {
            values[j] = v;
        }

        let fit = Self {
            breaks: breaks.to_vec(),
            values,
        };
        debug!(
            sse = fit.sum_squared_error(samples),
            "solved piecewise-linear fit"
        );
        Ok(fit)
    }

    /// Break point x-coordinates
    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    /// Fitted values at the break points
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Evaluate the fit at `x`, clamping to the break range
    pub fn predict(&self, x: f64) -> f64 {
        piecewise_linear(&self.breaks, &self.values, x)
    }

    /// Sum of squared residuals against `samples`
    pub fn sum_squared_error(&self, samples: &[Sample]) -> f64 {
        samples
            .iter()
            .map(|s| {
                let r = self.predict(s.x) - s.y;
                r * r
            })
            .sum()
    }

    /// Replace the value at one break point; used to probe optimality
    pub fn with_value(mut self, index: usize, value: f64) -> Self {
        self.values[index] = value;
        self
    }
}

fn validate_breaks(breaks: &[f64]) -> Result<()> {
    if breaks.len() < 2 {
        return Err(Error::InvalidOptions(format!(
            "need at least two break points, got {}",
            breaks.len()
        )));
    }
    if breaks.iter().any(|b| !b.is_finite()) || breaks.windows(2).any(|w| w[1] <= w[0]) {
        return Err(Error::InvalidOptions(
            "break points must be finite and strictly increasing".into(),
        ));
    }
    Ok(())
}

fn break_index(breaks: &[f64], x: f64) -> Option<usize> {
    let i = breaks.partition_point(|&b| b < x - BREAK_MATCH_EPSILON);
    breaks
        .get(i)
        .filter(|&&b| (b - x).abs() <= BREAK_MATCH_EPSILON)
        .map(|_| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_samples(a: f64, b: f64, xs: impl Iterator<Item = u32>) -> Vec<Sample> {
        xs.map(|x| {
            let x = x as f64;
            Sample { x, y: a * x + b }
        })
        .collect()
    }

    #[test]
    fn test_recovers_exact_piecewise_linear_data() {
        // A kinked function lying exactly in the fit space
        let breaks = [0.0, 10.0, 20.0];
        let samples: Vec<Sample> = (0..=20)
            .map(|x| {
                let x = x as f64;
                let y = if x <= 10.0 { 2.0 * x } else { 20.0 + 0.5 * (x - 10.0) };
                Sample { x, y }
            })
            .collect();
        let fit = PiecewiseLinearFit::fit(&samples, &breaks, &[]).unwrap();
        let expected = [0.0, 20.0, 25.0];
        for (v, e) in fit.values().iter().zip(&expected) {
            assert!((v - e).abs() < 1e-9, "{} vs {}", v, e);
        }
        assert!(fit.sum_squared_error(&samples) < 1e-12);
    }

    #[test]
    fn test_forced_points_are_exact() {
        let breaks = [0.0, 10.0, 20.0, 30.0];
        let samples = line_samples(1.0, 0.0, 0..=30);
        let forced = [ForcedPoint::new(0.0, 3.0), ForcedPoint::new(30.0, 25.0)];
        let fit = PiecewiseLinearFit::fit(&samples, &breaks, &forced).unwrap();
        assert_eq!(fit.values()[0], 3.0);
        assert_eq!(fit.values()[3], 25.0);
        assert!((fit.predict(0.0) - 3.0).abs() < 1e-12);
        assert!((fit.predict(30.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_points_forced() {
        let breaks = [0.0, 1.0];
        let samples = line_samples(1.0, 0.0, 0..=1);
        let forced = [ForcedPoint::new(0.0, 5.0), ForcedPoint::new(1.0, 6.0)];
        let fit = PiecewiseLinearFit::fit(&samples, &breaks, &forced).unwrap();
        assert_eq!(fit.values(), &[5.0, 6.0]);
    }

    #[test]
    fn test_free_values_minimize_error() {
        let breaks = [0.0, 8.0, 16.0, 24.0];
        let samples: Vec<Sample> = (0..=24)
            .map(|x| {
                let x = x as f64;
                Sample { x, y: (x / 24.0).sqrt() * 100.0 }
            })
            .collect();
        let forced = [ForcedPoint::new(0.0, 0.0)];
        let fit = PiecewiseLinearFit::fit(&samples, &breaks, &forced).unwrap();
        let best = fit.sum_squared_error(&samples);
        for j in 1..breaks.len() {
            for delta in [-0.5, 0.5] {
                let probe = fit.clone().with_value(j, fit.values()[j] + delta);
                assert!(probe.sum_squared_error(&samples) > best);
            }
        }
    }

    #[test]
    fn test_forced_point_off_break() {
        let breaks = [0.0, 10.0];
        let samples = line_samples(1.0, 0.0, 0..=10);
        let forced = [ForcedPoint::new(5.0, 1.0)];
        assert!(matches!(
            PiecewiseLinearFit::fit(&samples, &breaks, &forced),
            Err(Error::ForcedPointOffBreak { .. })
        ));
    }

    #[test]
    fn test_conflicting_forced_points() {
        let breaks = [0.0, 10.0];
        let samples = line_samples(1.0, 0.0, 0..=10);
        let forced = [ForcedPoint::new(0.0, 1.0), ForcedPoint::new(0.0, 2.0)];
        assert!(matches!(
            PiecewiseLinearFit::fit(&samples, &breaks, &forced),
            Err(Error::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_sample_outside_breaks() {
        let breaks = [0.0, 10.0];
        let samples = line_samples(1.0, 0.0, 0..=11);
        assert!(matches!(
            PiecewiseLinearFit::fit(&samples, &breaks, &[]),
            Err(Error::SampleOutOfRange { x }) if x == 11.0
        ));
    }

    #[test]
    fn test_unsupported_break_is_singular() {
        // No sample touches the open segment (20, 30) except at 20 itself,
        // so the value at 30 is undetermined
        let breaks = [0.0, 10.0, 20.0, 30.0];
        let samples = line_samples(1.0, 0.0, 0..=20);
        assert!(matches!(
            PiecewiseLinearFit::fit(&samples, &breaks, &[]),
            Err(Error::Singular { row: 3 })
        ));
    }

    #[test]
    fn test_unsupported_break_can_be_forced() {
        let breaks = [0.0, 10.0, 20.0, 30.0];
        let samples = line_samples(1.0, 0.0, 0..=20);
        let forced = [ForcedPoint::new(30.0, 30.0)];
        let fit = PiecewiseLinearFit::fit(&samples, &breaks, &forced).unwrap();
        assert!((fit.predict(15.0) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_breaks() {
        let samples = line_samples(1.0, 0.0, 0..=1);
        assert!(PiecewiseLinearFit::fit(&samples, &[0.0], &[]).is_err());
        assert!(PiecewiseLinearFit::fit(&samples, &[1.0, 0.0], &[]).is_err());
        assert!(PiecewiseLinearFit::fit(&[], &[0.0, 1.0], &[]).is_err());
    }
}
