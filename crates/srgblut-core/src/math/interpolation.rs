//! Interpolation functions for table evaluation

/// Linear interpolation between two values
///
/// Returns a + t * (b - a) for t in [0, 1]
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Locate the segment of `knots` containing `x`
///
/// Returns `(i, t)` such that `x` lies between `knots[i]` and `knots[i + 1]`
/// at fraction `t`. `knots` must be strictly increasing with at least two
/// entries; `x` outside the knot range is clamped onto the end segments.
pub fn locate_segment(knots: &[f64], x: f64) -> (usize, f64) {
    debug_assert!(knots.len() >= 2);
    let last = knots.len() - 2;
    // partition_point gives the first knot strictly greater than x
    let i = knots.partition_point(|&k| k <= x).saturating_sub(1).min(last);
    let t = (x - knots[i]) / (knots[i + 1] - knots[i]);
    (i, t.clamp(0.0, 1.0))
}

/// Evaluate the piecewise-linear function through `(knots[i], values[i])`
pub fn piecewise_linear(knots: &[f64], values: &[f64], x: f64) -> f64 {
    debug_assert_eq!(knots.len(), values.len());
    let (i, t) = locate_segment(knots, x);
    lerp(values[i], values[i + 1], t)
}

/// Integer linear interpolation between two table entries
///
/// Blends `a` and `b` by `r / stride`, rounding to nearest. `r` must not
/// exceed `stride`.
#[inline]
pub fn lerp_u16(a: u16, b: u16, r: u32, stride: u32) -> u16 {
    debug_assert!(r <= stride);
    let v = (a as u32 * (stride - r) + b as u32 * r + stride / 2) / stride;
    v as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 1.0, 0.0) - 0.0).abs() < EPSILON);
        assert!((lerp(0.0, 1.0, 1.0) - 1.0).abs() < EPSILON);
        assert!((lerp(0.0, 1.0, 0.5) - 0.5).abs() < EPSILON);
        assert!((lerp(10.0, 20.0, 0.25) - 12.5).abs() < EPSILON);
    }

    #[test]
    fn test_locate_segment() {
        let knots = [0.0, 10.0, 20.0, 30.0];
        assert_eq!(locate_segment(&knots, 0.0), (0, 0.0));
        assert_eq!(locate_segment(&knots, 5.0), (0, 0.5));
        assert_eq!(locate_segment(&knots, 10.0), (1, 0.0));
        // The last knot stays in the last segment
        assert_eq!(locate_segment(&knots, 30.0), (2, 1.0));
        // Outside the range clamps
        assert_eq!(locate_segment(&knots, -4.0), (0, 0.0));
        assert_eq!(locate_segment(&knots, 99.0), (2, 1.0));
    }

    #[test]
    fn test_piecewise_linear_hits_knots() {
        let knots = [0.0, 1.0, 3.0];
        let values = [5.0, 7.0, 3.0];
        for (k, v) in knots.iter().zip(&values) {
            assert!((piecewise_linear(&knots, &values, *k) - v).abs() < EPSILON);
        }
        assert!((piecewise_linear(&knots, &values, 2.0) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_lerp_u16() {
        assert_eq!(lerp_u16(0, 257, 0, 257), 0);
        assert_eq!(lerp_u16(0, 257, 257, 257), 257);
        assert_eq!(lerp_u16(0, 257, 100, 257), 100);
        assert_eq!(lerp_u16(65535, 65535, 128, 257), 65535);
        // Rounds to nearest
        assert_eq!(lerp_u16(0, 1, 129, 257), 1);
        assert_eq!(lerp_u16(0, 1, 128, 257), 0);
    }
}
