//! Accuracy of a table against the exact curve
//!
//! Every 16-bit input is encoded through [`GammaTable::lookup`] and compared
//! with the exact sRGB encoding rounded to the nearest code value.

use crate::math::srgb_encode_scaled;
use crate::table::GammaTable;

/// Statistics from comparing a table with the exact curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorStats {
    /// Inputs where the table matches exactly
    pub exact: u32,
    /// Sum of absolute errors in code values
    pub abs_sum: u64,
    /// Sum of signed errors; positive means the table runs bright
    pub bias: i64,
    /// Largest absolute error
    pub max_abs: u32,
    /// First input where `max_abs` occurs
    pub max_at: u16,
    /// Whether the lookup never decreases as the input grows
    pub monotonic: bool,
    /// Number of inputs compared
    pub count: u32,
}

impl ErrorStats {
    /// Compare `table` with the exact curve over every input in `range`
    pub fn measure_range(table: &GammaTable, range: std::ops::RangeInclusive<u16>) -> Self {
        let mut stats = Self {
            exact: 0,
            abs_sum: 0,
            bias: 0,
            max_abs: 0,
            max_at: *range.start(),
            monotonic: true,
            count: 0,
        };
        let mut prev: Option<u16> = None;

        for x in range {
            let got = table.lookup(x);
            let err = got as i64 - exact_code(x) as i64;
            let abs = err.unsigned_abs() as u32;

            if err == 0 {
                stats.exact += 1;
            }
            stats.abs_sum += abs as u64;
            stats.bias += err;
            if abs > stats.max_abs {
                stats.max_abs = abs;
                stats.max_at = x;
            }
            if prev.is_some_and(|p| p > got) {
                stats.monotonic = false;
            }
            prev = Some(got);
            stats.count += 1;
        }

        stats
    }

    /// Compare `table` with the exact curve over all 65536 inputs
    pub fn measure(table: &GammaTable) -> Self {
        Self::measure_range(table, 0..=u16::MAX)
    }

    /// Mean absolute error in code values
    pub fn mean_abs(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.abs_sum as f64 / self.count as f64
        }
    }
}

/// Exact sRGB encoding of a 16-bit linear code, rounded to the nearest code
#[inline]
pub fn exact_code(x: u16) -> u16 {
    let max = u16::MAX as f64;
    srgb_encode_scaled(x as f64, max).round().clamp(0.0, max) as u16
}
