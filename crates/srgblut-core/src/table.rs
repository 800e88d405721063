//! Quantized 16-bit lookup table
//!
//! Holds the fit rounded to `u16` at each break point, evaluates it the way a
//! consumer would (integer interpolation between neighbouring entries), and
//! formats it as hexadecimal literals ready to paste into an array
//! initializer.

use crate::fit::PiecewiseLinearFit;
use crate::math::lerp_u16;
use crate::{Error, Result};
use std::io::Write;

/// A gamma lookup table sampled every `stride` input codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaTable {
    entries: Vec<u16>,
    stride: u32,
}

impl GammaTable {
    /// Build a table from raw entries
    ///
    /// The stride must lie in `1..=65535` so that interpolation between two
    /// entries stays within 32-bit arithmetic.
    pub fn new(entries: Vec<u16>, stride: u32) -> Result<Self> {
        if entries.len() < 2 || stride == 0 || stride > u16::MAX as u32 {
            return Err(Error::InvalidOptions(format!(
                "table needs at least two entries and a stride in 1..=65535, got {} entries with stride {}",
                entries.len(),
                stride
            )));
        }
        Ok(Self { entries, stride })
    }

    /// Round each break point value of `fit` to the nearest integer
    ///
    /// Ties round away from zero. A value that is not finite or that rounds
    /// outside `0..=65535` fails the whole table; nothing is clamped.
    ///
    /// The stride is taken from the fit's break points, which must be evenly
    /// spaced integers.
    pub fn quantize(fit: &PiecewiseLinearFit) -> Result<Self> {
        let stride = uniform_stride(fit.breaks())?;
        let entries = fit
            .values()
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let rounded = value.round();
                if !rounded.is_finite() || !(0.0..=u16::MAX as f64).contains(&rounded) {
                    return Err(Error::OutOfRange { index, value });
                }
                Ok(rounded as u16)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries, stride)
    }

    /// Table entries, one per break point
    #[inline]
    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    /// Input distance between consecutive entries
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode a 16-bit linear value through the table
    ///
    /// Interpolates between the two entries around `x`; inputs past the last
    /// break point return the last entry.
    #[inline]
    pub fn lookup(&self, x: u16) -> u16 {
        let x = x as u32;
        let i = (x / self.stride) as usize;
        let r = x % self.stride;
        match (self.entries.get(i), self.entries.get(i + 1)) {
            (Some(&a), _) if r == 0 => a,
            (Some(&a), Some(&b)) => lerp_u16(a, b, r, self.stride),
            _ => self.entries[self.entries.len() - 1],
        }
    }

    /// Whether entries never decrease
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| w[0] <= w[1])
    }

    /// Write the table as `0x%04x,` literals, `per_line` to a line
    ///
    /// Literals on a line are separated by one space and every line, including
    /// a short final one, ends with a newline.
    pub fn write_hex<W: Write>(&self, out: &mut W, per_line: usize) -> Result<()> {
        if per_line == 0 {
            return Err(Error::InvalidOptions("values per line must be non-zero".into()));
        }
        for row in self.entries.chunks(per_line) {
            let line = row
                .iter()
                .map(|v| format!("0x{:04x},", v))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// The output of [`write_hex`](Self::write_hex) as a string
    pub fn to_hex_string(&self, per_line: usize) -> Result<String> {
        let mut buf = Vec::with_capacity(self.entries.len() * 8);
        self.write_hex(&mut buf, per_line)?;
        // Only ASCII is written
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Common integer gap between consecutive break points
fn uniform_stride(breaks: &[f64]) -> Result<u32> {
    let uneven = || Error::InvalidOptions("break points are not evenly spaced integers".into());
    let (first, second) = match breaks {
        [a, b, ..] => (*a, *b),
        _ => return Err(uneven()),
    };
    let gap = second - first;
    if gap.fract() != 0.0 || !(1.0..=u16::MAX as f64).contains(&gap) {
        return Err(uneven());
    }
    if breaks.windows(2).any(|w| w[1] - w[0] != gap) {
        return Err(uneven());
    }
    Ok(gap as u32)
}
