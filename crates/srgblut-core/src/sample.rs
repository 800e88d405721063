//! Sample set and break point generation
//!
//! Both are evenly spaced over the integer domain `[0, max]`. Samples carry the
//! exact encoded value the fit is measured against; break points are the
//! x-coordinates where the fitted function may change slope.

use crate::math::srgb_encode_scaled;
use crate::{Error, Result};

/// One point of the exact curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Sample the exact sRGB encoding at every `step`-th integer of `[0, max]`
///
/// The sequence starts at 0 and includes `max` only if the step lands on it.
pub fn srgb_samples(step: u32, max: u32) -> Result<Vec<Sample>> {
    if step == 0 {
        return Err(Error::InvalidOptions("sample step must be non-zero".into()));
    }
    if max == 0 {
        return Err(Error::InvalidOptions("domain maximum must be non-zero".into()));
    }

    let scale = max as f64;
    let samples = (0..=max)
        .step_by(step as usize)
        .map(|x| {
            let x = x as f64;
            Sample {
                x,
                y: srgb_encode_scaled(x, scale),
            }
        })
        .collect();
    Ok(samples)
}

/// Break points `0, stride, 2·stride, …, max`
///
/// The stride must divide `max` so that the last break point is the domain end
/// itself rather than an out-of-sequence append.
pub fn break_points(stride: u32, max: u32) -> Result<Vec<u32>> {
    if stride == 0 {
        return Err(Error::InvalidOptions("break stride must be non-zero".into()));
    }
    if max == 0 || max % stride != 0 {
        return Err(Error::InvalidOptions(format!(
            "break stride {} does not land on domain end {}",
            stride, max
        )));
    }
    Ok((0..=max).step_by(stride as usize).collect())
}
