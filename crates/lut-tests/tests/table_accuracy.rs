//! Table accuracy against the exact sRGB curve
//!
//! Every 16-bit linear input is looked up through the default table and
//! compared with the exact encoding rounded to the nearest code value.
//!
//! Near black the curve is steep and the forced points trade accuracy for a
//! visually smooth ramp, so errors there reach several dozen code values.
//! From 8192 upwards the table should be within one code value everywhere.

use lut_tests::sweep::SHALLOW_REGION_START;
use lut_tests::{default_table, fit_error, region_report};
use srgblut_core::{GeneratorOptions, fit_curve};

#[test]
fn test_max_error_is_bounded() {
    let table = default_table().unwrap();
    let report = region_report(&table);
    println!("{}", report);

    assert_eq!(report.total.count, 65536);
    assert!(
        report.total.max_abs <= 58,
        "max error {} at {}",
        report.total.max_abs,
        report.total.max_at
    );
    // Normalized bound
    assert!((report.total.max_abs as f64) / 65535.0 < 60.0 / 65535.0);
}

#[test]
fn test_shallow_region_within_one_code() {
    let table = default_table().unwrap();
    let report = region_report(&table);
    assert_eq!(
        report.shallow.count,
        65536 - SHALLOW_REGION_START as u32
    );
    assert!(
        report.shallow.max_abs <= 1,
        "max error {} at {}",
        report.shallow.max_abs,
        report.shallow.max_at
    );
}

#[test]
fn test_largest_error_is_near_black() {
    let table = default_table().unwrap();
    let report = region_report(&table);
    assert!(report.total.max_at < SHALLOW_REGION_START);
    assert_eq!(report.total.max_abs, report.steep.max_abs);
}

#[test]
fn test_table_lookup_is_monotonic() {
    let table = default_table().unwrap();
    assert!(table.is_monotonic());
    let report = region_report(&table);
    assert!(report.total.monotonic);
}

#[test]
fn test_mostly_exact() {
    let table = default_table().unwrap();
    let report = region_report(&table);
    // Roughly three quarters of all inputs round to the exact code
    assert!(
        report.total.exact > 45000,
        "only {} exact",
        report.total.exact
    );
    assert!(report.total.mean_abs() < 1.0);
}

#[test]
fn test_unquantized_fit_error() {
    let fit = fit_curve(&GeneratorOptions::default()).unwrap();
    let stats = fit_error(&fit);
    println!(
        "fit max error {:.3} at {}, rms {:.4}",
        stats.max_abs, stats.max_at, stats.rms
    );
    assert!(stats.max_abs < 60.0);
    // The largest deviation sits on one of the forced anchors near black
    assert!(stats.max_at < 1024, "max at {}", stats.max_at);
    assert!(stats.rms < 5.0);
}
