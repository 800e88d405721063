//! Prints the 256-entry sRGB encoding table to stdout.
//!
//! Takes no arguments. Diagnostics go to stderr; set `RUST_LOG` to change
//! their verbosity.

use anyhow::Context;
use std::io::{BufWriter, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use srgblut_core::{ErrorStats, GeneratorOptions, generate};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "srgblut=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let options = GeneratorOptions::default();
    tracing::info!(
        version = srgblut_core::VERSION,
        sample_step = options.sample_step,
        break_stride = options.break_stride,
        forced = options.forced_points.len(),
        "generating sRGB encoding table"
    );

    let table = generate(&options).context("failed to fit the sRGB curve")?;

    let stats = ErrorStats::measure(&table);
    tracing::info!(
        entries = table.len(),
        exact = stats.exact,
        count = stats.count,
        abs_error = stats.abs_sum,
        bias = stats.bias,
        max_error = stats.max_abs,
        max_at = stats.max_at,
        monotonic = stats.monotonic,
        "table accuracy"
    );
    if !stats.monotonic {
        tracing::warn!("table lookup is not monotonic");
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    table
        .write_hex(&mut out, options.values_per_line)
        .context("failed to write table")?;
    out.flush().context("failed to flush stdout")?;

    Ok(())
}
