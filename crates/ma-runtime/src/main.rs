//! # Message Aggregation Runtime
//!
//! Aggregates one batch of messages into an attested certificate and merges
//! it into the persistent counter.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ma_runtime::{demo_batch, load_batch, AggregationRuntime, RuntimeConfig};
use ma_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::parse();

    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Message Aggregation Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let entries = match &config.batch_file {
        Some(path) => load_batch(path)
            .with_context(|| format!("Failed to load batch from {}", path.display()))?,
        None => {
            info!("No batch file given, using demo batch");
            demo_batch()
        }
    };

    let runtime = AggregationRuntime::new(config.aggregation(), config.initial_counter)
        .context("Failed to wire services")?;

    let report = runtime
        .run(&entries)
        .await
        .context("Failed to aggregate and commit batch")?;

    info!(
        entries = report.entries,
        attested = report.attested,
        previous = report.outcome.previous,
        stored = report.outcome.stored,
        tag = %report.certificate_tag,
        "Run complete"
    );

    if config.print_metrics {
        println!("{}", encode_metrics().context("Failed to encode metrics")?);
    }

    Ok(())
}
