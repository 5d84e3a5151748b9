//! # MA Telemetry
//!
//! Logging and metrics setup for the message aggregation runtime.
//!
//! ## Components
//!
//! - Structured logs through `tracing-subscriber` (pretty or JSON)
//! - Prometheus counters mirrored from the service metrics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ma_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! // Application runs here
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MA_SERVICE_NAME` | `message-aggregation` | Service name in logs |
//! | `MA_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `MA_CONSOLE_OUTPUT` | `true` | Emit logs to stdout |
//! | `MA_JSON_LOGS` | `false` | JSON log lines (default on in containers) |
//! | `MA_NETWORK` | `devnet` | Deployment name |

#![warn(missing_docs)]

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, record_snapshot, register_metrics, set_counter_value, HistogramTimer,
    MetricsHandle, AGGREGATION_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    TracingInit(String),

    /// Prometheus registration or encoding failed
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;

    tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        service: config.full_service_name(),
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service: String,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service, "Shutting down telemetry");
    }
}
