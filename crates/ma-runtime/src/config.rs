//! # Runtime Configuration
//!
//! Command-line arguments, each with an environment variable fallback.

use std::path::PathBuf;

use clap::Parser;
use ma_aggregation::{AggregationConfig, DEFAULT_MAX_BATCH_SIZE, DEFAULT_PROGRAM_NAME};

/// Runtime configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "ma-runtime")]
#[command(about = "Aggregate a message batch and merge it into the persistent counter")]
pub struct RuntimeConfig {
    /// JSON file holding the batch entries (demo batch when omitted)
    #[arg(short, long, env = "MA_BATCH_FILE")]
    pub batch_file: Option<PathBuf>,

    /// Counter value before this run
    #[arg(long, env = "MA_INITIAL_COUNTER", default_value_t = 0)]
    pub initial_counter: u64,

    /// Program name bound into every certificate
    #[arg(long, env = "MA_PROGRAM_NAME", default_value = DEFAULT_PROGRAM_NAME)]
    pub program_name: String,

    /// Largest batch accepted in one call
    #[arg(long, env = "MA_MAX_BATCH_SIZE", default_value_t = DEFAULT_MAX_BATCH_SIZE)]
    pub max_batch_size: usize,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub print_metrics: bool,
}

impl RuntimeConfig {
    /// Aggregation settings derived from the arguments.
    pub fn aggregation(&self) -> AggregationConfig {
        AggregationConfig::default()
            .with_program_name(self.program_name.clone())
            .with_max_batch_size(self.max_batch_size)
    }
}
