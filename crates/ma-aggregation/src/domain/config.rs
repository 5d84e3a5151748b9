//! Aggregation configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use ma_aggregation::domain::AggregationConfig;
//!
//! let config = AggregationConfig::default()
//!     .with_program_name("CheckMessages")
//!     .with_max_batch_size(500);
//! config.validate()?;
//! ```

use super::errors::AggregationError;
use serde::{Deserialize, Serialize};

/// Default program name, used as the attestation domain separator.
pub const DEFAULT_PROGRAM_NAME: &str = "CheckMessages";

/// Default upper bound on entries accepted by one batch call.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10_000;

/// Aggregation configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Program name bound into every certificate. Certificates from a
    /// differently named program never verify.
    pub program_name: String,
    /// Maximum entries per `aggregate`/`extend` call
    pub max_batch_size: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl AggregationConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), AggregationError> {
        if self.program_name.trim().is_empty() {
            return Err(AggregationError::InvalidConfig(
                "program_name cannot be empty".to_string(),
            ));
        }

        if self.max_batch_size == 0 {
            return Err(AggregationError::InvalidConfig(
                "max_batch_size cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the program name
    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    /// Builder-style method to set the batch limit
    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = max;
        self
    }
}
