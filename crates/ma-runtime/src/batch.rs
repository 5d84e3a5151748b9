//! # Batch Loading
//!
//! Batches are JSON arrays of entries:
//!
//! ```text
//! [
//!   { "sequence_number": 4,
//!     "payload": { "agent_id": 1, "x_location": 1000, "y_location": 20000, "checksum": 21001 } }
//! ]
//! ```

use std::fs;
use std::path::Path;

use ma_aggregation::{BatchEntry, Payload};
use thiserror::Error;

/// Batch loading errors
#[derive(Debug, Error)]
pub enum BatchError {
    /// File could not be read
    #[error("failed to read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a JSON array of entries
    #[error("malformed batch file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a batch from JSON text.
pub fn parse_batch(json: &str) -> Result<Vec<BatchEntry>, BatchError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a batch file.
pub fn load_batch(path: &Path) -> Result<Vec<BatchEntry>, BatchError> {
    let text = fs::read_to_string(path)?;
    parse_batch(&text)
}

/// Built-in batch used when no file is given.
///
/// Three valid entries out of order, one bad checksum and one agent-zero
/// bypass.
pub fn demo_batch() -> Vec<BatchEntry> {
    vec![
        BatchEntry::new(4, Payload::with_valid_checksum(1, 1000, 20_000)),
        BatchEntry::new(5, Payload::with_valid_checksum(7, 4_000, 5_000)),
        BatchEntry::new(1, Payload::with_valid_checksum(2, 0, 12_000)),
        BatchEntry::new(9, Payload::new(2, 3, 5001, 1)),
        BatchEntry::new(6, Payload::new(0, 0, 0, 0)),
    ]
}
