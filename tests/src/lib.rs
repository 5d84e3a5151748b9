//! # Message Aggregation Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate flows
//!     ├── fixtures.rs   # Shared payloads and wiring
//!     ├── flows.rs      # Aggregation chains ending at the state gate
//!     ├── tampering.rs  # Forged and foreign certificates
//!     └── concurrency.rs# Racing gate submissions, parallel chains
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ma-tests
//! cargo test -p ma-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p ma-tests
//! ```

pub mod integration;
