//! # Arcade-Chain Test Suite
//!
//! Unified test crate for cross-subsystem scenarios: the bridge, the
//! settlement ledger, and custody wired together the way a node runs them.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs           # Shared world fixture
//!     ├── bridge_flows.rs      # Request lifecycle end to end
//!     ├── settlement_flows.rs  # Settlement + dispute lifecycle
//!     └── concurrency.rs       # Double-processing races
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ac-tests
//! cargo test -p ac-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
