//! # Staking Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-engine flows against the full service
//!     ├── fixtures.rs   # Shared harness (token, authorizer, clock, sink)
//!     ├── staking_flows.rs
//!     └── reward_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p staking-ledger-tests
//!
//! # By category
//! cargo test -p staking-ledger-tests integration::staking_flows
//! cargo test -p staking-ledger-tests integration::reward_flows
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
