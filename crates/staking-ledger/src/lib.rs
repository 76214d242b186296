//! # Staking Ledger - Device Staking & Reward Accounting Engine
//!
//! A serialized accounting and lifecycle-state engine coupling two ledgers:
//! a per-device staking ledger with time-locked withdrawal requests, and a
//! per-device reward ledger with percentage-based auto-reinvestment feeding
//! back into the staking ledger.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Balance conservation across request/cancel/withdraw | `domain/staking.rs`, checked via `domain/invariants.rs` |
//! | At most one live withdrawal request per account | `domain/staking.rs` - `StakingEngine::request()` |
//! | Time-lock enforced lazily at claim time | `domain/staking.rs` - `StakingEngine::withdraw()` |
//! | No partial effects survive a failed operation | `service.rs` - `LedgerService::run_atomic()` |
//! | Checked balance arithmetic, overflow is fatal | `domain/ledger.rs` - `DeviceLedger::credit()` |
//!
//! ## Architecture
//!
//! Hexagonal: the engines in `domain/` are pure state machines; collaborator
//! interfaces live in `ports/outbound` (token transfer, authorization gate,
//! clock, event sink) and in-memory reference adapters in `adapters/`. The
//! [`service::LedgerService`] wires the gates (authorization, pause,
//! reentrancy) and operation-scoped atomicity around both engines.
//!
//! ## Execution Model
//!
//! Operations run strictly serially with no suspension points. Every error
//! aborts the whole enclosing operation with zero surviving mutation; the
//! caller decides whether to resubmit.
//!
//! ## Known Hazard: Device-Id Truncation
//!
//! Device serials are truncated to a fixed 9-byte key without rejection, so
//! distinct serials sharing a 9-byte prefix alias to the same ledger entry.
//! This inherited behavior is preserved deliberately; see
//! [`domain::value_objects::DeviceId`].
//!
//! ## Usage Example
//!
//! ```ignore
//! use staking_ledger::prelude::*;
//!
//! let mut service = LedgerService::new(
//!     staking_config, reward_config, token, auth, clock, sink,
//! );
//!
//! service.deposit(staker, DeviceId::from_serial("DEV-00001"), U256::from(300))?;
//! let request_id = service.request_withdrawal(staker, &[device])?;
//! // ... after the request window ...
//! let paid = service.withdraw_stake(staker)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{
        AccountId, Capability, DeviceId, Timestamp, DEVICE_ID_LEN, U256,
    };

    // Entities
    pub use crate::domain::entities::{
        RewardConfig, RewardEntry, StakingConfig, WithdrawRequest, DEFAULT_REQUEST_WINDOW_SECS,
    };

    // Ledger and engines
    pub use crate::domain::ledger::DeviceLedger;
    pub use crate::domain::reward::RewardEngine;
    pub use crate::domain::staking::StakingEngine;

    // Invariant helpers
    pub use crate::domain::invariants::{request_snapshot_consistent, staking_liabilities};

    // Ports
    pub use crate::ports::inbound::{AdminApi, RewardApi, StakingApi};
    pub use crate::ports::outbound::{AuthorizationGate, Clock, EventSink, TokenTransfer};

    // Events
    pub use crate::events::Notification;

    // Errors
    pub use crate::errors::{LedgerError, TransferError};

    // Adapters
    pub use crate::adapters::{
        InMemoryToken, ManualClock, RecordingSink, StaticAuthorizer, SystemClock,
    };

    // Service
    pub use crate::service::LedgerService;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
