//! # Core Domain Entities
//!
//! The withdrawal-request state machine record, reward accrual entries, and
//! the admin-mutable configuration cells for both engines.

use crate::domain::value_objects::{AccountId, DeviceId, Timestamp, U256};
use serde::{Deserialize, Serialize};

/// Default request window: 7 days, in seconds.
pub const DEFAULT_REQUEST_WINDOW_SECS: u64 = 7 * 24 * 60 * 60;

// =============================================================================
// WITHDRAW REQUEST
// =============================================================================

/// A pending time-locked withdrawal request.
///
/// At most one live instance exists per account. The request captures the
/// exact per-device amounts swept out of the staking ledger at creation time,
/// so `cancel` can refund them entry by entry.
///
/// ## Lifecycle
///
/// ```text
/// NoRequest --request()--> Pending --cancel()----------------> NoRequest
///                          Pending --withdraw() at release---> NoRequest
/// ```
///
/// `Pending` is a terminal trap for further `request()` calls until exited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// Monotonically increasing, never zero for a live request.
    pub id: u64,
    /// Earliest timestamp at which `withdraw` may pay out.
    pub release_time: Timestamp,
    /// Sum of all snapshot amounts.
    pub total_amount: U256,
    /// Per-device amounts swept at request time, in input order.
    ///
    /// Devices with zero balance at request time still appear here with a
    /// zero amount.
    pub snapshot: Vec<(DeviceId, U256)>,
}

impl WithdrawRequest {
    /// Returns true once the time lock has expired at `now`.
    #[must_use]
    pub fn is_released(&self, now: Timestamp) -> bool {
        now >= self.release_time
    }
}

// =============================================================================
// REWARD ENTRY
// =============================================================================

/// One accrual line in an admin-driven `add_rewards` batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEntry {
    /// Account the reward accrues to.
    pub owner: AccountId,
    /// Device the reward was earned by.
    pub device: DeviceId,
    /// Full reward value before the reinvestment split.
    pub value: U256,
}

impl RewardEntry {
    /// Creates a reward entry.
    #[must_use]
    pub fn new(owner: AccountId, device: DeviceId, value: U256) -> Self {
        Self {
            owner,
            device,
            value,
        }
    }
}

// =============================================================================
// CONFIG CELLS
// =============================================================================

/// Staking-side configuration, admin-mutable, read live at call time.
///
/// The request window is deliberately NOT snapshotted at request creation
/// beyond computing the release time: changing it affects only future
/// `request()` calls, never already-created requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Delay between withdrawal request and claim eligibility, in seconds.
    pub request_window_secs: u64,
    /// Address of the fungible-token ledger the engine settles against.
    pub token_address: AccountId,
    /// The engine's own custody account, holding staked tokens.
    pub custody: AccountId,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            request_window_secs: DEFAULT_REQUEST_WINDOW_SECS,
            token_address: AccountId::ZERO,
            custody: AccountId::ZERO,
        }
    }
}

/// Reward-side configuration, admin-mutable, read live at call time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Address of the fungible-token ledger.
    ///
    /// Unlike the staking side, the setter for this cell performs no
    /// zero-address validation. The asymmetry is inherited behavior and is
    /// preserved as observable semantics.
    pub token_address: AccountId,
    /// Wallet funding reward payouts and reinvestment pulls.
    pub reward_wallet: AccountId,
    /// Custody account of the staking engine, target of reinvestment pulls.
    pub staking_address: AccountId,
    /// The reward engine's own account, acting as token spender.
    pub custody: AccountId,
}

// =============================================================================
// TESTS
// =============================================================================
