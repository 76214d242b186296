//! # Notifications
//!
//! Observable notifications emitted by state transitions.
//!
//! Emission is an output side-channel: each successful operation publishes its
//! notifications through the [`EventSink`](crate::ports::outbound::EventSink)
//! port only after the operation commits. Aborted operations publish nothing.
//!
//! ## Emission shape quirks (preserved for compatibility)
//!
//! - `request()` emits one [`Notification::WithdrawRequested`] per input
//!   device, and each event's `running_total` is the cumulative sum at that
//!   point in the loop, NOT the per-device amount.
//! - The two engines' withdrawal notifications differ in shape: the staking
//!   engine emits the request id, the reward engine emits the device list.

use crate::domain::value_objects::{AccountId, DeviceId, Timestamp, U256};
use serde::{Deserialize, Serialize};

/// A notification describing one observable state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// The request window was reconfigured.
    RequestTimeChanged {
        /// New window, in seconds.
        window_secs: u64,
    },

    /// The staking engine's token address was reconfigured.
    TokenAddressChanged {
        /// New token address.
        address: AccountId,
    },

    /// The reward engine's token address was reconfigured.
    RewardTokenAddressChanged {
        /// New token address.
        address: AccountId,
    },

    /// The reward wallet was reconfigured.
    RewardWalletChanged {
        /// New wallet address.
        address: AccountId,
    },

    /// The reward engine's staking-custody pointer was reconfigured.
    StakingAddressChanged {
        /// New staking custody address.
        address: AccountId,
    },

    /// Tokens entered staking custody (direct deposit or reinvestment).
    Deposited {
        /// Account whose ledger was credited.
        account: AccountId,
        /// Device the stake is attributed to.
        device: DeviceId,
        /// Amount credited.
        amount: U256,
    },

    /// One device was swept into a withdrawal request.
    ///
    /// Emitted once per input device of a `request()` call.
    WithdrawRequested {
        /// Id of the request being built.
        request_id: u64,
        /// Requesting account.
        account: AccountId,
        /// Device swept by this step.
        device: DeviceId,
        /// When the request becomes claimable.
        release_time: Timestamp,
        /// Cumulative total at this point in the sweep loop, not the
        /// per-device amount.
        running_total: U256,
    },

    /// One snapshot entry was refunded by `cancel()`.
    WithdrawRequestCanceled {
        /// Id of the canceled request.
        request_id: u64,
        /// Account refunded.
        account: AccountId,
        /// Device credited back.
        device: DeviceId,
        /// Amount credited back.
        amount: U256,
    },

    /// A time-locked withdrawal paid out (staking engine shape).
    Withdrawn {
        /// Id of the settled request.
        request_id: u64,
        /// Account paid.
        account: AccountId,
        /// Amount paid.
        amount: U256,
    },

    /// An account changed its reinvestment percentage.
    ReinvestPercentageChanged {
        /// Account that reconfigured itself.
        account: AccountId,
        /// New percentage in `[0, 100]`.
        percent: u8,
    },

    /// A reward accrued, split between reinvestment and the reward ledger.
    RewardAdded {
        /// Account the reward accrued to.
        account: AccountId,
        /// Device that earned it.
        device: DeviceId,
        /// Full value before the split.
        value: U256,
        /// Portion diverted into the staking ledger.
        reinvested: U256,
    },

    /// Accrued rewards paid out (reward engine shape).
    RewardsWithdrawn {
        /// Account paid.
        account: AccountId,
        /// Total amount paid.
        amount: U256,
        /// Devices swept by the call, in input order.
        devices: Vec<DeviceId>,
    },

    /// The system was paused.
    Paused,

    /// The system was resumed.
    Unpaused,
}

impl Notification {
    /// Stable name of the notification kind, for logging and routing.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestTimeChanged { .. } => "RequestTimeChanged",
            Self::TokenAddressChanged { .. } => "TokenAddressChanged",
            Self::RewardTokenAddressChanged { .. } => "RewardTokenAddressChanged",
            Self::RewardWalletChanged { .. } => "RewardWalletChanged",
            Self::StakingAddressChanged { .. } => "StakingAddressChanged",
            Self::Deposited { .. } => "Deposited",
            Self::WithdrawRequested { .. } => "WithdrawRequested",
            Self::WithdrawRequestCanceled { .. } => "WithdrawRequestCanceled",
            Self::Withdrawn { .. } => "Withdrawn",
            Self::ReinvestPercentageChanged { .. } => "ReinvestPercentageChanged",
            Self::RewardAdded { .. } => "RewardAdded",
            Self::RewardsWithdrawn { .. } => "RewardsWithdrawn",
            Self::Paused => "Paused",
            Self::Unpaused => "Unpaused",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
