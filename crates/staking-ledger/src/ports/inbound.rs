//! # Driving Ports (API - Inbound)
//!
//! The operation surface offered to external callers.
//!
//! The transport that authenticates callers is out of scope; every mutating
//! method takes the caller explicitly and the implementation consults the
//! authorization and pause gates before the operation body runs.

use crate::domain::entities::{RewardEntry, WithdrawRequest};
use crate::domain::value_objects::{AccountId, DeviceId, U256};
use crate::errors::LedgerError;

// =============================================================================
// STAKING API
// =============================================================================

/// Entry points of the staking engine.
pub trait StakingApi {
    /// Stakes `amount` against `(caller, device)`, pulling tokens from the
    /// caller into staking custody.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAmount`] for zero amounts;
    /// [`LedgerError::TransferFailed`] if the token pull declines.
    fn deposit(
        &mut self,
        caller: AccountId,
        device: DeviceId,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Applies `deposit` semantics once per entry, in input order.
    ///
    /// The whole sequence shares one failure domain: any entry failing
    /// aborts the entire call with no partial application.
    ///
    /// # Errors
    ///
    /// As for [`StakingApi::deposit`], for any entry.
    fn bulk_deposit(
        &mut self,
        caller: AccountId,
        deposits: &[(DeviceId, U256)],
    ) -> Result<(), LedgerError>;

    /// Credits `(owner, device)` without pulling tokens; the caller is
    /// presumed to have arranged the fund movement already.
    ///
    /// Privileged: requires the `Reinvest` capability. Exempt from the pause
    /// and reentrancy gates so the reward engine can call through.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the capability;
    /// [`LedgerError::InvalidAmount`] for zero amounts.
    fn reinvest(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        device: DeviceId,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Sweeps the listed devices' full balances into a new time-locked
    /// withdrawal request and returns its id.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AlreadyPending`] if a request is live;
    /// [`LedgerError::InsufficientBalance`] if the sweep total is zero.
    fn request_withdrawal(
        &mut self,
        caller: AccountId,
        devices: &[DeviceId],
    ) -> Result<u64, LedgerError>;

    /// Cancels the live request, refunding every snapshot entry.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoRequestFound`] without a live request.
    fn cancel_withdrawal(&mut self, caller: AccountId) -> Result<(), LedgerError>;

    /// Pays out the live request once its time lock has expired, returning
    /// the amount paid. On transfer failure the request stays live and the
    /// call may be retried.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoRequestFound`] without a live request;
    /// [`LedgerError::WaitingPeriodNotOver`] before the release time;
    /// [`LedgerError::TransferFailed`] if the payout declines.
    fn withdraw_stake(&mut self, caller: AccountId) -> Result<U256, LedgerError>;

    /// Staked balance of `(owner, device)`.
    fn staked_balance(&self, owner: AccountId, device: DeviceId) -> U256;

    /// The live withdrawal request of `owner`, if any.
    fn pending_request(&self, owner: AccountId) -> Option<WithdrawRequest>;
}

// =============================================================================
// REWARD API
// =============================================================================

/// Entry points of the reward engine.
pub trait RewardApi {
    /// Self-service: sets the caller's reinvestment percentage.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidPercentage`] above 100.
    fn set_reinvest_percentage(
        &mut self,
        caller: AccountId,
        percent: u8,
    ) -> Result<(), LedgerError>;

    /// Admin-driven accrual batch. For each entry, diverts the owner's
    /// configured percentage into the staking ledger (pulling tokens from
    /// the reward wallet into staking custody) and credits the remainder to
    /// the reward ledger.
    ///
    /// The batch and the cross-engine calls share one failure domain: any
    /// failure rolls back every entry.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the `Admin` capability;
    /// [`LedgerError::TransferFailed`] if a reinvestment pull declines.
    fn add_rewards(
        &mut self,
        caller: AccountId,
        entries: &[RewardEntry],
    ) -> Result<(), LedgerError>;

    /// Sweeps the caller's reward balances for the listed devices and pays
    /// the total from the reward wallet, returning the amount paid.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientBalance`] if the sweep total is zero;
    /// [`LedgerError::TransferFailed`] if the payout declines.
    fn withdraw_rewards(
        &mut self,
        caller: AccountId,
        devices: &[DeviceId],
    ) -> Result<U256, LedgerError>;

    /// Reward balance of `(owner, device)`.
    fn reward_balance(&self, owner: AccountId, device: DeviceId) -> U256;

    /// Reinvestment percentage of `owner` (default 0).
    fn reinvest_percentage(&self, owner: AccountId) -> u8;
}

// =============================================================================
// ADMIN API
// =============================================================================

/// Admin-only configuration surface.
///
/// Config setters are not pause-gated and take effect immediately for all
/// subsequent operations. Cells are read live at call time, never
/// snapshotted at initialization.
pub trait AdminApi {
    /// Sets the request window in seconds. Affects only requests created
    /// after the change.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the `Admin` capability.
    fn set_request_window(&mut self, caller: AccountId, window_secs: u64)
        -> Result<(), LedgerError>;

    /// Sets the staking engine's token address. Rejects the zero address.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAddress`] for the zero address;
    /// [`LedgerError::Unauthorized`] without the `Admin` capability.
    fn set_token_address(&mut self, caller: AccountId, address: AccountId)
        -> Result<(), LedgerError>;

    /// Sets the reward engine's token address.
    ///
    /// Inherited asymmetry: unlike [`AdminApi::set_token_address`], this
    /// setter performs NO zero-address validation.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the `Admin` capability.
    fn set_reward_token_address(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> Result<(), LedgerError>;

    /// Sets the wallet funding reward payouts and reinvestment pulls.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the `Admin` capability.
    fn set_reward_wallet(&mut self, caller: AccountId, address: AccountId)
        -> Result<(), LedgerError>;

    /// Sets the staking custody address reinvestment pulls target.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the `Admin` capability.
    fn set_staking_address(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> Result<(), LedgerError>;

    /// Pauses or resumes the system.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the `PauseControl` capability.
    fn set_paused(&mut self, caller: AccountId, paused: bool) -> Result<(), LedgerError>;
}
