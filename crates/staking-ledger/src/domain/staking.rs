//! # Staking Engine
//!
//! Owns deposits, the per-account withdrawal-request state machine,
//! cancellation, and time-locked release.
//!
//! The engine is a plain state machine: it mutates its own state eagerly and
//! reports failure through `Result`. Atomicity is provided one level up: the
//! service runs each top-level operation against a staged copy of the engine
//! and commits only on success, so eager mutation here never leaks partial
//! effects.

use crate::domain::entities::{StakingConfig, WithdrawRequest};
use crate::domain::ledger::DeviceLedger;
use crate::domain::value_objects::{AccountId, DeviceId, Timestamp, U256};
use crate::errors::LedgerError;
use crate::events::Notification;
use crate::ports::outbound::TokenTransfer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Staking ledger and withdrawal-request state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingEngine {
    ledger: DeviceLedger,
    requests: HashMap<AccountId, WithdrawRequest>,
    next_request_id: u64,
    config: StakingConfig,
}

impl StakingEngine {
    /// Creates an engine with the given configuration and empty ledgers.
    #[must_use]
    pub fn new(config: StakingConfig) -> Self {
        Self {
            ledger: DeviceLedger::new(),
            requests: HashMap::new(),
            // Request ids are non-zero for live requests; id 0 means "none"
            next_request_id: 1,
            config,
        }
    }

    /// Current configuration cells.
    #[must_use]
    pub fn config(&self) -> &StakingConfig {
        &self.config
    }

    /// Mutable configuration cells (admin setters only).
    pub fn config_mut(&mut self) -> &mut StakingConfig {
        &mut self.config
    }

    /// Staked balance of `(owner, device)`.
    #[must_use]
    pub fn balance(&self, owner: AccountId, device: DeviceId) -> U256 {
        self.ledger.read(owner, device)
    }

    /// Sum of all staked balances held for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the sum is not representable.
    pub fn staked_total(&self, owner: AccountId) -> Result<U256, LedgerError> {
        self.ledger.total_of(owner)
    }

    /// The live withdrawal request of `owner`, if any.
    #[must_use]
    pub fn pending_request(&self, owner: AccountId) -> Option<&WithdrawRequest> {
        self.requests.get(&owner)
    }

    /// Pulls `amount` of token from `caller` into custody and credits the
    /// staking ledger.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAmount`] for zero;
    /// [`LedgerError::TransferFailed`] if the pull declines;
    /// [`LedgerError::Overflow`] if the credit is not representable.
    pub fn deposit(
        &mut self,
        caller: AccountId,
        device: DeviceId,
        amount: U256,
        token: &dyn TokenTransfer,
        events: &mut Vec<Notification>,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        // Token pull first, then the ledger credit
        token.transfer_from(self.config.custody, caller, self.config.custody, amount)?;
        self.ledger.credit(caller, device, amount)?;
        events.push(Notification::Deposited {
            account: caller,
            device,
            amount,
        });
        Ok(())
    }

    /// Applies [`StakingEngine::deposit`] once per entry, in input order.
    ///
    /// # Errors
    ///
    /// As for `deposit`, for whichever entry fails first.
    pub fn bulk_deposit(
        &mut self,
        caller: AccountId,
        deposits: &[(DeviceId, U256)],
        token: &dyn TokenTransfer,
        events: &mut Vec<Notification>,
    ) -> Result<(), LedgerError> {
        for (device, amount) in deposits {
            self.deposit(caller, *device, *amount, token, events)?;
        }
        Ok(())
    }

    /// Credits `(owner, device)` without a token pull.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAmount`] for zero;
    /// [`LedgerError::Overflow`] if the credit is not representable.
    pub fn reinvest(
        &mut self,
        owner: AccountId,
        device: DeviceId,
        amount: U256,
        events: &mut Vec<Notification>,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        self.ledger.credit(owner, device, amount)?;
        events.push(Notification::Deposited {
            account: owner,
            device,
            amount,
        });
        Ok(())
    }

    /// Sweeps the listed devices into a new withdrawal request.
    ///
    /// Every listed device is swept even when its balance is zero; such
    /// devices contribute zero-amount snapshot entries. The total is checked
    /// only after the loop. Each per-device notification carries the running
    /// cumulative total at that point, an inherited emission shape kept for
    /// compatibility.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AlreadyPending`] if a request is live;
    /// [`LedgerError::InsufficientBalance`] if the total sweeps to zero.
    pub fn request(
        &mut self,
        caller: AccountId,
        devices: &[DeviceId],
        now: Timestamp,
        events: &mut Vec<Notification>,
    ) -> Result<u64, LedgerError> {
        if self.requests.contains_key(&caller) {
            return Err(LedgerError::AlreadyPending);
        }

        let id = self.next_request_id;
        self.next_request_id += 1;

        // Window read live at request creation, never cached earlier
        let release_time = now
            .checked_add(self.config.request_window_secs)
            .ok_or(LedgerError::Overflow)?;

        let mut total = U256::zero();
        let mut snapshot = Vec::with_capacity(devices.len());
        for device in devices {
            let swept = self.ledger.debit_all(caller, *device);
            total = total.checked_add(swept).ok_or(LedgerError::Overflow)?;
            snapshot.push((*device, swept));
            events.push(Notification::WithdrawRequested {
                request_id: id,
                account: caller,
                device: *device,
                release_time,
                running_total: total,
            });
        }

        if total.is_zero() {
            return Err(LedgerError::InsufficientBalance);
        }

        self.requests.insert(
            caller,
            WithdrawRequest {
                id,
                release_time,
                total_amount: total,
                snapshot,
            },
        );
        Ok(id)
    }

    /// Cancels the live request, refunding every snapshot entry.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoRequestFound`] without a live request.
    pub fn cancel(
        &mut self,
        caller: AccountId,
        events: &mut Vec<Notification>,
    ) -> Result<(), LedgerError> {
        let request = self
            .requests
            .remove(&caller)
            .ok_or(LedgerError::NoRequestFound)?;
        for (device, amount) in &request.snapshot {
            self.ledger.credit(caller, *device, *amount)?;
            events.push(Notification::WithdrawRequestCanceled {
                request_id: request.id,
                account: caller,
                device: *device,
                amount: *amount,
            });
        }
        Ok(())
    }

    /// Pays out the live request once released, returning the amount paid.
    ///
    /// The request is deleted only after the token payout succeeds; on
    /// transfer failure it stays live and eligible for retry.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoRequestFound`] without a live request;
    /// [`LedgerError::WaitingPeriodNotOver`] before the release time;
    /// [`LedgerError::TransferFailed`] if the payout declines.
    pub fn withdraw(
        &mut self,
        caller: AccountId,
        now: Timestamp,
        token: &dyn TokenTransfer,
        events: &mut Vec<Notification>,
    ) -> Result<U256, LedgerError> {
        let request = self
            .requests
            .get(&caller)
            .ok_or(LedgerError::NoRequestFound)?;
        if !request.is_released(now) {
            return Err(LedgerError::WaitingPeriodNotOver {
                now,
                release_time: request.release_time,
            });
        }
        let id = request.id;
        let total = request.total_amount;

        token.transfer(self.config.custody, caller, total)?;

        events.push(Notification::Withdrawn {
            request_id: id,
            account: caller,
            amount: total,
        });
        self.requests.remove(&caller);
        Ok(total)
    }
}

// =============================================================================
// TESTS
// =============================================================================
