//! # Reward Engine
//!
//! Owns reward accrual, per-account reinvestment percentages, and immediate
//! reward withdrawal. On accrual it computes the reinvestment cut and feeds
//! it back into the staking engine through a direct, synchronous call that
//! shares the caller's failure domain.
//!
//! Like [`StakingEngine`](crate::domain::staking::StakingEngine), the engine
//! mutates eagerly; the service stages both engines per operation and commits
//! only on success.

use crate::domain::entities::{RewardConfig, RewardEntry};
use crate::domain::ledger::DeviceLedger;
use crate::domain::staking::StakingEngine;
use crate::domain::value_objects::{AccountId, DeviceId, U256};
use crate::errors::LedgerError;
use crate::events::Notification;
use crate::ports::outbound::TokenTransfer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reward ledger and reinvestment-percentage state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewardEngine {
    ledger: DeviceLedger,
    percentages: HashMap<AccountId, u8>,
    config: RewardConfig,
}

impl RewardEngine {
    /// Creates an engine with the given configuration and empty ledgers.
    #[must_use]
    pub fn new(config: RewardConfig) -> Self {
        Self {
            ledger: DeviceLedger::new(),
            percentages: HashMap::new(),
            config,
        }
    }

    /// Current configuration cells.
    #[must_use]
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Mutable configuration cells (admin setters only).
    pub fn config_mut(&mut self) -> &mut RewardConfig {
        &mut self.config
    }

    /// Reward balance of `(owner, device)`.
    #[must_use]
    pub fn balance(&self, owner: AccountId, device: DeviceId) -> U256 {
        self.ledger.read(owner, device)
    }

    /// Reinvestment percentage of `owner`, defaulting to 0.
    #[must_use]
    pub fn percentage(&self, owner: AccountId) -> u8 {
        self.percentages.get(&owner).copied().unwrap_or(0)
    }

    /// Sets the caller's reinvestment percentage.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidPercentage`] above 100.
    pub fn set_percentage(
        &mut self,
        caller: AccountId,
        percent: u8,
        events: &mut Vec<Notification>,
    ) -> Result<(), LedgerError> {
        if percent > 100 {
            return Err(LedgerError::InvalidPercentage(percent));
        }
        self.percentages.insert(caller, percent);
        events.push(Notification::ReinvestPercentageChanged {
            account: caller,
            percent,
        });
        Ok(())
    }

    /// Applies an accrual batch.
    ///
    /// For each entry: reads the owner's percentage `p`; when `p > 0`,
    /// computes `floor(value * p / 100)`, pulls that cut from the reward
    /// wallet into staking custody and credits it into the staking ledger
    /// via [`StakingEngine::reinvest`]; the remainder is credited to the
    /// reward ledger. A cut that floors to zero skips the cross-engine call
    /// (the staking engine rejects zero credits) and leaves the full value
    /// in the reward ledger.
    ///
    /// # Errors
    ///
    /// Any failure (arithmetic, token pull, or the cross-engine call)
    /// aborts the whole batch; the service rolls back every entry.
    pub fn add_rewards(
        &mut self,
        staking: &mut StakingEngine,
        entries: &[RewardEntry],
        token: &dyn TokenTransfer,
        events: &mut Vec<Notification>,
    ) -> Result<(), LedgerError> {
        for entry in entries {
            let percent = self.percentage(entry.owner);
            let mut reinvested = U256::zero();
            if percent > 0 {
                reinvested = entry
                    .value
                    .checked_mul(U256::from(percent))
                    .ok_or(LedgerError::Overflow)?
                    / U256::from(100);
                if !reinvested.is_zero() {
                    token.transfer_from(
                        self.config.custody,
                        self.config.reward_wallet,
                        self.config.staking_address,
                        reinvested,
                    )?;
                    staking.reinvest(entry.owner, entry.device, reinvested, events)?;
                }
            }
            let remainder = entry
                .value
                .checked_sub(reinvested)
                .ok_or(LedgerError::Overflow)?;
            self.ledger.credit(entry.owner, entry.device, remainder)?;
            events.push(Notification::RewardAdded {
                account: entry.owner,
                device: entry.device,
                value: entry.value,
                reinvested,
            });
        }
        Ok(())
    }

    /// Sweeps the caller's reward balances for the listed devices and pays
    /// the total from the reward wallet.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientBalance`] if the sweep total is zero;
    /// [`LedgerError::TransferFailed`] if the payout declines.
    pub fn withdraw(
        &mut self,
        caller: AccountId,
        devices: &[DeviceId],
        token: &dyn TokenTransfer,
        events: &mut Vec<Notification>,
    ) -> Result<U256, LedgerError> {
        let mut total = U256::zero();
        for device in devices {
            let swept = self.ledger.debit_all(caller, *device);
            total = total.checked_add(swept).ok_or(LedgerError::Overflow)?;
        }
        if total.is_zero() {
            return Err(LedgerError::InsufficientBalance);
        }
        token.transfer_from(self.config.custody, self.config.reward_wallet, caller, total)?;
        events.push(Notification::RewardsWithdrawn {
            account: caller,
            amount: total,
            devices: devices.to_vec(),
        });
        Ok(total)
    }
}

// =============================================================================
// TESTS
// =============================================================================
