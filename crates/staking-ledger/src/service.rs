//! # Ledger Service
//!
//! Orchestrates both engines behind the authorization, pause, and reentrancy
//! gates, and provides operation-scoped atomicity.
//!
//! ## Execution model
//!
//! Operations run strictly serially (`&mut self`); there is no suspension
//! within an operation. Each mutating entry point:
//!
//! 1. consults the pause flag and the authorization gate,
//! 2. takes the engine's advisory reentrancy guard (global across accounts),
//! 3. runs the engine body against live state with the token collaborator
//!    bracketed by `begin`/`commit`/`abort`,
//! 4. on failure restores a pre-operation snapshot of BOTH engines and
//!    aborts the token bracket, so no partial effect survives anywhere,
//! 5. on success publishes the buffered notifications.
//!
//! Cross-engine calls (reward accrual driving `reinvest`) execute inside the
//! same bracket and therefore share the caller's failure domain.

use crate::domain::entities::{RewardConfig, RewardEntry, StakingConfig, WithdrawRequest};
use crate::domain::reward::RewardEngine;
use crate::domain::staking::StakingEngine;
use crate::domain::value_objects::{AccountId, Capability, DeviceId, U256};
use crate::errors::LedgerError;
use crate::events::Notification;
use crate::ports::inbound::{AdminApi, RewardApi, StakingApi};
use crate::ports::outbound::{AuthorizationGate, Clock, EventSink, TokenTransfer};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// REENTRANCY GUARD
// =============================================================================

/// RAII token holding an engine's advisory guard; released on every exit
/// path, including failure.
#[derive(Debug)]
struct GuardToken {
    flag: Arc<AtomicBool>,
}

impl Drop for GuardToken {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn enter(flag: &Arc<AtomicBool>) -> Result<GuardToken, LedgerError> {
    if flag.swap(true, Ordering::SeqCst) {
        return Err(LedgerError::ReentrantCall);
    }
    Ok(GuardToken {
        flag: Arc::clone(flag),
    })
}

// =============================================================================
// SERVICE
// =============================================================================

/// The combined staking/reward service.
pub struct LedgerService {
    staking: StakingEngine,
    reward: RewardEngine,
    paused: bool,
    // One advisory guard per engine, deliberately global across accounts
    staking_guard: Arc<AtomicBool>,
    reward_guard: Arc<AtomicBool>,
    token: Arc<dyn TokenTransfer>,
    auth: Arc<dyn AuthorizationGate>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl LedgerService {
    /// Creates a service over the given configuration and collaborators.
    #[must_use]
    pub fn new(
        staking_config: StakingConfig,
        reward_config: RewardConfig,
        token: Arc<dyn TokenTransfer>,
        auth: Arc<dyn AuthorizationGate>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            staking: StakingEngine::new(staking_config),
            reward: RewardEngine::new(reward_config),
            paused: false,
            staking_guard: Arc::new(AtomicBool::new(false)),
            reward_guard: Arc::new(AtomicBool::new(false)),
            token,
            auth,
            clock,
            sink,
        }
    }

    /// Returns true while the system is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current request window in seconds.
    #[must_use]
    pub fn request_window(&self) -> u64 {
        self.staking.config().request_window_secs
    }

    /// Staking-side configuration cells.
    #[must_use]
    pub fn staking_config(&self) -> &StakingConfig {
        self.staking.config()
    }

    /// Reward-side configuration cells.
    #[must_use]
    pub fn reward_config(&self) -> &RewardConfig {
        self.reward.config()
    }

    /// Read-only view of the staking engine, for invariant checks.
    #[must_use]
    pub fn staking_engine(&self) -> &StakingEngine {
        &self.staking
    }

    /// Read-only view of the reward engine, for invariant checks.
    #[must_use]
    pub fn reward_engine(&self) -> &RewardEngine {
        &self.reward
    }

    fn ensure_active(&self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::SystemPaused);
        }
        Ok(())
    }

    fn authorize(&self, caller: AccountId, capability: Capability) -> Result<(), LedgerError> {
        if self.auth.allows(caller, capability) {
            Ok(())
        } else {
            warn!(caller = %caller, ?capability, "capability check failed");
            Err(LedgerError::Unauthorized(capability))
        }
    }

    /// Runs `body` against live engine state, restoring a pre-operation
    /// snapshot of both engines and aborting the token bracket on failure.
    /// Buffered notifications publish only on commit.
    fn run_atomic<T>(
        &mut self,
        body: impl FnOnce(
            &mut StakingEngine,
            &mut RewardEngine,
            &dyn TokenTransfer,
            &mut Vec<Notification>,
        ) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let staking_backup = self.staking.clone();
        let reward_backup = self.reward.clone();
        let mut staged = Vec::new();
        let token = Arc::clone(&self.token);
        token.begin();
        match body(&mut self.staking, &mut self.reward, token.as_ref(), &mut staged) {
            Ok(value) => {
                token.commit();
                for event in staged {
                    debug!(event = event.name(), "notification");
                    self.sink.publish(event);
                }
                Ok(value)
            }
            Err(err) => {
                self.staking = staking_backup;
                self.reward = reward_backup;
                token.abort();
                Err(err)
            }
        }
    }
}

// =============================================================================
// STAKING API
// =============================================================================

impl StakingApi for LedgerService {
    fn deposit(
        &mut self,
        caller: AccountId,
        device: DeviceId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_active()?;
        let _guard = enter(&self.staking_guard)?;
        info!(account = %caller, device = %device, %amount, "deposit");
        self.run_atomic(|staking, _, token, events| {
            staking.deposit(caller, device, amount, token, events)
        })
    }

    fn bulk_deposit(
        &mut self,
        caller: AccountId,
        deposits: &[(DeviceId, U256)],
    ) -> Result<(), LedgerError> {
        self.ensure_active()?;
        let _guard = enter(&self.staking_guard)?;
        info!(account = %caller, entries = deposits.len(), "bulk deposit");
        self.run_atomic(|staking, _, token, events| {
            staking.bulk_deposit(caller, deposits, token, events)
        })
    }

    fn reinvest(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        device: DeviceId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        // Exempt from the pause and reentrancy gates so the reward engine's
        // accrual path can call through
        self.authorize(caller, Capability::Reinvest)?;
        info!(account = %owner, device = %device, %amount, "reinvest");
        self.run_atomic(|staking, _, _, events| staking.reinvest(owner, device, amount, events))
    }

    fn request_withdrawal(
        &mut self,
        caller: AccountId,
        devices: &[DeviceId],
    ) -> Result<u64, LedgerError> {
        self.ensure_active()?;
        let _guard = enter(&self.staking_guard)?;
        let now = self.clock.now();
        info!(account = %caller, devices = devices.len(), "withdrawal request");
        self.run_atomic(|staking, _, _, events| staking.request(caller, devices, now, events))
    }

    fn cancel_withdrawal(&mut self, caller: AccountId) -> Result<(), LedgerError> {
        self.ensure_active()?;
        let _guard = enter(&self.staking_guard)?;
        info!(account = %caller, "withdrawal cancellation");
        self.run_atomic(|staking, _, _, events| staking.cancel(caller, events))
    }

    fn withdraw_stake(&mut self, caller: AccountId) -> Result<U256, LedgerError> {
        self.ensure_active()?;
        let _guard = enter(&self.staking_guard)?;
        let now = self.clock.now();
        info!(account = %caller, now, "stake withdrawal");
        self.run_atomic(|staking, _, token, events| staking.withdraw(caller, now, token, events))
    }

    fn staked_balance(&self, owner: AccountId, device: DeviceId) -> U256 {
        self.staking.balance(owner, device)
    }

    fn pending_request(&self, owner: AccountId) -> Option<WithdrawRequest> {
        self.staking.pending_request(owner).cloned()
    }
}

// =============================================================================
// REWARD API
// =============================================================================

impl RewardApi for LedgerService {
    fn set_reinvest_percentage(
        &mut self,
        caller: AccountId,
        percent: u8,
    ) -> Result<(), LedgerError> {
        self.ensure_active()?;
        let _guard = enter(&self.reward_guard)?;
        info!(account = %caller, percent, "reinvest percentage change");
        self.run_atomic(|_, reward, _, events| reward.set_percentage(caller, percent, events))
    }

    fn add_rewards(
        &mut self,
        caller: AccountId,
        entries: &[RewardEntry],
    ) -> Result<(), LedgerError> {
        self.ensure_active()?;
        self.authorize(caller, Capability::Admin)?;
        info!(entries = entries.len(), "reward accrual batch");
        self.run_atomic(|staking, reward, token, events| {
            reward.add_rewards(staking, entries, token, events)
        })
    }

    fn withdraw_rewards(
        &mut self,
        caller: AccountId,
        devices: &[DeviceId],
    ) -> Result<U256, LedgerError> {
        self.ensure_active()?;
        let _guard = enter(&self.reward_guard)?;
        info!(account = %caller, devices = devices.len(), "reward withdrawal");
        self.run_atomic(|_, reward, token, events| {
            reward.withdraw(caller, devices, token, events)
        })
    }

    fn reward_balance(&self, owner: AccountId, device: DeviceId) -> U256 {
        self.reward.balance(owner, device)
    }

    fn reinvest_percentage(&self, owner: AccountId) -> u8 {
        self.reward.percentage(owner)
    }
}

// =============================================================================
// ADMIN API
// =============================================================================

impl AdminApi for LedgerService {
    fn set_request_window(
        &mut self,
        caller: AccountId,
        window_secs: u64,
    ) -> Result<(), LedgerError> {
        self.authorize(caller, Capability::Admin)?;
        self.staking.config_mut().request_window_secs = window_secs;
        info!(window_secs, "request window changed");
        self.sink
            .publish(Notification::RequestTimeChanged { window_secs });
        Ok(())
    }

    fn set_token_address(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> Result<(), LedgerError> {
        self.authorize(caller, Capability::Admin)?;
        if address.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        self.staking.config_mut().token_address = address;
        info!(%address, "staking token address changed");
        self.sink.publish(Notification::TokenAddressChanged { address });
        Ok(())
    }

    fn set_reward_token_address(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> Result<(), LedgerError> {
        self.authorize(caller, Capability::Admin)?;
        // Inherited asymmetry: no zero-address validation on this side
        self.reward.config_mut().token_address = address;
        info!(%address, "reward token address changed");
        self.sink
            .publish(Notification::RewardTokenAddressChanged { address });
        Ok(())
    }

    fn set_reward_wallet(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> Result<(), LedgerError> {
        self.authorize(caller, Capability::Admin)?;
        self.reward.config_mut().reward_wallet = address;
        info!(%address, "reward wallet changed");
        self.sink.publish(Notification::RewardWalletChanged { address });
        Ok(())
    }

    fn set_staking_address(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> Result<(), LedgerError> {
        self.authorize(caller, Capability::Admin)?;
        self.reward.config_mut().staking_address = address;
        info!(%address, "staking address changed");
        self.sink
            .publish(Notification::StakingAddressChanged { address });
        Ok(())
    }

    fn set_paused(&mut self, caller: AccountId, paused: bool) -> Result<(), LedgerError> {
        self.authorize(caller, Capability::PauseControl)?;
        self.paused = paused;
        info!(paused, "pause flag changed");
        self.sink.publish(if paused {
            Notification::Paused
        } else {
            Notification::Unpaused
        });
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
