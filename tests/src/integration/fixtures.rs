//! Shared harness for integration flows: a fully wired service with an
//! in-memory token (funded staker and reward wallet), a static authorizer
//! (admin + pause grants), a manual clock, and a recording sink.

use staking_ledger::prelude::*;
use std::sync::Arc;

/// Admin wallet holding `Admin` and `PauseControl`.
pub fn admin() -> AccountId {
    AccountId::new([0xAD; 20])
}

/// Default staking account used by the flows.
pub fn staker() -> AccountId {
    AccountId::new([0x01; 20])
}

/// Second staking account for cross-account checks.
pub fn other_staker() -> AccountId {
    AccountId::new([0x02; 20])
}

/// Custody account of the staking engine.
pub fn staking_custody() -> AccountId {
    AccountId::new([0xEE; 20])
}

/// Wallet funding reward payouts and reinvestment pulls.
pub fn reward_wallet() -> AccountId {
    AccountId::new([0xAA; 20])
}

/// The reward engine's own spender account.
pub fn reward_custody() -> AccountId {
    AccountId::new([0xBB; 20])
}

/// Fully wired service plus handles to its collaborators.
pub struct Harness {
    /// The service under test.
    pub service: LedgerService,
    /// Token ledger handle, for balance assertions and refunding.
    pub token: Arc<InMemoryToken>,
    /// Authorization table, for granting capabilities mid-test.
    pub auth: Arc<StaticAuthorizer>,
    /// Manual clock, for fast-forwarding past request windows.
    pub clock: Arc<ManualClock>,
    /// Notification log.
    pub sink: Arc<RecordingSink>,
}

/// Builds a harness with `stake_funds` minted and approved for the staker
/// and `wallet_funds` minted and approved for the reward wallet.
pub fn harness(stake_funds: u64, wallet_funds: u64) -> Harness {
    let token = Arc::new(InMemoryToken::new(U256::MAX));
    let auth = Arc::new(StaticAuthorizer::new());
    let clock = Arc::new(ManualClock::new(0));
    let sink = Arc::new(RecordingSink::new());

    auth.grant(admin(), Capability::Admin);
    auth.grant(admin(), Capability::PauseControl);

    for account in [staker(), other_staker()] {
        token.mint(account, U256::from(stake_funds)).unwrap();
        token.approve(account, staking_custody(), U256::from(stake_funds));
    }
    token.mint(reward_wallet(), U256::from(wallet_funds)).unwrap();
    token.approve(reward_wallet(), reward_custody(), U256::from(wallet_funds));

    let service = LedgerService::new(
        StakingConfig {
            custody: staking_custody(),
            token_address: AccountId::new([0xCC; 20]),
            ..StakingConfig::default()
        },
        RewardConfig {
            token_address: AccountId::new([0xCC; 20]),
            reward_wallet: reward_wallet(),
            staking_address: staking_custody(),
            custody: reward_custody(),
        },
        token.clone(),
        auth.clone(),
        clock.clone(),
        sink.clone(),
    );

    Harness {
        service,
        token,
        auth,
        clock,
        sink,
    }
}
