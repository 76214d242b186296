//! # Domain Invariants
//!
//! Checkable statements the engines must uphold:
//!
//! | Invariant | Statement |
//! |-----------|-----------|
//! | Conservation | Live staked balances + pending request total change only by successful deposit/reinvest (adds exactly the amount) or withdraw (removes everything paid) |
//! | Single pending | An account has at most one live withdrawal request |
//! | Non-negative | Balances are unsigned; no operation leaves an entry negative |
//!
//! The helpers here are used by the test suites to assert conservation across
//! operation sequences; they are not called on the hot path.

use crate::domain::staking::StakingEngine;
use crate::domain::value_objects::{AccountId, U256};
use crate::errors::LedgerError;

/// Total value the staking engine owes `owner`: live device balances plus
/// the pending request's total, if any.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if the sum is not representable.
pub fn staking_liabilities(
    engine: &StakingEngine,
    owner: AccountId,
) -> Result<U256, LedgerError> {
    let staked = engine.staked_total(owner)?;
    let pending = engine
        .pending_request(owner)
        .map_or_else(U256::zero, |request| request.total_amount);
    staked.checked_add(pending).ok_or(LedgerError::Overflow)
}

/// Verifies that a pending request's snapshot sums to its recorded total.
#[must_use]
pub fn request_snapshot_consistent(engine: &StakingEngine, owner: AccountId) -> bool {
    match engine.pending_request(owner) {
        None => true,
        Some(request) => {
            let mut sum = U256::zero();
            for (_, amount) in &request.snapshot {
                match sum.checked_add(*amount) {
                    Some(next) => sum = next,
                    None => return false,
                }
            }
            request.id != 0 && sum == request.total_amount
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
