//! # Device Ledger
//!
//! The keyed balance store shared (by shape) between the staking and reward
//! engines: `(account, device) -> amount`.
//!
//! All balances are unsigned; no operation can drive an entry negative.
//! Credits use checked arithmetic and surface [`LedgerError::Overflow`]
//! rather than wrapping.

use crate::domain::value_objects::{AccountId, DeviceId, U256};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Balance map keyed by `(owner, device)`.
///
/// Entries persist indefinitely; a swept entry simply holds zero meaning
/// (absent and zero are indistinguishable to readers).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLedger {
    balances: HashMap<(AccountId, DeviceId), U256>,
}

impl DeviceLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the stored balance, creating the entry if absent.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the addition is not representable.
    pub fn credit(
        &mut self,
        owner: AccountId,
        device: DeviceId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let slot = self.balances.entry((owner, device)).or_insert_with(U256::zero);
        *slot = slot.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Zeroes the balance and returns the prior value.
    ///
    /// Used to sweep a balance atomically as part of a larger operation.
    /// Absent entries sweep to zero and return zero.
    pub fn debit_all(&mut self, owner: AccountId, device: DeviceId) -> U256 {
        self.balances
            .remove(&(owner, device))
            .unwrap_or_else(U256::zero)
    }

    /// Pure lookup; defaults to zero for absent entries.
    #[must_use]
    pub fn read(&self, owner: AccountId, device: DeviceId) -> U256 {
        self.balances
            .get(&(owner, device))
            .copied()
            .unwrap_or_else(U256::zero)
    }

    /// Sum of all balances held for `owner`, across devices.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the sum is not representable.
    pub fn total_of(&self, owner: AccountId) -> Result<U256, LedgerError> {
        let mut total = U256::zero();
        for ((entry_owner, _), amount) in &self.balances {
            if *entry_owner == owner {
                total = total.checked_add(*amount).ok_or(LedgerError::Overflow)?;
            }
        }
        Ok(total)
    }

    /// Number of live entries (zero-balance entries are removed on sweep).
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns true if the ledger holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
