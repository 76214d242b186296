//! # In-Memory Token Adapter
//!
//! A capped, burnable fungible-token ledger with ERC-20-style allowance
//! bookkeeping. Used by the test suites and as a simulation harness; a
//! production deployment would adapt a real token ledger behind the same
//! port.
//!
//! The `begin`/`commit`/`abort` hooks give the engines environment-provided
//! atomicity: `begin` checkpoints the full token state, `abort` restores it,
//! so a failed engine operation leaves no token movement behind.

use crate::domain::value_objects::{AccountId, U256};
use crate::errors::TransferError;
use crate::ports::outbound::TokenTransfer;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Clone, Debug, Default)]
struct TokenState {
    balances: HashMap<AccountId, U256>,
    allowances: HashMap<(AccountId, AccountId), U256>,
    total_supply: U256,
}

/// In-memory capped token ledger.
#[derive(Debug)]
pub struct InMemoryToken {
    state: RwLock<TokenState>,
    checkpoint: RwLock<Option<TokenState>>,
    cap: U256,
}

impl InMemoryToken {
    /// Creates an empty token ledger with the given supply cap.
    #[must_use]
    pub fn new(cap: U256) -> Self {
        Self {
            state: RwLock::new(TokenState::default()),
            checkpoint: RwLock::new(None),
            cap,
        }
    }

    /// The hard supply cap.
    #[must_use]
    pub fn cap(&self) -> U256 {
        self.cap
    }

    /// Current total supply.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.state.read().unwrap().total_supply
    }

    /// Grants `spender` an allowance over `owner`'s balance.
    pub fn approve(&self, owner: AccountId, spender: AccountId, amount: U256) {
        self.state
            .write()
            .unwrap()
            .allowances
            .insert((owner, spender), amount);
    }

    /// Remaining allowance of `spender` over `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> U256 {
        self.state
            .read()
            .unwrap()
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_else(U256::zero)
    }

    /// Burns `amount` from `from`, shrinking total supply.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InsufficientFunds`] if the balance is short.
    pub fn burn(&self, from: AccountId, amount: U256) -> Result<(), TransferError> {
        let mut state = self.state.write().unwrap();
        let balance = state.balances.get(&from).copied().unwrap_or_else(U256::zero);
        if balance < amount {
            return Err(TransferError::InsufficientFunds {
                required: amount,
                available: balance,
            });
        }
        state.balances.insert(from, balance - amount);
        state.total_supply = state.total_supply.saturating_sub(amount);
        Ok(())
    }

    fn move_value(
        state: &mut TokenState,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), TransferError> {
        let from_balance = state.balances.get(&from).copied().unwrap_or_else(U256::zero);
        if from_balance < amount {
            return Err(TransferError::InsufficientFunds {
                required: amount,
                available: from_balance,
            });
        }
        state.balances.insert(from, from_balance - amount);
        let to_balance = state.balances.get(&to).copied().unwrap_or_else(U256::zero);
        // Balances are bounded by total supply which is bounded by the cap,
        // so this add cannot overflow
        state.balances.insert(to, to_balance + amount);
        Ok(())
    }
}

impl TokenTransfer for InMemoryToken {
    fn transfer(&self, from: AccountId, to: AccountId, amount: U256) -> Result<(), TransferError> {
        let mut state = self.state.write().unwrap();
        Self::move_value(&mut state, from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), TransferError> {
        let mut state = self.state.write().unwrap();
        let approved = state
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_else(U256::zero);
        if approved < amount {
            return Err(TransferError::InsufficientAllowance {
                required: amount,
                approved,
            });
        }
        Self::move_value(&mut state, owner, to, amount)?;
        state.allowances.insert((owner, spender), approved - amount);
        Ok(())
    }

    fn mint(&self, to: AccountId, amount: U256) -> Result<(), TransferError> {
        let mut state = self.state.write().unwrap();
        let requested = state
            .total_supply
            .checked_add(amount)
            .ok_or(TransferError::SupplyCapExceeded {
                cap: self.cap,
                requested: U256::MAX,
            })?;
        if requested > self.cap {
            return Err(TransferError::SupplyCapExceeded {
                cap: self.cap,
                requested,
            });
        }
        let balance = state.balances.get(&to).copied().unwrap_or_else(U256::zero);
        state.balances.insert(to, balance + amount);
        state.total_supply = requested;
        Ok(())
    }

    fn balance_of(&self, account: AccountId) -> U256 {
        self.state
            .read()
            .unwrap()
            .balances
            .get(&account)
            .copied()
            .unwrap_or_else(U256::zero)
    }

    fn begin(&self) {
        let snapshot = self.state.read().unwrap().clone();
        *self.checkpoint.write().unwrap() = Some(snapshot);
    }

    fn commit(&self) {
        *self.checkpoint.write().unwrap() = None;
    }

    fn abort(&self) {
        if let Some(snapshot) = self.checkpoint.write().unwrap().take() {
            *self.state.write().unwrap() = snapshot;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
