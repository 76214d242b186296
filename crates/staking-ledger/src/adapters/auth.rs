//! # Static Authorizer Adapter
//!
//! In-memory capability grants. Production deployments would adapt their
//! role-management system behind the same port.

use crate::domain::value_objects::{AccountId, Capability};
use crate::ports::outbound::AuthorizationGate;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Capability → account-set grant table.
#[derive(Debug, Default)]
pub struct StaticAuthorizer {
    grants: RwLock<HashMap<Capability, HashSet<AccountId>>>,
}

impl StaticAuthorizer {
    /// Creates an authorizer with no grants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `capability` to `account`.
    pub fn grant(&self, account: AccountId, capability: Capability) {
        self.grants
            .write()
            .unwrap()
            .entry(capability)
            .or_default()
            .insert(account);
    }

    /// Revokes `capability` from `account`.
    pub fn revoke(&self, account: AccountId, capability: Capability) {
        if let Some(holders) = self.grants.write().unwrap().get_mut(&capability) {
            holders.remove(&account);
        }
    }
}

impl AuthorizationGate for StaticAuthorizer {
    fn allows(&self, caller: AccountId, capability: Capability) -> bool {
        self.grants
            .read()
            .unwrap()
            .get(&capability)
            .is_some_and(|holders| holders.contains(&caller))
    }
}

// =============================================================================
// TESTS
// =============================================================================
