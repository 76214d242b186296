//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the engines depend on. External adapters implement these traits
//! to provide:
//! - Fungible-token value transfer (opaque capped/burnable token ledger)
//! - Capability-based authorization
//! - A monotonic clock
//! - Notification delivery
//!
//! Dependencies point INWARD: adapters implement these traits, the engines
//! never see concrete collaborator types.

use crate::domain::value_objects::{AccountId, Capability, Timestamp, U256};
use crate::errors::TransferError;
use crate::events::Notification;

// =============================================================================
// TOKEN TRANSFER
// =============================================================================

/// Interface to the external fungible-token ledger.
///
/// The token is treated as an opaque value-transfer service. Every method
/// must be atomic: on failure, no balance may have changed.
///
/// ## Operation-scoped atomicity
///
/// The service brackets each top-level engine operation with
/// [`begin`](TokenTransfer::begin) / [`commit`](TokenTransfer::commit) /
/// [`abort`](TokenTransfer::abort). An environment that is transactional on
/// its own (e.g. a chain runtime that reverts the whole call) may leave the
/// default no-op hooks; the in-memory adapter uses them to undo transfers
/// performed before a later sub-call failed, so that a failed operation
/// leaves no partial effect anywhere.
pub trait TokenTransfer: Send + Sync {
    /// Moves `amount` from `from` to `to`.
    ///
    /// `from` is an account the caller controls (an engine's custody account).
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] and changes nothing on failure.
    fn transfer(&self, from: AccountId, to: AccountId, amount: U256) -> Result<(), TransferError>;

    /// Moves `amount` from `owner` to `to`, spending `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] and changes nothing on failure.
    fn transfer_from(
        &self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), TransferError>;

    /// Mints `amount` to `to`. Used only by the token's own administration,
    /// never by the engines.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::SupplyCapExceeded`] past the cap.
    fn mint(&self, to: AccountId, amount: U256) -> Result<(), TransferError>;

    /// Current balance of `account`.
    fn balance_of(&self, account: AccountId) -> U256;

    /// Marks the start of an engine operation.
    fn begin(&self) {}

    /// Retains all transfers performed since [`begin`](TokenTransfer::begin).
    fn commit(&self) {}

    /// Undoes all transfers performed since [`begin`](TokenTransfer::begin).
    fn abort(&self) {}
}

// =============================================================================
// AUTHORIZATION GATE
// =============================================================================

/// Capability check consulted before a privileged operation body runs.
///
/// Denial prevents any state mutation.
pub trait AuthorizationGate: Send + Sync {
    /// Returns true if `caller` holds `capability`.
    fn allows(&self, caller: AccountId, capability: Capability) -> bool;
}

// =============================================================================
// CLOCK
// =============================================================================

/// Monotonic clock supplied by the execution environment.
///
/// Time-lock expiry is checked lazily against this clock at `withdraw()`
/// call time; there are no timers and no background processing.
pub trait Clock: Send + Sync {
    /// Current time as unix seconds.
    fn now(&self) -> Timestamp;
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Delivery channel for notifications.
///
/// The service buffers notifications during an operation and publishes them
/// here only after the operation commits.
pub trait EventSink: Send + Sync {
    /// Delivers one notification.
    fn publish(&self, event: Notification);
}

// =============================================================================
// TESTS
// =============================================================================
