//! # Error Types
//!
//! All error types for the staking and reward engines.
//!
//! Every error aborts the entire enclosing operation with zero surviving
//! state mutation. There is no partial commit and no local recovery; callers
//! decide whether to resubmit.

use crate::domain::value_objects::{Capability, Timestamp, U256};
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors surfaced by the staking and reward engine entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Zero or otherwise disallowed amount.
    #[error("invalid amount: must be greater than zero")]
    InvalidAmount,

    /// Reinvestment percentage above 100.
    #[error("invalid percentage: {0} > 100")]
    InvalidPercentage(u8),

    /// Zero/null address where a real address is required.
    #[error("invalid address: zero address not allowed")]
    InvalidAddress,

    /// A withdrawal request is already pending for this account.
    #[error("withdrawal request already pending")]
    AlreadyPending,

    /// No live withdrawal request for this account.
    #[error("no withdrawal request found")]
    NoRequestFound,

    /// The request's release time has not been reached yet.
    #[error("waiting period not over: now {now} < release {release_time}")]
    WaitingPeriodNotOver {
        /// Clock reading at the time of the call.
        now: Timestamp,
        /// Release time of the pending request.
        release_time: Timestamp,
    },

    /// Swept balances summed to zero.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The caller lacks the required capability.
    #[error("unauthorized: caller lacks {0:?} capability")]
    Unauthorized(Capability),

    /// The system is paused; only admin configuration may run.
    #[error("system is paused")]
    SystemPaused,

    /// The token collaborator declined the transfer.
    #[error("token transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    /// Balance arithmetic would exceed the representable range.
    ///
    /// Treated as a programming-invariant violation rather than a user input
    /// error: the token supply cap keeps realistic operation far below U256,
    /// but the engines still check every addition explicitly.
    #[error("arithmetic overflow in balance accounting")]
    Overflow,

    /// A mutating entry point was re-entered while another was in progress.
    #[error("reentrant call rejected")]
    ReentrantCall,
}

// =============================================================================
// TRANSFER ERRORS
// =============================================================================

/// Errors from the external token-transfer collaborator.
///
/// The collaborator must be atomic: on any of these, no balance changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Sender balance too low.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount the transfer needed.
        required: U256,
        /// Balance actually available.
        available: U256,
    },

    /// Spender allowance too low for a `transfer_from`.
    #[error("insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance {
        /// Amount the transfer needed.
        required: U256,
        /// Allowance actually approved.
        approved: U256,
    },

    /// Minting would exceed the token's supply cap.
    #[error("supply cap exceeded: cap {cap}, requested total {requested}")]
    SupplyCapExceeded {
        /// The hard supply cap.
        cap: U256,
        /// Total supply the mint would have produced.
        requested: U256,
    },

    /// The collaborator declined for a reason of its own.
    #[error("transfer declined: {0}")]
    Declined(String),
}

// =============================================================================
// TESTS
// =============================================================================
