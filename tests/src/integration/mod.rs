//! Cross-engine integration flows against the full [`LedgerService`].
//!
//! [`LedgerService`]: staking_ledger::service::LedgerService

pub mod fixtures;
mod reward_flows;
mod staking_flows;
