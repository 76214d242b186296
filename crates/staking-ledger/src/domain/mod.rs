//! # Domain Layer
//!
//! Pure business logic for the staking and reward ledgers: value objects,
//! entities, the shared device-balance ledger, both engines, and checkable
//! invariants. Nothing here touches a transport or a database.

pub mod entities;
pub mod invariants;
pub mod ledger;
pub mod reward;
pub mod staking;
pub mod value_objects;
