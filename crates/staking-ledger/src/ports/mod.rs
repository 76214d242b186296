//! # Ports
//!
//! Hexagonal architecture ports for the staking and reward engines.
//!
//! - `inbound`: the operation surface the engines offer to callers.
//! - `outbound`: collaborator interfaces the engines depend on (token
//!   transfer, authorization, clock, event sink).

pub mod inbound;
pub mod outbound;
