//! # Adapters
//!
//! In-memory implementations of the outbound ports, used by the test suites
//! and as a simulation harness.

pub mod auth;
pub mod clock;
pub mod event_sink;
pub mod token;

pub use auth::StaticAuthorizer;
pub use clock::{ManualClock, SystemClock};
pub use event_sink::RecordingSink;
pub use token::InMemoryToken;
