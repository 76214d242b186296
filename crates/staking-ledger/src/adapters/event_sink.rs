//! # Recording Event Sink
//!
//! Buffers published notifications for later assertion. The test suites use
//! it to verify emission shapes; a deployment would adapt its real event
//! transport behind the same port.

use crate::events::Notification;
use crate::ports::outbound::EventSink;
use std::sync::RwLock;

/// Sink that appends every published notification to an in-memory log.
#[derive(Debug, Default)]
pub struct RecordingSink {
    log: RwLock<Vec<Notification>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    #[must_use]
    pub fn events(&self) -> Vec<Notification> {
        self.log.read().unwrap().clone()
    }

    /// Drains and returns everything published so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.log.write().unwrap())
    }

    /// Number of notifications published so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.read().unwrap().len()
    }

    /// Returns true if nothing was published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.read().unwrap().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: Notification) {
        self.log.write().unwrap().push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
