//! Timestamped interaction log on top of an [`EventLog`] backend.

use std::sync::Arc;

use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;
use crate::storage::{EventKind, EventLog, EventRecord, EventSummary};

#[derive(Clone)]
pub struct EventStore {
    log: Arc<dyn EventLog>,
    clock: Arc<dyn Clock>,
}

impl EventStore {
    #[must_use]
    pub fn new(log: Arc<dyn EventLog>, clock: Arc<dyn Clock>) -> Self {
        Self { log, clock }
    }

    /// Append `kind` for `id`, stamped with the current time.
    pub fn write_event(&self, id: &str, kind: EventKind) -> Result<()> {
        let now = self.clock.now_millis();
        debug!(id, kind = %kind, timestamp = now, "event");
        self.log.append(id, kind, now)
    }

    /// Every event recorded for `id`, oldest first.
    pub fn read_history(&self, id: &str) -> Result<Vec<EventRecord>> {
        self.log.history(id)
    }

    /// Per-kind count and latest timestamp for `id`.
    pub fn read_summary(&self, id: &str) -> Result<EventSummary> {
        self.log.summary(id)
    }

    #[must_use]
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }
}
