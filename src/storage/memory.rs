//! In-process store used by tests and ephemeral runs.

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};

use crate::error::Result;

use super::{EventKind, EventLog, EventRecord, StateStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    dismissed: RwLock<HashMap<String, bool>>,
    setup_times: Mutex<HashMap<String, i64>>,
    events: Mutex<HashMap<String, Vec<EventRecord>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn is_dismissed(&self, id: &str) -> Result<bool> {
        Ok(self.dismissed.read().get(id).copied().unwrap_or(false))
    }

    fn set_dismissed(&self, id: &str, dismissed: bool) -> Result<()> {
        self.dismissed.write().insert(id.to_string(), dismissed);
        Ok(())
    }

    fn setup_time(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.setup_times.lock().get(key).copied())
    }

    fn setup_time_or_insert(&self, key: &str, now_millis: i64) -> Result<i64> {
        Ok(*self
            .setup_times
            .lock()
            .entry(key.to_string())
            .or_insert(now_millis))
    }
}

impl EventLog for MemoryStore {
    fn append(&self, id: &str, kind: EventKind, timestamp_millis: i64) -> Result<()> {
        self.events
            .lock()
            .entry(id.to_string())
            .or_default()
            .push(EventRecord {
                kind,
                timestamp_millis,
            });
        Ok(())
    }

    fn history(&self, id: &str) -> Result<Vec<EventRecord>> {
        Ok(self.events.lock().get(id).cloned().unwrap_or_default())
    }
}
