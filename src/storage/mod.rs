//! Storage layer for nudge
//!
//! Two logical stores back the suggestion pipeline:
//! - [`StateStore`]: per-id dismissed flags and write-once setup times.
//! - [`EventLog`]: an append-only, per-id log of interaction events.
//!
//! Both are implemented by the SQLite [`Database`] and by the in-process
//! [`MemoryStore`]. Implementations must tolerate concurrent readers and
//! writers; the dismissed flag is last-write-wins, while appends to the event
//! log are never lost or duplicated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NudgeError, Result};

pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::Database;

/// Persisted per-id suggestion state.
pub trait StateStore: Send + Sync {
    /// Whether `id` is currently dismissed. Missing records read as `false`.
    fn is_dismissed(&self, id: &str) -> Result<bool>;

    /// Set or clear the dismissed flag, creating the record if needed.
    fn set_dismissed(&self, id: &str, dismissed: bool) -> Result<()>;

    /// First-seen time recorded for `key`, if any.
    fn setup_time(&self, key: &str) -> Result<Option<i64>>;

    /// Record `now_millis` as the first-seen time for `key` unless one is
    /// already stored, and return whichever value is stored afterwards.
    fn setup_time_or_insert(&self, key: &str, now_millis: i64) -> Result<i64>;
}

/// Append-only interaction log keyed by suggestion id.
pub trait EventLog: Send + Sync {
    fn append(&self, id: &str, kind: EventKind, timestamp_millis: i64) -> Result<()>;

    /// Full history for `id`, oldest first.
    fn history(&self, id: &str) -> Result<Vec<EventRecord>>;

    /// Per-kind count and most recent timestamp for `id`.
    fn summary(&self, id: &str) -> Result<EventSummary> {
        Ok(EventSummary::from_records(&self.history(id)?))
    }
}

/// Kind of user interaction with a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Shown,
    Dismissed,
    Clicked,
}

impl EventKind {
    pub const ALL: [Self; 3] = [Self::Shown, Self::Dismissed, Self::Clicked];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shown => "shown",
            Self::Dismissed => "dismissed",
            Self::Clicked => "clicked",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = NudgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "shown" => Ok(Self::Shown),
            "dismissed" => Ok(Self::Dismissed),
            "clicked" => Ok(Self::Clicked),
            other => Err(NudgeError::Serialization(format!(
                "unknown event kind {other} (expected shown|dismissed|clicked)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: EventKind,
    pub timestamp_millis: i64,
}

/// Aggregate of one event kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSummary {
    pub count: u64,
    pub last_millis: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub shown: KindSummary,
    pub dismissed: KindSummary,
    pub clicked: KindSummary,
}

impl EventSummary {
    #[must_use]
    pub fn from_records(records: &[EventRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.observe(record.kind, 1, Some(record.timestamp_millis));
        }
        summary
    }

    #[must_use]
    pub const fn kind(&self, kind: EventKind) -> &KindSummary {
        match kind {
            EventKind::Shown => &self.shown,
            EventKind::Dismissed => &self.dismissed,
            EventKind::Clicked => &self.clicked,
        }
    }

    /// Fold `count` events of `kind`, the latest at `last_millis`, into the summary.
    pub fn observe(&mut self, kind: EventKind, count: u64, last_millis: Option<i64>) {
        let entry = match kind {
            EventKind::Shown => &mut self.shown,
            EventKind::Dismissed => &mut self.dismissed,
            EventKind::Clicked => &mut self.clicked,
        };
        entry.count += count;
        entry.last_millis = match (entry.last_millis, last_millis) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }
}
