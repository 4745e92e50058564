//! SQLite database layer

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;
use crate::storage::migrations;

use super::{EventKind, EventLog, EventRecord, EventSummary, StateStore};

/// SQLite-backed suggestion state and event log.
///
/// A single connection is shared behind a mutex; cross-process writers are
/// serialized by SQLite itself (WAL + busy timeout).
pub struct Database {
    conn: Mutex<Connection>,
    schema_version: u32,
}

impl Database {
    /// Open database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        Self::configure_pragmas(&conn)?;
        let schema_version = migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            schema_version,
        })
    }

    /// Current schema version after migrations.
    pub const fn schema_version(&self) -> u32 {
        self.schema_version
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA temp_store = MEMORY;",
        )?;
        Ok(())
    }
}

impl StateStore for Database {
    fn is_dismissed(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let flag: Option<bool> = conn
            .query_row(
                "SELECT is_dismissed FROM dismiss_state WHERE suggestion_id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(flag.unwrap_or(false))
    }

    fn set_dismissed(&self, id: &str, dismissed: bool) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO dismiss_state (suggestion_id, is_dismissed) VALUES (?1, ?2)
             ON CONFLICT(suggestion_id) DO UPDATE SET is_dismissed = excluded.is_dismissed",
            params![id, dismissed],
        )?;
        Ok(())
    }

    fn setup_time(&self, key: &str) -> Result<Option<i64>> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                "SELECT first_seen_ms FROM setup_times WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn setup_time_or_insert(&self, key: &str, now_millis: i64) -> Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR IGNORE INTO setup_times (key, first_seen_ms) VALUES (?1, ?2)",
            params![key, now_millis],
        )?;
        let stored = conn.query_row(
            "SELECT first_seen_ms FROM setup_times WHERE key = ?1",
            [key],
            |row| row.get(0),
        )?;
        Ok(stored)
    }
}

impl EventLog for Database {
    fn append(&self, id: &str, kind: EventKind, timestamp_millis: i64) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO suggestion_events (suggestion_id, kind, timestamp_ms) VALUES (?1, ?2, ?3)",
            params![id, kind.as_str(), timestamp_millis],
        )?;
        Ok(())
    }

    fn history(&self, id: &str) -> Result<Vec<EventRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT kind, timestamp_ms FROM suggestion_events
             WHERE suggestion_id = ?1 ORDER BY seq ASC",
        )?;
        let rows = stmt.query_map([id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (kind, timestamp_millis) = row?;
            records.push(EventRecord {
                kind: kind.parse()?,
                timestamp_millis,
            });
        }
        Ok(records)
    }

    fn summary(&self, id: &str) -> Result<EventSummary> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT kind, COUNT(*), MAX(timestamp_ms) FROM suggestion_events
             WHERE suggestion_id = ?1 GROUP BY kind",
        )?;
        let rows = stmt.query_map([id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<i64>>(2)?,
            ))
        })?;

        let mut summary = EventSummary::default();
        for row in rows {
            let (kind, count, last) = row?;
            let count = u64::try_from(count).unwrap_or(0);
            summary.observe(kind.parse()?, count, last);
        }
        Ok(summary)
    }
}
