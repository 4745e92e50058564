//! Schema migrations, tracked with `PRAGMA user_version`.

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: u32 = 2;

const MIGRATIONS: &[&str] = &[
    // 1: dismiss flags, setup times, event log
    "CREATE TABLE IF NOT EXISTS dismiss_state (
         suggestion_id TEXT PRIMARY KEY,
         is_dismissed INTEGER NOT NULL DEFAULT 0
     );
     CREATE TABLE IF NOT EXISTS setup_times (
         key TEXT PRIMARY KEY,
         first_seen_ms INTEGER NOT NULL
     );
     CREATE TABLE IF NOT EXISTS suggestion_events (
         seq INTEGER PRIMARY KEY AUTOINCREMENT,
         suggestion_id TEXT NOT NULL,
         kind TEXT NOT NULL CHECK (kind IN ('shown', 'dismissed', 'clicked')),
         timestamp_ms INTEGER NOT NULL
     );",
    // 2: per-id lookups on the event log
    "CREATE INDEX IF NOT EXISTS idx_suggestion_events_id_kind
         ON suggestion_events (suggestion_id, kind, timestamp_ms);",
];

/// Apply pending migrations and return the resulting schema version.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    for (index, sql) in MIGRATIONS.iter().enumerate() {
        let version = u32::try_from(index + 1).unwrap_or(u32::MAX);
        if version <= current {
            continue;
        }
        tracing::debug!(version, "applying migration");
        conn.execute_batch(&format!(
            "BEGIN;\n{sql}\nPRAGMA user_version = {version};\nCOMMIT;"
        ))?;
    }
    Ok(current.max(SCHEMA_VERSION))
}
