//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Everything else works on an in-memory `Roster` and hands it back here
//! to be saved.

use crate::error::GapResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

mod roster;

pub use roster::{decode_roster, ROSTER_KEY};

pub struct RosterStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl RosterStore {
    pub fn open(path: &str) -> GapResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::debug!("Opened roster store at {path}");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GapResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, path: None })
    }

    /// Open and migrate in one step.
    pub fn open_migrated(path: &str) -> GapResult<Self> {
        let store = if path == ":memory:" {
            Self::in_memory()?
        } else {
            Self::open(path)?
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GapResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_roster.sql"))?;
        Ok(())
    }

    // ── Key-value ──────────────────────────────────────────────

    pub fn get_value(&self, key: &str) -> GapResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Replace the value under `key`. A single statement, so readers see
    /// either the old value or the new one.
    pub fn put_value(&self, key: &str, value: &str) -> GapResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, saved_at = excluded.saved_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// When `key` was last written. `None` if never written or unparseable.
    pub fn saved_at(&self, key: &str) -> GapResult<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT saved_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(raw
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|d| d.with_timezone(&Utc)))
    }
}
