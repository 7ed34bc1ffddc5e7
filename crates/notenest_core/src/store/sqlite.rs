//! SQLite-backed blob store.
//!
//! # Invariants
//! - One row per key in `kv_blobs`; writes are upserts.
//! - `updated_at` holds the epoch-millisecond time of the last write.

use super::{BlobStore, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Blob store persisted in a migrated SQLite database.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Opens (or creates) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Epoch-millisecond time of the last write to `key`.
    pub fn updated_at(&self, key: &str) -> StoreResult<Option<i64>> {
        let value = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_blobs WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_blobs WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_blobs (key, value, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteBlobStore;
    use crate::store::BlobStore;

    #[test]
    fn upsert_keeps_one_row_per_key() {
        let mut store = SqliteBlobStore::open_in_memory().unwrap();
        assert_eq!(store.get("notes").unwrap(), None);

        store.set("notes", "[]").unwrap();
        store.set("notes", "[1]").unwrap();

        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[1]"));
        assert!(store.updated_at("notes").unwrap().is_some());
        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM kv_blobs;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
