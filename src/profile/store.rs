use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{params, OptionalExtension};

use crate::state::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

/// String key/value storage scoped to the portal.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Key under which a user's uploaded photo is kept.
pub fn photo_key(username: &str) -> String {
    format!("profile_photo_{}", username)
}

/// Store backed by the `kv_entries` table.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: DbPool,
}

impl SqliteKvStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave a HashMap half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn sqlite_store() -> SqliteKvStore {
        let pool = db::memory_pool().unwrap();
        db::run_migrations(&pool).unwrap();
        SqliteKvStore::new(pool)
    }

    #[test]
    fn photo_key_is_prefixed_username() {
        assert_eq!(photo_key("stu1"), "profile_photo_stu1");
    }

    #[test]
    fn sqlite_store_get_missing_is_none() {
        let store = sqlite_store();
        assert_eq!(store.get("profile_photo_nobody").unwrap(), None);
    }

    #[test]
    fn sqlite_store_set_overwrites() {
        let store = sqlite_store();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));

        let conn = store.pool.get().unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_entries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn memory_store_keeps_keys_apart() {
        let store = MemoryKvStore::new();
        store.set(&photo_key("a"), "photo-a").unwrap();
        store.set(&photo_key("b"), "photo-b").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("profile_photo_a").unwrap().as_deref(), Some("photo-a"));
        assert_eq!(store.get("profile_photo_b").unwrap().as_deref(), Some("photo-b"));
    }
}
