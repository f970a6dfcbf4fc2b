//! Key/value document storage.
//!
//! Every collection is kept as one JSON document under a fixed key and is
//! rewritten in full on each change. A byte quota applies to the sum of all
//! stored values.

use crate::db::initialize::init_db;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use std::collections::BTreeMap;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    fn keys(&self) -> AppResult<Vec<String>>;

    /// Replace several documents at once; either all are written or none.
    fn set_all(&mut self, entries: &[(String, String)]) -> AppResult<()>;

    /// Record an audit line. Stores without an audit trail ignore it.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

fn check_quota(key: &str, others: usize, value: usize, quota: usize) -> AppResult<()> {
    let needed = others + value;
    if needed > quota {
        return Err(AppError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}

/// Documents kept in the `storage` table of the application database.
pub struct SqliteKv {
    pool: DbPool,
    quota: usize,
}

impl SqliteKv {
    pub fn open(path: &str, quota: usize) -> AppResult<Self> {
        let pool = crate::db::initialize::open_db(path)?;
        Ok(Self { pool, quota })
    }

    pub fn from_pool(pool: DbPool, quota: usize) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool, quota })
    }

    pub fn into_pool(self) -> DbPool {
        self.pool
    }

    fn used_except(&self, key: &str) -> AppResult<usize> {
        let used: i64 = self.pool.conn.query_row(
            "SELECT IFNULL(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM storage WHERE key <> ?1",
            [key],
            |row| row.get(0),
        )?;
        Ok(used.max(0) as usize)
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM storage WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        check_quota(key, self.used_except(key)?, value.len(), self.quota)?;

        self.pool.conn.execute(
            "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare("SELECT key FROM storage ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn set_all(&mut self, entries: &[(String, String)]) -> AppResult<()> {
        let total: usize = entries.iter().map(|(_, v)| v.len()).sum();
        let replaced: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();

        // bytes held by keys that survive the batch untouched
        let mut untouched = 0usize;
        for k in self.keys()? {
            if !replaced.contains(&k.as_str()) {
                untouched += self.get(&k)?.map(|v| v.len()).unwrap_or(0);
            }
        }
        check_quota("*", untouched, total, self.quota)?;

        let now = Local::now().to_rfc3339();
        let tx = self.pool.conn.transaction()?;
        for (k, v) in entries {
            tx.execute(
                "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![k, v, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        write_log(&self.pool.conn, operation, target, message)
    }
}

/// In-process storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryKv {
    values: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    fn used_except(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        if let Some(quota) = self.quota {
            check_quota(key, self.used_except(key), value.len(), quota)?;
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.values.keys().cloned().collect())
    }

    fn set_all(&mut self, entries: &[(String, String)]) -> AppResult<()> {
        if let Some(quota) = self.quota {
            let mut next = self.values.clone();
            for (k, v) in entries {
                next.insert(k.clone(), v.clone());
            }
            let total: usize = next.values().map(String::len).sum();
            check_quota("*", 0, total, quota)?;
        }
        for (k, v) in entries {
            self.values.insert(k.clone(), v.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_quota_rejects_oversized_write() {
        let mut kv = MemoryKv::with_quota(10);
        kv.set("a", "12345").unwrap();
        // replacing a key does not count its old value
        kv.set("a", "1234567890").unwrap();

        let err = kv.set("b", "x").unwrap_err();
        assert!(matches!(err, AppError::QuotaExceeded { .. }));
        assert_eq!(kv.get("b").unwrap(), None);
    }

    #[test]
    fn sqlite_round_trip_and_quota() {
        let mut kv = SqliteKv::from_pool(DbPool::in_memory().unwrap(), 64).unwrap();
        kv.set("k1", "{\"a\":1}").unwrap();
        kv.set("k1", "{\"a\":2}").unwrap();
        assert_eq!(kv.get("k1").unwrap().as_deref(), Some("{\"a\":2}"));
        assert_eq!(kv.keys().unwrap(), vec!["k1".to_string()]);

        let big = "x".repeat(100);
        assert!(matches!(
            kv.set("k2", &big),
            Err(AppError::QuotaExceeded { .. })
        ));
        assert_eq!(kv.get("k2").unwrap(), None);
    }

    #[test]
    fn set_all_is_all_or_nothing() {
        let mut kv = SqliteKv::from_pool(DbPool::in_memory().unwrap(), 20).unwrap();
        kv.set("a", "1").unwrap();

        let batch = vec![
            ("a".to_string(), "2".to_string()),
            ("b".to_string(), "y".repeat(30)),
        ];
        assert!(kv.set_all(&batch).is_err());
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(kv.get("b").unwrap(), None);
    }
}
