//! Key-value store abstraction and pool construction.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::file::FileStore;
use crate::memory::MemoryStore;

/// Storage error types.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Corrupt value under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;

/// A durable map from string keys to raw JSON text.
///
/// Implementations must make `put` atomic per key: a reader sees either the
/// old value or the new one, never a partial write.
pub trait KvStore: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn put(&self, key: &str, value: &str) -> DbResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> DbResult<()>;
}

/// Shared handle to a key-value store. Cheap to clone.
pub type DbPool = Arc<dyn KvStore>;

/// Open the file-backed store rooted at `dir`, creating the directory if needed.
pub fn init_pool(dir: &Path) -> DbResult<DbPool> {
    let store = FileStore::open(dir)?;
    Ok(Arc::new(store))
}

/// Create an empty in-memory store.
pub fn in_memory() -> DbPool {
    Arc::new(MemoryStore::default())
}

/// Read and deserialize the JSON document under `key`.
pub fn get_json<T: DeserializeOwned>(pool: &DbPool, key: &str) -> DbResult<Option<T>> {
    match pool.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| DbError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`.
pub fn put_json<T: Serialize + ?Sized>(pool: &DbPool, key: &str, value: &T) -> DbResult<()> {
    let json = serde_json::to_string(value)?;
    pool.put(key, &json)
}

/// Keys are used as file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> DbResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("case-management-storage").is_ok());
        assert!(validate_key("zapier_webhook_url").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_json_helpers() {
        let pool = in_memory();
        put_json(&pool, "numbers", &vec![1, 2, 3]).unwrap();
        let back: Option<Vec<i32>> = get_json(&pool, "numbers").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));

        let missing: Option<Vec<i32>> = get_json(&pool, "absent").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_corrupt_value() {
        let pool = in_memory();
        pool.put("numbers", "not json").unwrap();
        let err = get_json::<Vec<i32>>(&pool, "numbers").unwrap_err();
        assert!(matches!(err, DbError::Corrupt { .. }));
    }
}
