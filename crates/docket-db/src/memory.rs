//! In-memory key-value store, used by tests and dry runs.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::client::{validate_key, DbError, DbResult, KvStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        validate_key(key)?;
        let entries = self.entries.lock().map_err(|_| DbError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> DbResult<()> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| DbError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| DbError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
