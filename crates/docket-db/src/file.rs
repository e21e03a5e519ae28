//! File-backed key-value store.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::client::{validate_key, DbResult, KvStore};

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating it if it does not exist.
    pub fn open(dir: &Path) -> DbResult<Self> {
        fs::create_dir_all(dir)?;
        debug!(dir = %dir.display(), "FileStore opened");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Directory holding the key files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> DbResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let path = self.path_for(key)?;
        // Write to a sibling temp file and rename over the target.
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.sync_all()?;
        fs::rename(&tmp, &path)?;
        debug!(key = %key, bytes = value.len(), "Value written");
        Ok(())
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DbError;

    #[test]
    fn test_put_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("settings").unwrap(), None);

        store.put("settings", "{\"a\":1}").unwrap();
        assert_eq!(store.get("settings").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("settings.json").exists());
        assert!(!dir.path().join("settings.json.tmp").exists());

        store.put("settings", "{\"a\":2}").unwrap();
        assert_eq!(store.get("settings").unwrap().as_deref(), Some("{\"a\":2}"));

        store.remove("settings").unwrap();
        assert_eq!(store.get("settings").unwrap(), None);
        store.remove("settings").unwrap();
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        store.put("k", "1").unwrap();
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let err = store.put("../outside", "1").unwrap_err();
        assert!(matches!(err, DbError::InvalidKey(_)));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.put("persisted", "[1,2]").unwrap();
        }
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("persisted").unwrap().as_deref(), Some("[1,2]"));
    }
}
