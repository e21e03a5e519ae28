//! Case collection snapshot.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{get_json, put_json, DbError, DbPool, DbResult};

/// Key holding the whole case collection.
pub const SNAPSHOT_KEY: &str = "case-management-storage";

/// Current envelope version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted envelope around the case collection.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    cases: Vec<T>,
}

/// Borrowing twin of [`Envelope`] so saving does not clone the collection.
#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    cases: &'a [T],
}

/// Load the persisted collection. A missing snapshot is an empty collection.
pub fn load_cases<T: DeserializeOwned>(pool: &DbPool) -> DbResult<Vec<T>> {
    let Some(envelope) = get_json::<Envelope<T>>(pool, SNAPSHOT_KEY)? else {
        debug!("No snapshot stored, starting empty");
        return Ok(Vec::new());
    };

    if envelope.version > SNAPSHOT_VERSION {
        return Err(DbError::Corrupt {
            key: SNAPSHOT_KEY.to_string(),
            reason: format!(
                "snapshot version {} is newer than supported version {}",
                envelope.version, SNAPSHOT_VERSION
            ),
        });
    }

    debug!(count = envelope.cases.len(), "Snapshot loaded");
    Ok(envelope.cases)
}

/// Replace the persisted collection.
pub fn save_cases<T: Serialize>(pool: &DbPool, cases: &[T]) -> DbResult<()> {
    put_json(
        pool,
        SNAPSHOT_KEY,
        &EnvelopeRef {
            version: SNAPSHOT_VERSION,
            cases,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::in_memory;

    #[test]
    fn test_missing_snapshot_is_empty() {
        let pool = in_memory();
        let cases: Vec<String> = load_cases(&pool).unwrap();
        assert!(cases.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let pool = in_memory();
        save_cases(&pool, &["a".to_string(), "b".to_string()]).unwrap();
        let cases: Vec<String> = load_cases(&pool).unwrap();
        assert_eq!(cases, vec!["a", "b"]);

        let raw = pool.get(SNAPSHOT_KEY).unwrap().unwrap();
        assert!(raw.contains("\"version\":1"));
    }

    #[test]
    fn test_rejects_future_version() {
        let pool = in_memory();
        pool.put(SNAPSHOT_KEY, r#"{"version":99,"cases":[]}"#).unwrap();
        let err = load_cases::<String>(&pool).unwrap_err();
        assert!(matches!(err, DbError::Corrupt { .. }));
    }
}
