//! Persistence seam
//!
//! Stores hand their full collection, serialized as a JSON array, to a
//! [`PersistenceAdapter`] after every mutation and read it back once when
//! they are opened.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::Result;

/// Key-value medium holding one serialized collection per key
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Replace the stored value for `collection`
    async fn save(&self, collection: &str, serialized: &str) -> Result<()>;

    /// Fetch the stored value for `collection`, `None` if nothing was saved
    async fn load(&self, collection: &str) -> Result<Option<String>>;
}

/// Load and decode a collection.
///
/// A missing key yields an empty collection. So does a value that fails to
/// decode: the condition is logged and the store starts over.
pub async fn load_collection<T: DeserializeOwned>(
    storage: &dyn PersistenceAdapter,
    collection: &str,
) -> Result<Vec<T>> {
    let Some(raw) = storage.load(collection).await? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(err) => {
            warn!(
                "Discarding unreadable '{}' collection, starting empty: {}",
                collection, err
            );
            Ok(Vec::new())
        }
    }
}

/// Encode a collection and hand it to the adapter
pub async fn save_collection<T: Serialize + Sync>(
    storage: &dyn PersistenceAdapter,
    collection: &str,
    items: &[T],
) -> Result<()> {
    let serialized = serde_json::to_string_pretty(items)?;
    storage.save(collection, &serialized).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: u64,
        label: String,
    }

    #[tokio::test]
    async fn test_missing_collection_loads_empty() {
        let storage = MemoryStorage::new();
        let records: Vec<Record> = load_collection(&storage, "records").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_loads_empty() {
        let storage = MemoryStorage::new();
        storage.save("records", "{ not json").await.unwrap();

        let records: Vec<Record> = load_collection(&storage, "records").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_saved_collection_loads_in_order() {
        let storage = MemoryStorage::new();
        let records = vec![
            Record { id: 2, label: "second".into() },
            Record { id: 1, label: "first".into() },
        ];
        save_collection(&storage, "records", &records).await.unwrap();

        let loaded: Vec<Record> = load_collection(&storage, "records").await.unwrap();
        assert_eq!(loaded, records);
    }
}
