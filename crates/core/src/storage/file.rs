//! File-based storage
//!
//! Keeps each collection as `<collection>.json` under a root directory.

use async_trait::async_trait;
use std::path::PathBuf;

use super::PersistenceAdapter;
use crate::{Error, Result};

/// Directory of JSON files, one per collection
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a FileStorage rooted at `root`
    ///
    /// The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File backing `collection`
    pub fn path_for(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }
}

#[async_trait]
impl PersistenceAdapter for FileStorage {
    async fn save(&self, collection: &str, serialized: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.path_for(collection);
        tokio::fs::write(&path, serialized).await.map_err(|e| {
            Error::Storage(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    async fn load(&self, collection: &str) -> Result<Option<String>> {
        let path = self.path_for(collection);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
