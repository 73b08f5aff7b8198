//! In-memory storage

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::PersistenceAdapter;
use crate::Result;

/// Key-value map living as long as the value itself
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceAdapter for MemoryStorage {
    async fn save(&self, collection: &str, serialized: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(collection.to_string(), serialized.to_string());
        Ok(())
    }

    async fn load(&self, collection: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(collection).cloned())
    }
}
