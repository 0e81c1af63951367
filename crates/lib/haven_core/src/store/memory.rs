//! In-process document store.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{DocumentStore, StoreError};
use crate::uuid::new_document_id;

/// Documents held in a sharded concurrent map, keyed by `(collection, id)`.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: DashMap<(String, String), Value>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.docs.iter().filter(|e| e.key().0 == collection).count()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_document(&self, collection: &str, body: Value) -> Result<String, StoreError> {
        let id = new_document_id();
        self.docs.insert((collection.to_string(), id.clone()), body);
        Ok(id)
    }

    async fn put_document(
        &self,
        collection: &str,
        key: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        self.docs
            .insert((collection.to_string(), key.to_string()), body);
        Ok(())
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .docs
            .get(&(collection.to_string(), key.to_string()))
            .map(|v| v.value().clone()))
    }
}
