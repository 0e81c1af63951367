// @awa-component: DOC-DocumentStore
//
//! Document store — the external collection/document persistence seam.
//!
//! Inquiries and reservations are created as new documents; the room
//! availability snapshot is read by key. Two backends:
//!
//! - [`memory::MemoryDocumentStore`] — process-local, used when no database
//!   is configured and in tests
//! - [`postgres::PgDocumentStore`] — a single JSONB `documents` table

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Seed error: {0}")]
    Seed(String),
}

/// Collection/document persistence.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store `body` under a freshly generated id and return the id.
    async fn create_document(&self, collection: &str, body: Value) -> Result<String, StoreError>;

    /// Insert or replace the document at `key`.
    async fn put_document(&self, collection: &str, key: &str, body: Value)
    -> Result<(), StoreError>;

    /// Read the document at `key`.
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;
}
