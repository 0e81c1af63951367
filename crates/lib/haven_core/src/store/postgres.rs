//! PostgreSQL document store.
//!
//! All collections share the `documents` table created by the embedded
//! migrations in `haven_core/migrations/`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use tracing::info;

use super::{DocumentStore, StoreError};
use crate::uuid::new_document_id;

/// Documents stored as JSONB rows keyed by `(collection, id)`.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Connect, run migrations, and return a ready store.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;

        info!("running database migrations");
        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    /// Run all embedded migrations against `pool`.
    pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create_document(&self, collection: &str, body: Value) -> Result<String, StoreError> {
        let id = new_document_id();
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(body))
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn put_document(
        &self,
        collection: &str,
        key: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET body = EXCLUDED.body, updated_at = now()
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(Json(body))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT body FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|Json(v)| v))
    }
}
