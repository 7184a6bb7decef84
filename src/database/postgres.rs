use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use tracing::info;

use crate::database::models::{Cake, CakePatch, NewCake};
use crate::database::store::{CakeStore, StoreError};

/// Cakes collection kept as JSONB documents keyed by a serial id
#[derive(Debug, Clone)]
pub struct PgCakeStore {
    pool: PgPool,
}

impl PgCakeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the collection table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS cakes (\
                id SERIAL PRIMARY KEY, \
                doc JSONB NOT NULL\
            )",
        )
        .execute(&self.pool)
        .await?;

        info!("Ensured cakes collection table");
        Ok(())
    }

    fn row_to_cake(row: &PgRow) -> Result<Cake, StoreError> {
        let id: i32 = row.try_get("id")?;
        let doc: Value = row.try_get("doc")?;
        let doc: NewCake = serde_json::from_value(doc).map_err(|e| StoreError::CorruptDocument {
            id,
            reason: e.to_string(),
        })?;
        Ok(Cake::from_document(id, doc))
    }
}

#[async_trait]
impl CakeStore for PgCakeStore {
    async fn list(&self) -> Result<Vec<Cake>, StoreError> {
        let rows = sqlx::query("SELECT id, doc FROM cakes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_cake).collect()
    }

    async fn get(&self, id: i32) -> Result<Option<Cake>, StoreError> {
        let row = sqlx::query("SELECT id, doc FROM cakes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_cake).transpose()
    }

    async fn insert(&self, cake: NewCake) -> Result<Cake, StoreError> {
        let id: i32 = sqlx::query_scalar("INSERT INTO cakes (doc) VALUES ($1) RETURNING id")
            .bind(Json(&cake))
            .fetch_one(&self.pool)
            .await?;

        Ok(Cake::from_document(id, cake))
    }

    async fn patch(&self, id: i32, patch: &CakePatch) -> Result<Option<Cake>, StoreError> {
        // jsonb || overwrites present keys, explicit nulls included
        let row = sqlx::query("UPDATE cakes SET doc = doc || $2 WHERE id = $1 RETURNING id, doc")
            .bind(id)
            .bind(Json(patch.to_document()))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_cake).transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cakes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
