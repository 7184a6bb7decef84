use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Cake, CakePatch, NewCake};

/// Errors from a cake store operation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Stored document {id} is malformed: {reason}")]
    CorruptDocument { id: i32, reason: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// True when the backend could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Sqlx(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            )
        )
    }
}

/// Document store holding the cakes collection.
///
/// Every method is a single independent operation; implementations only need
/// per-document atomicity.
#[async_trait]
pub trait CakeStore: Send + Sync {
    /// All cakes in store order
    async fn list(&self) -> Result<Vec<Cake>, StoreError>;

    async fn get(&self, id: i32) -> Result<Option<Cake>, StoreError>;

    /// Persist a new cake under a freshly assigned id
    async fn insert(&self, cake: NewCake) -> Result<Cake, StoreError>;

    /// Overwrite the fields present in `patch` in one atomic step and return
    /// the resulting cake, or `None` if no such cake exists.
    async fn patch(&self, id: i32, patch: &CakePatch) -> Result<Option<Cake>, StoreError>;

    /// Returns false if no such cake exists.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Connectivity check used by the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}
