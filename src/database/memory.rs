use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::{Cake, CakePatch, NewCake};
use crate::database::store::{CakeStore, StoreError};

/// In-process cakes collection. Selected with a `memory://` connection string
/// and used by the test suite.
#[derive(Debug, Default)]
pub struct MemoryCakeStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cakes: BTreeMap<i32, NewCake>,
    last_id: i32,
}

impl MemoryCakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.cakes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CakeStore for MemoryCakeStore {
    async fn list(&self) -> Result<Vec<Cake>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .cakes
            .iter()
            .map(|(id, doc)| Cake::from_document(*id, doc.clone()))
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Cake>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .cakes
            .get(&id)
            .map(|doc| Cake::from_document(id, doc.clone())))
    }

    async fn insert(&self, cake: NewCake) -> Result<Cake, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::QueryError("cake id space exhausted".to_string()))?;
        inner.last_id = id;
        inner.cakes.insert(id, cake.clone());
        Ok(Cake::from_document(id, cake))
    }

    async fn patch(&self, id: i32, patch: &CakePatch) -> Result<Option<Cake>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.cakes.get_mut(&id).map(|doc| {
            patch.apply(doc);
            Cake::from_document(id, doc.clone())
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.cakes.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
