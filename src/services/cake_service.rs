use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::database::models::{Cake, CakeError, CakePatch, NewCake};
use crate::database::{CakeStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CakeServiceError {
    #[error("Cake {0} not found")]
    NotFound(i32),
    #[error(transparent)]
    Invalid(#[from] CakeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Cake operations on top of an injected store. Holds no state of its own.
#[derive(Clone)]
pub struct CakeService {
    store: Arc<dyn CakeStore>,
}

impl CakeService {
    pub fn new(store: Arc<dyn CakeStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Cake>, CakeServiceError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i32) -> Result<Cake, CakeServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(CakeServiceError::NotFound(id))
    }

    /// Validate a create payload and persist it under a new id.
    /// Nothing is written when validation fails.
    pub async fn add(&self, payload: Value) -> Result<Cake, CakeServiceError> {
        let new_cake = NewCake::from_json(payload)?;
        let cake = self.store.insert(new_cake).await?;

        info!(cake_id = cake.id, name = %cake.name, "Cake added");
        Ok(cake)
    }

    /// Overwrite the fields present in `payload`; all other fields keep their values
    pub async fn update(&self, id: i32, payload: Value) -> Result<Cake, CakeServiceError> {
        let patch = CakePatch::from_json(payload)?;
        if patch.is_empty() {
            return self.get(id).await;
        }

        let cake = self
            .store
            .patch(id, &patch)
            .await?
            .ok_or(CakeServiceError::NotFound(id))?;

        info!(cake_id = id, "Cake updated");
        Ok(cake)
    }

    pub async fn delete(&self, id: i32) -> Result<(), CakeServiceError> {
        if !self.store.delete(id).await? {
            return Err(CakeServiceError::NotFound(id));
        }

        info!(cake_id = id, "Cake deleted");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), CakeServiceError> {
        Ok(self.store.ping().await?)
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryCakeStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::time::Duration;

    fn service() -> (CakeService, Arc<MemoryCakeStore>) {
        let store = Arc::new(MemoryCakeStore::new());
        (CakeService::new(store.clone()), store)
    }

    /// Memory store whose reads are slow, so overlapping requests interleave
    struct SlowReads(MemoryCakeStore);

    #[async_trait]
    impl CakeStore for SlowReads {
        async fn list(&self) -> Result<Vec<Cake>, StoreError> {
            self.0.list().await
        }

        async fn get(&self, id: i32) -> Result<Option<Cake>, StoreError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.0.get(id).await
        }

        async fn insert(&self, cake: NewCake) -> Result<Cake, StoreError> {
            self.0.insert(cake).await
        }

        async fn patch(&self, id: i32, patch: &CakePatch) -> Result<Option<Cake>, StoreError> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.0.patch(id, patch).await
        }

        async fn delete(&self, id: i32) -> Result<bool, StoreError> {
            self.0.delete(id).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }

        fn backend(&self) -> &'static str {
            "slow-memory"
        }
    }

    #[tokio::test]
    async fn add_then_list_includes_new_cake() {
        let (service, _) = service();
        let cake = service
            .add(json!({ "name": "Chocolate Cake", "yumFactor": 9 }))
            .await
            .unwrap();

        assert_eq!(cake.id, 1);
        assert_eq!(service.list().await.unwrap(), vec![cake]);
    }

    #[tokio::test]
    async fn add_missing_name_stores_nothing() {
        let (service, store) = service();
        let err = service
            .add(json!({ "comment": "New Comment", "imageUrl": "new-image.jpg" }))
            .await
            .unwrap_err();

        assert!(matches!(err, CakeServiceError::Invalid(CakeError::MissingRequiredField("name"))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let (service, _) = service();
        let cake = service
            .add(json!({ "name": "Cake 1", "comment": "Comment 1", "imageUrl": "image1.jpg", "yumFactor": 4 }))
            .await
            .unwrap();

        let updated = service.update(cake.id, json!({ "yumFactor": 10 })).await.unwrap();
        assert_eq!(updated.yum_factor, Some(10));
        assert_eq!(updated.name, "Cake 1");
        assert_eq!(updated.comment.as_deref(), Some("Comment 1"));

        let again = service.update(cake.id, json!({ "yumFactor": 10 })).await.unwrap();
        assert_eq!(again, updated);
        assert_eq!(service.get(cake.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn concurrent_updates_on_different_fields_keep_both() {
        let service = CakeService::new(Arc::new(SlowReads(MemoryCakeStore::new())));
        let cake = service
            .add(json!({ "name": "Cake 1", "comment": "old", "yumFactor": 1 }))
            .await
            .unwrap();

        let (first, second) = tokio::join!(
            service.update(cake.id, json!({ "comment": "new" })),
            service.update(cake.id, json!({ "yumFactor": 9 }))
        );
        first.unwrap();
        second.unwrap();

        let stored = service.get(cake.id).await.unwrap();
        assert_eq!(stored.comment.as_deref(), Some("new"));
        assert_eq!(stored.yum_factor, Some(9));
        assert_eq!(stored.name, "Cake 1");
    }

    #[tokio::test]
    async fn empty_update_still_requires_existing_cake() {
        let (service, _) = service();
        let cake = service.add(json!({ "name": "Cake 1" })).await.unwrap();

        assert_eq!(service.update(cake.id, json!({})).await.unwrap(), cake);
        assert!(matches!(
            service.update(99, json!({})).await,
            Err(CakeServiceError::NotFound(99))
        ));
    }

    #[tokio::test]
    async fn update_missing_cake_is_not_found() {
        let (service, store) = service();
        let err = service.update(123, json!({ "name": "Updated Cake" })).await.unwrap_err();
        assert!(matches!(err, CakeServiceError::NotFound(123)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_second_time() {
        let (service, _) = service();
        let cake = service.add(json!({ "name": "Cake 1" })).await.unwrap();

        service.delete(cake.id).await.unwrap();
        assert!(matches!(
            service.delete(cake.id).await,
            Err(CakeServiceError::NotFound(id)) if id == cake.id
        ));
        assert!(service.list().await.unwrap().is_empty());
    }
}
