// Store handle used when the startup connection failed
// Author: kelexine (https://github.com/kelexine)

use super::{RecipeStore, WriteOutcome};
use crate::error::{StoreError, StoreResult};
use crate::models::{Recipe, RecipeFields, RecipeId};
use async_trait::async_trait;

/// Every operation fails with [`StoreError::Unavailable`] carrying the
/// original connection error.
#[derive(Debug, Clone)]
pub struct OfflineStore {
    reason: String,
}

impl OfflineStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> StoreResult<T> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl RecipeStore for OfflineStore {
    async fn insert(&self, _fields: RecipeFields) -> StoreResult<Recipe> {
        self.unavailable()
    }

    async fn find_by_id(&self, _id: RecipeId) -> StoreResult<Recipe> {
        self.unavailable()
    }

    async fn find_all(&self) -> StoreResult<Vec<Recipe>> {
        self.unavailable()
    }

    async fn update_by_id(&self, _id: RecipeId, _fields: RecipeFields) -> StoreResult<WriteOutcome> {
        self.unavailable()
    }

    async fn delete_by_id(&self, _id: RecipeId) -> StoreResult<WriteOutcome> {
        self.unavailable()
    }

    async fn ping(&self) -> StoreResult<()> {
        self.unavailable()
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_operation_is_unavailable() {
        let store = OfflineStore::new("connection refused");
        let id = RecipeId::new();

        let err = store.find_by_id(id).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert!(matches!(store.find_all().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.insert(RecipeFields::default()).await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.update_by_id(id, RecipeFields::default()).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.delete_by_id(id).await, Err(StoreError::Unavailable(_))));
        assert!(store.close().await.is_ok());
    }
}
