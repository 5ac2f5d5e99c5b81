use async_trait::async_trait;
use tokio::sync::RwLock;

use prodcat_core::store::{ProductRecord, ProductStore, StoreError};

/// Insertion-ordered store for tests and throwaway runs.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<ProductRecord>>,
}

impl InMemoryProductStore {
    pub fn with_records(records: Vec<ProductRecord>) -> Self {
        Self { products: RwLock::new(records) }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, record: ProductRecord) -> Result<(), StoreError> {
        let mut products = self.products.write().await;
        if products.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::Database(format!("duplicate product id `{}`", record.id)));
        }
        products.push(record);
        Ok(())
    }

    async fn find_one(&self, id: &str) -> Result<Option<ProductRecord>, StoreError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|record| record.id == id).cloned())
    }

    async fn find_by_category(&self, category_id: i64) -> Result<Vec<ProductRecord>, StoreError> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|record| record.category_id == category_id).cloned().collect())
    }

    async fn update_by_id(&self, record: ProductRecord) -> Result<(), StoreError> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|existing| existing.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound(record.id)),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<String, StoreError> {
        let mut products = self.products.write().await;
        let position = products
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(products.remove(position).id)
    }
}
