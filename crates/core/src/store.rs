use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Persisted shape of a product, as the store sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("product `{0}` not found")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, record: ProductRecord) -> Result<(), StoreError>;

    async fn find_one(&self, id: &str) -> Result<Option<ProductRecord>, StoreError>;

    /// Matches in store order. An empty result is not an error.
    async fn find_by_category(&self, category_id: i64) -> Result<Vec<ProductRecord>, StoreError>;

    /// Replaces the stored record with the same id. Fails with
    /// [`StoreError::NotFound`] when no such record exists.
    async fn update_by_id(&self, record: ProductRecord) -> Result<(), StoreError>;

    /// Hard delete. Returns the deleted id, or [`StoreError::NotFound`].
    async fn delete_by_id(&self, id: &str) -> Result<String, StoreError>;
}

#[cfg(test)]
pub(crate) mod stub {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ProductRecord, ProductStore, StoreError};

    /// Vec-backed store with switchable failures.
    #[derive(Default)]
    pub(crate) struct StubProductStore {
        records: Mutex<Vec<ProductRecord>>,
        fail_with: Mutex<Option<String>>,
        fail_updates_with: Mutex<Option<String>>,
    }

    impl StubProductStore {
        pub(crate) fn with_records(records: Vec<ProductRecord>) -> Self {
            Self { records: Mutex::new(records), ..Self::default() }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self { fail_with: Mutex::new(Some(message.to_string())), ..Self::default() }
        }

        /// Reads succeed, writes through `update_by_id` fail.
        pub(crate) fn failing_updates(records: Vec<ProductRecord>, message: &str) -> Self {
            Self {
                records: Mutex::new(records),
                fail_updates_with: Mutex::new(Some(message.to_string())),
                ..Self::default()
            }
        }

        pub(crate) fn snapshot(&self) -> Vec<ProductRecord> {
            self.records.lock().expect("records lock").clone()
        }

        fn check(&self) -> Result<(), StoreError> {
            match self.fail_with.lock().expect("failure lock").clone() {
                Some(message) => Err(StoreError::Database(message)),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ProductStore for StubProductStore {
        async fn create(&self, record: ProductRecord) -> Result<(), StoreError> {
            self.check()?;
            self.records.lock().expect("records lock").push(record);
            Ok(())
        }

        async fn find_one(&self, id: &str) -> Result<Option<ProductRecord>, StoreError> {
            self.check()?;
            let records = self.records.lock().expect("records lock");
            Ok(records.iter().find(|record| record.id == id).cloned())
        }

        async fn find_by_category(
            &self,
            category_id: i64,
        ) -> Result<Vec<ProductRecord>, StoreError> {
            self.check()?;
            let records = self.records.lock().expect("records lock");
            Ok(records.iter().filter(|record| record.category_id == category_id).cloned().collect())
        }

        async fn update_by_id(&self, record: ProductRecord) -> Result<(), StoreError> {
            self.check()?;
            if let Some(message) = self.fail_updates_with.lock().expect("failure lock").clone() {
                return Err(StoreError::Database(message));
            }
            let mut records = self.records.lock().expect("records lock");
            match records.iter_mut().find(|existing| existing.id == record.id) {
                Some(existing) => {
                    *existing = record;
                    Ok(())
                }
                None => Err(StoreError::NotFound(record.id)),
            }
        }

        async fn delete_by_id(&self, id: &str) -> Result<String, StoreError> {
            self.check()?;
            let mut records = self.records.lock().expect("records lock");
            let before = records.len();
            records.retain(|record| record.id != id);
            if records.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Ok(id.to_string())
        }
    }
}
