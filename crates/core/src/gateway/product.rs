use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::command::UpdateProduct;
use crate::domain::category::CategoryId;
use crate::domain::product::{next_update_timestamp, Product, ProductId};
use crate::errors::{ApplicationError, DomainError};
use crate::store::{ProductRecord, ProductStore};

#[derive(Clone)]
pub struct ProductGateway {
    store: Arc<dyn ProductStore>,
}

impl ProductGateway {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, product: &Product) -> Result<(), ApplicationError> {
        self.store.create(ProductRecord::from(product)).await?;
        Ok(())
    }

    pub async fn find_one(&self, id: &ProductId) -> Result<Product, ApplicationError> {
        let record = self
            .store
            .find_one(id.as_str())
            .await?
            .ok_or_else(|| DomainError::ProductNotFound { product_id: id.clone() })?;
        Ok(Product::from(record))
    }

    pub async fn find_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, ApplicationError> {
        let records = self.store.find_by_category(category_id.0).await?;
        Ok(records.into_iter().map(Product::from).collect())
    }

    /// Reads the stored record, merges the partial command onto it and writes
    /// the result back. Nothing is written when the product does not exist.
    pub async fn update_by_id(&self, command: UpdateProduct) -> Result<Product, ApplicationError> {
        let existing = self
            .store
            .find_one(command.product_id.as_str())
            .await?
            .ok_or_else(|| DomainError::ProductNotFound { product_id: command.product_id.clone() })?;

        let merged = merge_update(command, existing, Utc::now());
        self.store.update_by_id(merged.clone()).await?;

        Ok(Product::from(merged))
    }

    pub async fn delete_by_id(&self, id: &ProductId) -> Result<ProductId, ApplicationError> {
        let deleted = self.store.delete_by_id(id.as_str()).await?;
        Ok(ProductId(deleted))
    }
}

fn merge_update(
    command: UpdateProduct,
    existing: ProductRecord,
    now: DateTime<Utc>,
) -> ProductRecord {
    ProductRecord {
        updated_at: next_update_timestamp(existing.updated_at, now),
        name: if command.name.is_empty() { existing.name } else { command.name },
        description: if command.description.is_empty() {
            existing.description
        } else {
            command.description
        },
        category_id: if command.category_id.is_unset() {
            existing.category_id
        } else {
            command.category_id.0
        },
        amount: if command.amount.is_zero() { existing.amount } else { command.amount },
        created_at: existing.created_at,
        id: existing.id,
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.0.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            category_id: product.category_id.0,
            amount: product.amount,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: ProductId(record.id),
            name: record.name,
            description: record.description,
            category_id: CategoryId(record.category_id),
            amount: record.amount,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
