use tracing::info;

use crate::domain::product::ProductId;
use crate::errors::ApplicationError;
use crate::gateway::ProductGateway;

#[derive(Clone)]
pub struct DeleteProductUseCase {
    product_gateway: ProductGateway,
}

impl DeleteProductUseCase {
    pub fn new(product_gateway: ProductGateway) -> Self {
        Self { product_gateway }
    }

    pub async fn delete_by_id(&self, product_id: &ProductId) -> Result<ProductId, ApplicationError> {
        let deleted = self.product_gateway.delete_by_id(product_id).await?;
        info!(event_name = "product.delete.completed", product_id = %deleted, "product deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::DeleteProductUseCase;
    use crate::domain::product::ProductId;
    use crate::errors::{ApplicationError, DomainError};
    use crate::gateway::ProductGateway;
    use crate::store::stub::StubProductStore;
    use crate::usecase::fixtures::record;

    #[tokio::test]
    async fn delete_echoes_the_id_and_removes_the_record() {
        // Category 42 is not in any catalog; deletion does not check it.
        let store = Arc::new(StubProductStore::with_records(vec![record(
            "p-1",
            "Cookie",
            42,
            Decimal::ONE,
        )]));
        let usc = DeleteProductUseCase::new(ProductGateway::new(store.clone()));

        let deleted = usc.delete_by_id(&ProductId("p-1".to_string())).await.expect("delete");

        assert_eq!(deleted, ProductId("p-1".to_string()));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_id_is_an_error() {
        let usc = DeleteProductUseCase::new(ProductGateway::new(Arc::new(
            StubProductStore::default(),
        )));

        let error = usc.delete_by_id(&ProductId("p-404".to_string())).await.expect_err("missing");

        assert!(matches!(error, ApplicationError::Domain(DomainError::ProductNotFound { .. })));
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let usc = DeleteProductUseCase::new(ProductGateway::new(Arc::new(
            StubProductStore::failing("locked"),
        )));

        let error = usc.delete_by_id(&ProductId("p-1".to_string())).await.expect_err("store down");

        assert_eq!(error, ApplicationError::Persistence("locked".to_string()));
    }
}
