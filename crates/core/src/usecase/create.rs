use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::command::CreateProduct;
use crate::domain::product::Product;
use crate::errors::{ApplicationError, DomainError};
use crate::gateway::{CategoryGateway, ProductGateway};
use crate::presenter::{ProductOutput, ProductPresenter};

#[derive(Clone)]
pub struct CreateProductUseCase {
    product_gateway: ProductGateway,
    category_gateway: CategoryGateway,
    presenter: ProductPresenter,
}

impl CreateProductUseCase {
    pub fn new(
        product_gateway: ProductGateway,
        category_gateway: CategoryGateway,
        presenter: ProductPresenter,
    ) -> Self {
        Self { product_gateway, category_gateway, presenter }
    }

    pub async fn create(&self, command: CreateProduct) -> Result<ProductOutput, ApplicationError> {
        let Some(category) = self.category_gateway.find_by_id(command.category_id) else {
            warn!(
                event_name = "product.create.category_missing",
                category_id = %command.category_id,
                "rejected product for unknown category"
            );
            return Err(DomainError::CategoryNotExists { category_id: command.category_id }.into());
        };

        if command.amount < Decimal::ZERO {
            return Err(DomainError::InvariantViolation(
                "product amount must not be negative".to_string(),
            )
            .into());
        }

        let product =
            Product::new(command.name, command.description, command.category_id, command.amount);
        self.product_gateway.create(&product).await?;

        info!(
            event_name = "product.create.completed",
            product_id = %product.id,
            category_id = %product.category_id,
            "product created"
        );
        Ok(self.presenter.build_single_response(product, &category))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::CreateProductUseCase;
    use crate::command::CreateProduct;
    use crate::domain::category::{Category, CategoryId};
    use crate::errors::{ApplicationError, DomainError};
    use crate::presenter::ProductPresenter;
    use crate::store::stub::StubProductStore;
    use crate::usecase::fixtures::gateways;

    fn use_case(store: Arc<StubProductStore>, categories: Vec<Category>) -> CreateProductUseCase {
        let (products, categories) = gateways(store, categories);
        CreateProductUseCase::new(products, categories, ProductPresenter)
    }

    fn command(category_id: i64) -> CreateProduct {
        CreateProduct {
            name: "Product 1".to_string(),
            description: "First product".to_string(),
            category_id: CategoryId(category_id),
            amount: Decimal::new(100, 0),
        }
    }

    #[tokio::test]
    async fn create_returns_presented_product_with_its_category() {
        let store = Arc::new(StubProductStore::default());
        let usc = use_case(store.clone(), vec![Category::new(1, "Category 1")]);

        let output = usc.create(command(1)).await.expect("create");

        assert_eq!(output.name, "Product 1");
        assert_eq!(output.amount, Decimal::new(100, 0));
        assert_eq!(output.category.id, 1);
        assert_eq!(output.category.name, "Category 1");
        assert_eq!(output.created_at, output.updated_at);
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.snapshot()[0].id, output.product_id);
    }

    #[tokio::test]
    async fn create_with_unknown_category_fails_before_persisting() {
        let store = Arc::new(StubProductStore::default());
        let usc = use_case(store.clone(), vec![Category::new(1, "Category 1")]);

        let error = usc.create(command(999)).await.expect_err("unknown category");

        assert_eq!(
            error,
            ApplicationError::Domain(DomainError::CategoryNotExists { category_id: CategoryId(999) })
        );
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn create_propagates_persistence_failure_unchanged() {
        let store = Arc::new(StubProductStore::failing("connection reset"));
        let usc = use_case(store, vec![Category::new(1, "Category 1")]);

        let error = usc.create(command(1)).await.expect_err("store down");

        assert_eq!(error, ApplicationError::Persistence("connection reset".to_string()));
    }

    #[tokio::test]
    async fn create_rejects_negative_amount() {
        let store = Arc::new(StubProductStore::default());
        let usc = use_case(store.clone(), vec![Category::new(1, "Category 1")]);

        let error = usc
            .create(CreateProduct { amount: Decimal::new(-5, 0), ..command(1) })
            .await
            .expect_err("negative amount");

        assert!(matches!(error, ApplicationError::Domain(DomainError::InvariantViolation(_))));
        assert!(store.snapshot().is_empty());
    }
}
