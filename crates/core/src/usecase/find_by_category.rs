use tracing::{info, warn};

use crate::domain::category::CategoryId;
use crate::errors::{ApplicationError, DomainError};
use crate::gateway::{CategoryGateway, ProductGateway};
use crate::presenter::{ProductContent, ProductPresenter};

#[derive(Clone)]
pub struct FindProductsByCategoryUseCase {
    product_gateway: ProductGateway,
    category_gateway: CategoryGateway,
    presenter: ProductPresenter,
}

impl FindProductsByCategoryUseCase {
    pub fn new(
        product_gateway: ProductGateway,
        category_gateway: CategoryGateway,
        presenter: ProductPresenter,
    ) -> Self {
        Self { product_gateway, category_gateway, presenter }
    }

    /// The category is validated before the store is queried.
    pub async fn find_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<ProductContent, ApplicationError> {
        let Some(category) = self.category_gateway.find_by_id(category_id) else {
            warn!(
                event_name = "product.list.category_missing",
                category_id = %category_id,
                "listing requested for unknown category"
            );
            return Err(DomainError::CategoryNotExists { category_id }.into());
        };

        let products = self.product_gateway.find_by_category(category_id).await?;
        info!(
            event_name = "product.list.completed",
            category_id = %category_id,
            count = products.len(),
            "products listed"
        );

        Ok(self.presenter.build_list_response(products, &category))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::FindProductsByCategoryUseCase;
    use crate::domain::category::{Category, CategoryId};
    use crate::errors::{ApplicationError, DomainError};
    use crate::presenter::ProductPresenter;
    use crate::store::stub::StubProductStore;
    use crate::usecase::fixtures::{gateways, record};

    fn use_case(store: StubProductStore) -> FindProductsByCategoryUseCase {
        let (products, categories) =
            gateways(Arc::new(store), vec![Category::new(10, "Category 10"), Category::new(4, "Dessert")]);
        FindProductsByCategoryUseCase::new(products, categories, ProductPresenter)
    }

    #[tokio::test]
    async fn lists_products_in_store_order_with_shared_category() {
        let usc = use_case(StubProductStore::with_records(vec![
            record("p-1", "Product 1", 10, Decimal::ONE),
            record("p-x", "Other", 4, Decimal::ONE),
            record("p-2", "Product 2", 10, Decimal::TWO),
        ]));

        let content = usc.find_by_category(CategoryId(10)).await.expect("list");

        let names: Vec<_> = content.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Product 1", "Product 2"]);
        assert!(content.content.iter().all(|p| p.category.id == 10));
        assert!(content.content.iter().all(|p| p.category.name == "Category 10"));
    }

    #[tokio::test]
    async fn empty_category_yields_empty_content() {
        let usc = use_case(StubProductStore::default());

        let content = usc.find_by_category(CategoryId(4)).await.expect("list");

        assert!(content.content.is_empty());
    }

    #[tokio::test]
    async fn unknown_category_fails_even_when_products_reference_it() {
        let usc = use_case(StubProductStore::with_records(vec![record(
            "p-9",
            "Orphan",
            99,
            Decimal::ONE,
        )]));

        let error = usc.find_by_category(CategoryId(99)).await.expect_err("unknown category");

        assert_eq!(
            error,
            ApplicationError::Domain(DomainError::CategoryNotExists { category_id: CategoryId(99) })
        );
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let usc = use_case(StubProductStore::failing("timeout"));

        let error = usc.find_by_category(CategoryId(10)).await.expect_err("store down");

        assert_eq!(error, ApplicationError::Persistence("timeout".to_string()));
    }
}
