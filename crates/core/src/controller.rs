//! Entry points the transport layer calls. Each controller wires one use case
//! to the gateways and presenter it needs and exposes a single `execute`.

use std::sync::Arc;

use crate::catalog::CategoryCatalog;
use crate::command::{CreateProduct, UpdateProduct};
use crate::domain::category::CategoryId;
use crate::domain::product::ProductId;
use crate::errors::ApplicationError;
use crate::gateway::{CategoryGateway, ProductGateway};
use crate::presenter::{ProductContent, ProductOutput, ProductPresenter};
use crate::store::ProductStore;
use crate::usecase::{
    CreateProductUseCase, DeleteProductUseCase, FindOneProductUseCase,
    FindProductsByCategoryUseCase, UpdateProductUseCase,
};

#[derive(Clone)]
pub struct CreateProductController {
    usecase: CreateProductUseCase,
}

impl CreateProductController {
    pub fn new(store: Arc<dyn ProductStore>, catalog: Arc<dyn CategoryCatalog>) -> Self {
        Self {
            usecase: CreateProductUseCase::new(
                ProductGateway::new(store),
                CategoryGateway::new(catalog),
                ProductPresenter,
            ),
        }
    }

    pub async fn execute(&self, command: CreateProduct) -> Result<ProductOutput, ApplicationError> {
        self.usecase.create(command).await
    }
}

#[derive(Clone)]
pub struct FindProductsByCategoryController {
    usecase: FindProductsByCategoryUseCase,
}

impl FindProductsByCategoryController {
    pub fn new(store: Arc<dyn ProductStore>, catalog: Arc<dyn CategoryCatalog>) -> Self {
        Self {
            usecase: FindProductsByCategoryUseCase::new(
                ProductGateway::new(store),
                CategoryGateway::new(catalog),
                ProductPresenter,
            ),
        }
    }

    pub async fn execute(&self, category_id: CategoryId) -> Result<ProductContent, ApplicationError> {
        self.usecase.find_by_category(category_id).await
    }
}

#[derive(Clone)]
pub struct FindOneProductController {
    usecase: FindOneProductUseCase,
}

impl FindOneProductController {
    pub fn new(store: Arc<dyn ProductStore>, catalog: Arc<dyn CategoryCatalog>) -> Self {
        Self {
            usecase: FindOneProductUseCase::new(
                ProductGateway::new(store),
                CategoryGateway::new(catalog),
                ProductPresenter,
            ),
        }
    }

    pub async fn execute(&self, product_id: &ProductId) -> Result<ProductOutput, ApplicationError> {
        self.usecase.find_by_product_id(product_id).await
    }
}

#[derive(Clone)]
pub struct UpdateProductController {
    usecase: UpdateProductUseCase,
}

impl UpdateProductController {
    pub fn new(store: Arc<dyn ProductStore>, catalog: Arc<dyn CategoryCatalog>) -> Self {
        Self {
            usecase: UpdateProductUseCase::new(
                ProductGateway::new(store),
                CategoryGateway::new(catalog),
                ProductPresenter,
            ),
        }
    }

    pub async fn execute(&self, command: UpdateProduct) -> Result<ProductOutput, ApplicationError> {
        self.usecase.update_by_id(command).await
    }
}

#[derive(Clone)]
pub struct DeleteProductController {
    usecase: DeleteProductUseCase,
}

impl DeleteProductController {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { usecase: DeleteProductUseCase::new(ProductGateway::new(store)) }
    }

    pub async fn execute(&self, product_id: &ProductId) -> Result<ProductId, ApplicationError> {
        self.usecase.delete_by_id(product_id).await
    }
}

/// All five controllers over one store and one catalog.
#[derive(Clone)]
pub struct ProductControllers {
    pub create: CreateProductController,
    pub find_by_category: FindProductsByCategoryController,
    pub find_one: FindOneProductController,
    pub update: UpdateProductController,
    pub delete: DeleteProductController,
}

impl ProductControllers {
    pub fn new(store: Arc<dyn ProductStore>, catalog: Arc<dyn CategoryCatalog>) -> Self {
        Self {
            create: CreateProductController::new(store.clone(), catalog.clone()),
            find_by_category: FindProductsByCategoryController::new(
                store.clone(),
                catalog.clone(),
            ),
            find_one: FindOneProductController::new(store.clone(), catalog.clone()),
            update: UpdateProductController::new(store.clone(), catalog),
            delete: DeleteProductController::new(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::ProductControllers;
    use crate::catalog::StaticCategoryCatalog;
    use crate::command::{CreateProduct, UpdateProduct};
    use crate::domain::category::CategoryId;
    use crate::domain::product::ProductId;
    use crate::errors::{ApplicationError, DomainError};
    use crate::store::stub::StubProductStore;

    fn controllers() -> ProductControllers {
        ProductControllers::new(
            Arc::new(StubProductStore::default()),
            Arc::new(StaticCategoryCatalog::reference()),
        )
    }

    #[tokio::test]
    async fn full_lifecycle_through_controllers() {
        let controllers = controllers();

        let created = controllers
            .create
            .execute(CreateProduct {
                name: "Milkshake".to_string(),
                description: "Vanilla".to_string(),
                category_id: CategoryId(3),
                amount: Decimal::new(750, 2),
            })
            .await
            .expect("create");
        let id = ProductId(created.product_id.clone());

        let found = controllers.find_one.execute(&id).await.expect("find one");
        assert_eq!(found, created);

        let listed = controllers.find_by_category.execute(CategoryId(3)).await.expect("list");
        assert_eq!(listed.content, vec![created.clone()]);

        let updated = controllers
            .update
            .execute(UpdateProduct {
                amount: Decimal::new(800, 2),
                ..UpdateProduct::for_product(id.clone())
            })
            .await
            .expect("update");
        assert_eq!(updated.amount, Decimal::new(800, 2));
        assert_eq!(updated.name, "Milkshake");
        assert_eq!(updated.created_at, created.created_at);

        let deleted = controllers.delete.execute(&id).await.expect("delete");
        assert_eq!(deleted, id);

        let error = controllers.find_one.execute(&id).await.expect_err("deleted");
        assert!(matches!(error, ApplicationError::Domain(DomainError::ProductNotFound { .. })));
    }

    #[tokio::test]
    async fn reference_catalog_rejects_unknown_category() {
        let controllers = controllers();

        let error = controllers
            .create
            .execute(CreateProduct {
                name: "Mystery".to_string(),
                description: "???".to_string(),
                category_id: CategoryId(999),
                amount: Decimal::ONE,
            })
            .await
            .expect_err("unknown category");

        assert_eq!(
            error,
            ApplicationError::Domain(DomainError::CategoryNotExists { category_id: CategoryId(999) })
        );
        assert!(controllers
            .find_by_category
            .execute(CategoryId(999))
            .await
            .is_err());
    }
}
