use tracing::warn;

use crate::domain::product::ProductId;
use crate::errors::{ApplicationError, DomainError};
use crate::gateway::{CategoryGateway, ProductGateway};
use crate::presenter::{ProductOutput, ProductPresenter};

#[derive(Clone)]
pub struct FindOneProductUseCase {
    product_gateway: ProductGateway,
    category_gateway: CategoryGateway,
    presenter: ProductPresenter,
}

impl FindOneProductUseCase {
    pub fn new(
        product_gateway: ProductGateway,
        category_gateway: CategoryGateway,
        presenter: ProductPresenter,
    ) -> Self {
        Self { product_gateway, category_gateway, presenter }
    }

    /// A stored product whose category is no longer in the catalog reports
    /// `CategoryNotExists`, not `ProductNotFound`.
    pub async fn find_by_product_id(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductOutput, ApplicationError> {
        let product = self.product_gateway.find_one(product_id).await?;

        let Some(category) = self.category_gateway.find_by_id(product.category_id) else {
            warn!(
                event_name = "product.find.category_missing",
                product_id = %product.id,
                category_id = %product.category_id,
                "stored product references a category outside the catalog"
            );
            return Err(DomainError::CategoryNotExists { category_id: product.category_id }.into());
        };

        Ok(self.presenter.build_single_response(product, &category))
    }
}
