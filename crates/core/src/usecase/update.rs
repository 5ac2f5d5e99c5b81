use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::command::UpdateProduct;
use crate::errors::{ApplicationError, DomainError};
use crate::gateway::{CategoryGateway, ProductGateway};
use crate::presenter::{ProductOutput, ProductPresenter};

#[derive(Clone)]
pub struct UpdateProductUseCase {
    product_gateway: ProductGateway,
    category_gateway: CategoryGateway,
    presenter: ProductPresenter,
}

impl UpdateProductUseCase {
    pub fn new(
        product_gateway: ProductGateway,
        category_gateway: CategoryGateway,
        presenter: ProductPresenter,
    ) -> Self {
        Self { product_gateway, category_gateway, presenter }
    }

    /// The merged record is persisted before its category is checked, so an
    /// invalid category id in the command is written and then reported as
    /// `CategoryNotExists`.
    pub async fn update_by_id(
        &self,
        command: UpdateProduct,
    ) -> Result<ProductOutput, ApplicationError> {
        if command.amount < Decimal::ZERO {
            return Err(DomainError::InvariantViolation(
                "product amount must not be negative".to_string(),
            )
            .into());
        }

        let product = self.product_gateway.update_by_id(command).await?;

        let Some(category) = self.category_gateway.find_by_id(product.category_id) else {
            warn!(
                event_name = "product.update.category_missing",
                product_id = %product.id,
                category_id = %product.category_id,
                "updated product references a category outside the catalog"
            );
            return Err(DomainError::CategoryNotExists { category_id: product.category_id }.into());
        };

        info!(
            event_name = "product.update.completed",
            product_id = %product.id,
            category_id = %product.category_id,
            "product updated"
        );
        Ok(self.presenter.build_single_response(product, &category))
    }
}
