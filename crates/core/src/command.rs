use rust_decimal::Decimal;

use crate::domain::category::CategoryId;
use crate::domain::product::ProductId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub amount: Decimal,
}

/// Partial update. Empty strings, a zero category id and a zero amount all
/// mean "keep the stored value".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateProduct {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub amount: Decimal,
}

impl UpdateProduct {
    pub fn for_product(product_id: ProductId) -> Self {
        Self {
            product_id,
            name: String::new(),
            description: String::new(),
            category_id: CategoryId(0),
            amount: Decimal::ZERO,
        }
    }
}
