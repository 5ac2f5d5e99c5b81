use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::product::Product;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOutput {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOutput {
    #[serde(rename = "id")]
    pub product_id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: CategoryOutput,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductContent {
    pub content: Vec<ProductOutput>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProductPresenter;

impl ProductPresenter {
    pub fn build_single_response(&self, product: Product, category: &Category) -> ProductOutput {
        ProductOutput {
            product_id: product.id.0,
            name: product.name,
            description: product.description,
            amount: product.amount,
            category: CategoryOutput { id: category.id.0, name: category.name.clone() },
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }

    /// Every product is rendered against the one `category`; callers must
    /// only pass products that belong to it.
    pub fn build_list_response(&self, products: Vec<Product>, category: &Category) -> ProductContent {
        ProductContent {
            content: products
                .into_iter()
                .map(|product| self.build_single_response(product, category))
                .collect(),
        }
    }
}
