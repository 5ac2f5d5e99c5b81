use std::sync::Arc;

use crate::catalog::CategoryCatalog;
use crate::domain::category::{Category, CategoryId};

#[derive(Clone)]
pub struct CategoryGateway {
    catalog: Arc<dyn CategoryCatalog>,
}

impl CategoryGateway {
    pub fn new(catalog: Arc<dyn CategoryCatalog>) -> Self {
        Self { catalog }
    }

    pub fn find_by_id(&self, id: CategoryId) -> Option<Category> {
        self.catalog.find_by_id(id)
    }
}
