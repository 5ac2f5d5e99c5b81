//! Category lookup.
//!
//! Categories are compiled-in reference data. The catalog is built once when
//! the service is wired and shared read-only from then on.

use crate::domain::category::{Category, CategoryId};

pub trait CategoryCatalog: Send + Sync {
    fn find_by_id(&self, id: CategoryId) -> Option<Category>;

    fn categories(&self) -> &[Category];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticCategoryCatalog {
    categories: Vec<Category>,
}

impl StaticCategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The four categories the service ships with.
    pub fn reference() -> Self {
        Self::new(vec![
            Category::new(1, "Snack"),
            Category::new(2, "Side Dish"),
            Category::new(3, "Drink"),
            Category::new(4, "Dessert"),
        ])
    }
}

impl Default for StaticCategoryCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

impl CategoryCatalog for StaticCategoryCatalog {
    fn find_by_id(&self, id: CategoryId) -> Option<Category> {
        self.categories.iter().find(|category| category.id == id).cloned()
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryCatalog, StaticCategoryCatalog};
    use crate::domain::category::{Category, CategoryId};

    #[test]
    fn reference_catalog_resolves_each_known_id() {
        let catalog = StaticCategoryCatalog::reference();

        assert_eq!(catalog.categories().len(), 4);
        for id in 1..=4 {
            let category = catalog.find_by_id(CategoryId(id)).expect("known category");
            assert_eq!(category.id, CategoryId(id));
        }
        assert_eq!(catalog.find_by_id(CategoryId(3)).map(|c| c.name), Some("Drink".to_string()));
    }

    #[test]
    fn unknown_and_zero_ids_are_absent() {
        let catalog = StaticCategoryCatalog::reference();

        assert_eq!(catalog.find_by_id(CategoryId(999)), None);
        assert_eq!(catalog.find_by_id(CategoryId(0)), None);
        assert_eq!(catalog.find_by_id(CategoryId(-1)), None);
    }

    #[test]
    fn custom_catalog_matches_by_exact_id() {
        let catalog = StaticCategoryCatalog::new(vec![Category::new(10, "Category 10")]);

        assert_eq!(catalog.find_by_id(CategoryId(10)), Some(Category::new(10, "Category 10")));
        assert_eq!(catalog.find_by_id(CategoryId(1)), None);
    }
}
