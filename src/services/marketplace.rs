//! Product marketplace with a category chip and a name/brand search.

use crate::domain::product::{self, Product, ALL_CATEGORIES, PRODUCT_CATEGORIES};
use crate::error::CatalogError;

#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    /// Index into `PRODUCT_CATEGORIES`
    category: usize,
    search: String,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            category: 0,
            search: String::new(),
        }
    }

    /// Catalog over the bundled products
    pub fn embedded() -> Result<Self, CatalogError> {
        Ok(Self::new(product::load_products()?))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn category(&self) -> &'static str {
        PRODUCT_CATEGORIES
            .get(self.category)
            .copied()
            .unwrap_or(ALL_CATEGORIES)
    }

    /// Select a category by name. Unknown names are ignored.
    pub fn select_category(&mut self, name: &str) -> bool {
        match PRODUCT_CATEGORIES.iter().position(|c| *c == name) {
            Some(idx) => {
                self.category = idx;
                true
            }
            None => false,
        }
    }

    /// Move to the following category chip, wrapping around
    pub fn next_category(&mut self) {
        self.category = (self.category + 1) % PRODUCT_CATEGORIES.len();
        tracing::debug!(category = self.category(), "marketplace category");
    }

    /// Move to the preceding category chip, wrapping around
    pub fn previous_category(&mut self) {
        self.category = (self.category + PRODUCT_CATEGORIES.len() - 1) % PRODUCT_CATEGORIES.len();
        tracing::debug!(category = self.category(), "marketplace category");
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    /// Products matching the category and search, in catalog order
    pub fn visible(&self) -> Vec<&Product> {
        let category = self.category();
        self.products
            .iter()
            .filter(|p| p.matches(category, &self.search))
            .collect()
    }
}
