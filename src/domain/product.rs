//! Marketplace products: finished pieces shown for inspiration.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

const FIXTURES: &str = include_str!("../../assets/products.json");

/// Category that matches every product
pub const ALL_CATEGORIES: &str = "All";

/// Category chips in display order
pub const PRODUCT_CATEGORIES: [&str; 6] = [
    ALL_CATEGORIES,
    "T-Shirts",
    "Denim",
    "Outerwear",
    "Dresses",
    "Accessories",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub material: String,
    /// Minimum order quantity, e.g. "500 units"
    pub moq: String,
    pub lead_time: String,
    pub supplier_country: String,
}

impl Product {
    /// True when the product is in `category` and its name or brand
    /// contains `search`, ignoring case. "All" and an empty search match
    /// everything.
    pub fn matches(&self, category: &str, search: &str) -> bool {
        let in_category = category == ALL_CATEGORIES || self.category == category;
        let needle = search.trim().to_lowercase();
        let found = needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.brand.to_lowercase().contains(&needle);
        in_category && found
    }
}

/// Parse the embedded product list
pub fn load_products() -> Result<Vec<Product>, CatalogError> {
    let mut products: Vec<Product> = serde_json::from_str(FIXTURES)?;
    for (idx, product) in products.iter_mut().enumerate() {
        product.id = idx as u32 + 1;
    }
    Ok(products)
}

#[cfg(test)]
pub(crate) fn sample(name: &str, brand: &str, category: &str) -> Product {
    Product {
        id: 0,
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        material: "Cotton".to_string(),
        moq: "100 units".to_string(),
        lead_time: "4-6 weeks".to_string(),
        supplier_country: "India".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_parse() {
        let products = load_products().unwrap();
        assert_eq!(products.len(), 6);
        assert_eq!(products[0].id, 1);
        assert!(products
            .iter()
            .all(|p| PRODUCT_CATEGORIES.contains(&p.category.as_str())));
    }

    #[test]
    fn test_matches_category_and_search() {
        let tee = sample("Organic Cotton Tee", "EcoWear Co.", "T-Shirts");
        assert!(tee.matches(ALL_CATEGORIES, ""));
        assert!(tee.matches("T-Shirts", "cotton"));
        assert!(tee.matches("T-Shirts", "ECOWEAR"));
        assert!(!tee.matches("Denim", ""));
        assert!(!tee.matches(ALL_CATEGORIES, "jacket"));
    }
}
