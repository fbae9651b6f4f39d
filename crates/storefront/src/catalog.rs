//! Product listing: category filter and name search.
//!
//! The listing is static: it is loaded once from a JSON array and only its
//! visibility changes. Filtering and searching never touch the cart.

use std::fmt;
use std::path::Path;

use powerhit_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A product card in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub image: String,
}

/// Which category the filter buttons select.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a filter button's `data-category` value. `all` selects
    /// everything.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    /// Whether `product` passes this filter. Category tags compare exactly.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }

    /// Value of the filter button this corresponds to.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Category(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Products plus their current visibility.
///
/// Filter and search each recompute visibility from scratch, so whichever
/// ran last decides what is shown.
#[derive(Debug, Clone)]
pub struct ProductListing {
    products: Vec<Product>,
    visible: Vec<bool>,
    active_filter: CategoryFilter,
}

impl ProductListing {
    /// Create a listing with every product visible.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let visible = vec![true; products.len()];
        Self {
            products,
            visible,
            active_filter: CategoryFilter::All,
        }
    }

    /// Parse a listing from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the JSON is not an array of products.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(raw)?;
        Ok(Self::new(products))
    }

    /// Load a listing from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let listing = Self::from_json(&raw)?;
        tracing::debug!(products = listing.products.len(), "Catalog loaded");
        Ok(listing)
    }

    /// Show only products in `filter` and mark it as the active button.
    #[instrument(skip(self))]
    pub fn filter(&mut self, filter: CategoryFilter) {
        for (product, visible) in self.products.iter().zip(self.visible.iter_mut()) {
            *visible = filter.matches(product);
        }
        self.active_filter = filter;
    }

    /// Show products whose name or category contains `query`,
    /// case-insensitively. An empty query shows everything.
    #[instrument(skip(self))]
    pub fn search(&mut self, query: &str) {
        let query = query.to_lowercase();
        for (product, visible) in self.products.iter().zip(self.visible.iter_mut()) {
            *visible = product.name.to_lowercase().contains(&query)
                || product.category.to_lowercase().contains(&query);
        }
    }

    /// Products currently shown, in listing order.
    pub fn visible_products(&self) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .zip(&self.visible)
            .filter_map(|(product, &visible)| visible.then_some(product))
    }

    /// Whether the product with `id` is currently shown.
    #[must_use]
    pub fn is_visible(&self, id: &ProductId) -> bool {
        self.products
            .iter()
            .zip(&self.visible)
            .any(|(product, &visible)| visible && &product.id == id)
    }

    /// Find a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// All products, regardless of visibility.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The filter button currently marked active.
    #[must_use]
    pub const fn active_filter(&self) -> &CategoryFilter {
        &self.active_filter
    }

    /// Distinct categories in listing order, for rendering filter buttons.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": 1, "name": "English Willow Bat", "category": "bats", "price": "150.00", "image": "bat.png"},
        {"id": 2, "name": "Leather Ball", "category": "balls", "price": 20, "image": "ball.png"},
        {"id": 3, "name": "Batting Gloves", "category": "protection", "price": "34.99", "image": "gloves.png"},
        {"id": 4, "name": "Kashmir Willow Bat", "category": "bats", "price": "60.00", "image": "kbat.png"}
    ]"#;

    fn listing() -> ProductListing {
        ProductListing::from_json(CATALOG).unwrap()
    }

    fn visible_ids(listing: &ProductListing) -> Vec<i64> {
        listing
            .visible_products()
            .filter_map(|p| p.id.as_i64())
            .collect()
    }

    #[test]
    fn test_new_listing_shows_everything() {
        assert_eq!(visible_ids(&listing()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_by_category() {
        let mut listing = listing();
        listing.filter(CategoryFilter::parse("bats"));
        assert_eq!(visible_ids(&listing), vec![1, 4]);
        assert_eq!(listing.active_filter().as_str(), "bats");
    }

    #[test]
    fn test_filter_all() {
        let mut listing = listing();
        listing.filter(CategoryFilter::parse("balls"));
        listing.filter(CategoryFilter::parse("all"));
        assert_eq!(visible_ids(&listing), vec![1, 2, 3, 4]);
        assert_eq!(listing.active_filter(), &CategoryFilter::All);
    }

    #[test]
    fn test_filter_is_exact() {
        let mut listing = listing();
        listing.filter(CategoryFilter::parse("Bats"));
        assert!(visible_ids(&listing).is_empty());
    }

    #[test]
    fn test_search_name_case_insensitive() {
        let mut listing = listing();
        listing.search("WILLOW");
        assert_eq!(visible_ids(&listing), vec![1, 4]);
    }

    #[test]
    fn test_search_matches_category() {
        let mut listing = listing();
        listing.search("protect");
        assert_eq!(visible_ids(&listing), vec![3]);
        assert!(listing.is_visible(&ProductId::from(3)));
        assert!(!listing.is_visible(&ProductId::from(1)));
    }

    #[test]
    fn test_search_empty_query_shows_all() {
        let mut listing = listing();
        listing.search("zzz");
        assert!(visible_ids(&listing).is_empty());
        listing.search("");
        assert_eq!(visible_ids(&listing), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_overrides_filter() {
        let mut listing = listing();
        listing.filter(CategoryFilter::parse("balls"));
        listing.search("bat");
        assert_eq!(visible_ids(&listing), vec![1, 3, 4]);
    }

    #[test]
    fn test_categories() {
        assert_eq!(listing().categories(), vec!["bats", "balls", "protection"]);
    }

    #[test]
    fn test_product_lookup() {
        let listing = listing();
        let product = listing.product(&ProductId::from(3)).unwrap();
        assert_eq!(product.price, Decimal::new(3499, 2));
        assert!(listing.product(&ProductId::from(99)).is_none());
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(matches!(
            ProductListing::from_json("{\"not\": \"a list\"}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
