//! Integration tests for the PowerHit storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p powerhit-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store against file-backed storage
//! - `page_flow` - Page dispatch from browsing to checkout
//! - `catalog` - Listing loaded from disk with filter and search

use std::path::{Path, PathBuf};

use powerhit_storefront::catalog::ProductListing;

/// Product listing used across the test suites.
pub const CATALOG_JSON: &str = r#"[
    {"id": 1, "name": "English Willow Bat", "category": "bats", "price": "150.00", "image": "images/bat.png"},
    {"id": 2, "name": "Kashmir Willow Bat", "category": "bats", "price": 89.5, "image": "images/kashmir.png"},
    {"id": 3, "name": "Leather Match Ball", "category": "balls", "price": "20.00", "image": "images/ball.png"},
    {"id": 4, "name": "Batting Gloves", "category": "protection", "price": "34.99", "image": "images/gloves.png"},
    {"id": "helmet-pro", "name": "Pro Helmet", "category": "protection", "price": "75.00", "image": "images/helmet.png"}
]"#;

/// A uniquely named directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Create a fresh directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("powerhit-it-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the shared catalog into the directory and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn write_catalog(&self) -> PathBuf {
        let path = self.path.join("catalog.json");
        std::fs::write(&path, CATALOG_JSON).expect("write catalog");
        path
    }
}

impl Default for TempDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// The shared catalog, parsed.
///
/// # Panics
///
/// Panics if [`CATALOG_JSON`] is malformed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn catalog() -> ProductListing {
    ProductListing::from_json(CATALOG_JSON).expect("catalog parses")
}
