//! Unified error handling.
//!
//! Each module defines its own error enum; [`StorefrontError`] collects them
//! for callers that drive several modules at once (the page dispatcher, the
//! CLI).

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Cart mutation could not be persisted.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Product listing could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration was invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// A referenced form or product does not exist on the page.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
