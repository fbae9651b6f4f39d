//! Subcommand implementations.
//!
//! Commands write their human-readable output to the given writer so they
//! can be exercised in tests without a terminal.

pub mod cart;
pub mod products;

use powerhit_storefront::StorefrontError;
use powerhit_storefront::cart::CartError;
use powerhit_storefront::catalog::CatalogError;
use powerhit_storefront::config::ConfigError;
use thiserror::Error;

/// Errors surfaced to the user by a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error("unknown product {0}: pass --name and --price or add it to the catalog")]
    UnknownProduct(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<CartError> for CommandError {
    fn from(err: CartError) -> Self {
        Self::Storefront(err.into())
    }
}

impl From<CatalogError> for CommandError {
    fn from(err: CatalogError) -> Self {
        Self::Storefront(err.into())
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        Self::Storefront(err.into())
    }
}
