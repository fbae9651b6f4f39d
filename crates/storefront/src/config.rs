//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `POWERHIT_STORAGE_KEY` - Cart slot name (default: `powerhitCart`)
//! - `POWERHIT_STORAGE_DIR` - Directory for file-backed slots (default: `.powerhit`)
//! - `POWERHIT_CATALOG_PATH` - Product listing JSON (default: `catalog.json`)
//! - `POWERHIT_SHIPPING_FLAT_RATE` - Flat checkout surcharge (default: 10.00)
//! - `POWERHIT_CURRENCY` - ISO 4217 display currency (default: USD)

use std::path::PathBuf;
use std::str::FromStr;

use powerhit_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::storage::DEFAULT_CART_KEY;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Name of the durable slot holding the cart
    pub storage_key: String,
    /// Directory for file-backed storage
    pub storage_dir: PathBuf,
    /// Path to the static product listing
    pub catalog_path: PathBuf,
    /// Flat amount added to the subtotal at checkout
    pub shipping_flat_rate: Decimal,
    /// Currency used for display
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            storage_dir: PathBuf::from(".powerhit"),
            catalog_path: PathBuf::from("catalog.json"),
            shipping_flat_rate: Decimal::new(10, 0),
            currency: CurrencyCode::USD,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_key = lookup("POWERHIT_STORAGE_KEY")
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(defaults.storage_key);
        let storage_dir = lookup("POWERHIT_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);
        let catalog_path =
            lookup("POWERHIT_CATALOG_PATH").map_or(defaults.catalog_path, PathBuf::from);
        let shipping_flat_rate = parse_var(
            &lookup,
            "POWERHIT_SHIPPING_FLAT_RATE",
            defaults.shipping_flat_rate,
        )?;
        let currency = parse_var(&lookup, "POWERHIT_CURRENCY", defaults.currency)?;

        Ok(Self {
            storage_key,
            storage_dir,
            catalog_path,
            shipping_flat_rate,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
