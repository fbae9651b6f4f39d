//! Product identifiers.
//!
//! Product listings tag each card with either a numeric id or a string
//! handle, and carts written by older pages may contain both. [`ProductId`]
//! accepts either form and serializes back to the same JSON shape it was
//! read from.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a product in the listing and in the cart.
///
/// # Example
///
/// ```rust
/// use powerhit_core::ProductId;
///
/// let numeric: ProductId = "42".parse().unwrap();
/// assert_eq!(numeric, ProductId::from(42));
///
/// let handle: ProductId = "english-willow-bat".parse().unwrap();
/// assert_eq!(handle.to_string(), "english-willow-bat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Integer id, stored as a JSON number.
    Numeric(i64),
    /// String handle, stored as a JSON string.
    Handle(String),
}

impl ProductId {
    /// Returns the numeric id, if this is a numeric identifier.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Numeric(id) => Some(*id),
            Self::Handle(_) => None,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Handle(handle) => f.write_str(handle),
        }
    }
}

impl FromStr for ProductId {
    type Err = core::convert::Infallible;

    /// Integers become [`ProductId::Numeric`]; anything else is a handle.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Handle(s.to_owned()), Self::Numeric))
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self::Numeric(i64::from(id))
    }
}

impl From<&str> for ProductId {
    fn from(handle: &str) -> Self {
        Self::Handle(handle.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(handle: String) -> Self {
        Self::Handle(handle)
    }
}
