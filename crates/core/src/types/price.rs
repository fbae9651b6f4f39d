//! Type-safe money representation using decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in a given currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Format for display with two decimal places (e.g., "$19.99").
    ///
    /// ```rust
    /// use powerhit_core::{CurrencyCode, Money};
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::new(Decimal::new(150, 0), CurrencyCode::USD);
    /// assert_eq!(price.display(), "$150.00");
    /// ```
    #[must_use]
    pub fn display(&self) -> String {
        let symbol = self.currency_code.symbol();
        let rounded = self.amount.round_dp(2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{symbol}{:.2}", rounded.abs())
        } else {
            format!("{symbol}{:.2}", rounded.abs())
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::INR => "₹",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::INR => "INR",
            Self::AUD => "AUD",
        }
    }
}

/// Error returned when parsing an unsupported currency code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "INR" => Ok(Self::INR),
            "AUD" => Ok(Self::AUD),
            _ => Err(UnknownCurrency(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_two_decimals() {
        let money = Money::new(Decimal::new(300, 0), CurrencyCode::USD);
        assert_eq!(money.display(), "$300.00");
    }

    #[test]
    fn test_display_rounds() {
        let money = Money::new(Decimal::new(19_999, 3), CurrencyCode::USD);
        assert_eq!(money.display(), "$20.00");
    }

    #[test]
    fn test_display_negative() {
        let money = Money::new(Decimal::new(-550, 2), CurrencyCode::GBP);
        assert_eq!(money.display(), "-£5.50");
    }

    #[test]
    fn test_zero() {
        assert_eq!(Money::zero(CurrencyCode::USD).display(), "$0.00");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!(" INR ".parse::<CurrencyCode>().unwrap(), CurrencyCode::INR);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_currency_code_roundtrip() {
        for code in [
            CurrencyCode::USD,
            CurrencyCode::EUR,
            CurrencyCode::GBP,
            CurrencyCode::INR,
            CurrencyCode::AUD,
        ] {
            assert_eq!(code.code().parse::<CurrencyCode>().unwrap(), code);
        }
    }
}
