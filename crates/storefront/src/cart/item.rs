//! Cart line items.

use powerhit_core::{CurrencyCode, Money, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry in the cart.
///
/// Serialized as `{id, name, price, image, quantity}`. Prices are written as
/// decimal strings; numeric prices written by older pages are accepted on
/// read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    /// A fresh line with quantity 1.
    #[must_use]
    pub const fn new(id: ProductId, name: String, price: Decimal, image: String) -> Self {
        Self {
            id,
            name,
            price,
            image,
            quantity: 1,
        }
    }

    /// `price × quantity`, saturating at `Decimal::MAX`/`Decimal::MIN`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Unit price as money in `currency`.
    #[must_use]
    pub const fn unit_price(&self, currency: CurrencyCode) -> Money {
        Money::new(self.price, currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let mut item = LineItem::new(
            ProductId::from(1),
            "Bat".to_string(),
            Decimal::new(15_050, 2),
            "bat.png".to_string(),
        );
        item.quantity = 3;
        assert_eq!(item.line_total(), Decimal::new(45_150, 2));
    }

    #[test]
    fn test_line_total_saturates() {
        let mut item = LineItem::new(
            ProductId::from(1),
            "Bat".to_string(),
            Decimal::MAX,
            "bat.png".to_string(),
        );
        item.quantity = 2;
        assert_eq!(item.line_total(), Decimal::MAX);

        item.price = Decimal::MIN;
        assert_eq!(item.line_total(), Decimal::MIN);
    }

    #[test]
    fn test_deserialize_numeric_price() {
        let item: LineItem = serde_json::from_str(
            r#"{"id":2,"name":"Ball","price":19.99,"image":"ball.png","quantity":4}"#,
        )
        .unwrap();
        assert_eq!(item.price, Decimal::new(1999, 2));
        assert_eq!(item.quantity, 4);
    }

    #[test]
    fn test_serialize_shape() {
        let item = LineItem::new(
            ProductId::from("grip"),
            "Grip".to_string(),
            Decimal::new(5, 0),
            "grip.png".to_string(),
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "grip",
                "name": "Grip",
                "price": "5",
                "image": "grip.png",
                "quantity": 1
            })
        );
    }

    #[test]
    fn test_negative_quantity_rejected_on_read() {
        let result: Result<LineItem, _> = serde_json::from_str(
            r#"{"id":1,"name":"Bat","price":1,"image":"","quantity":-1}"#,
        );
        assert!(result.is_err());
    }
}
