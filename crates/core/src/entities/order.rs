//! Order records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderId, OrderStatus, ProductId};

/// One line of an order: a product snapshot at purchase time.
///
/// The snapshot is intentionally denormalized — later catalog edits must not
/// rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    /// Image URI, or `None` when the bag held an unsupported asset
    /// reference that checkout had to drop.
    pub image: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
}

/// A placed order, appended to the array under `orders_<email>`.
///
/// Orders are append-only; the only mutation is an admin status change,
/// which rewrites the user's whole array. `user_email` is expected to match
/// the storage key suffix, but historical data is not guaranteed to, so
/// admin views fall back to the suffix when the field is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Client-generated id: `order_<epoch-ms>_<random base36>`.
    pub id: OrderId,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<Email>,
    #[serde(default)]
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Order {
        Order {
            id: OrderId::new("order_1747040000000_k3jf9a"),
            date: "2025-05-12T09:33:20Z".parse().unwrap(),
            items: vec![OrderItem {
                id: ProductId::new("2"),
                name: "Stylish Blue Polo".to_owned(),
                image: Some("https://cdn.example.com/products/polo.png".to_owned()),
                price: Decimal::new(3995, 2),
                quantity: 2,
            }],
            total_price: Decimal::new(7990, 2),
            user_email: Some(Email::parse("bob@x.com").unwrap()),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn test_round_trip() {
        let order = sample();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let raw = r#"{
            "id": "order_1_x",
            "date": "2025-01-01T00:00:00Z",
            "items": [],
            "totalPrice": "0"
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_email, None);
    }
}
