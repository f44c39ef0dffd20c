//! Admin notification record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::NotificationId;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A customer placed an order.
    Order,
    /// A product crossed below the low-stock threshold.
    Stock,
    /// A new customer registered.
    User,
}

impl NotificationKind {
    /// The wire/id-prefix form, e.g. `"stock"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Stock => "stock",
            Self::User => "user",
        }
    }
}

/// One entry in the admin notification log.
///
/// The log lives as a single array under `admin_notifications`, newest
/// first, capped at 50 entries with the oldest dropped on overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Generated id: `<type>_<epoch-ms>_<itemId or random>`.
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// The entity this notification is about: an order id, product id, or
    /// user email, depending on `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_wire_names() {
        let notification = Notification {
            id: NotificationId::new("stock_1747040000000_42"),
            title: "Low Stock Alert!".to_owned(),
            message: "Product \"Polo\" quantity is 3. Threshold: 5".to_owned(),
            kind: NotificationKind::Stock,
            item_id: Some("42".to_owned()),
            timestamp: "2025-05-12T09:33:20Z".parse().unwrap(),
            is_read: false,
        };

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "stock");
        assert_eq!(json["isRead"], false);
        assert_eq!(json["itemId"], "42");

        let back: Notification = serde_json::from_value(json).unwrap();
        assert_eq!(back, notification);
    }
}
