//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product in the catalog.
///
/// The whole catalog is one JSON array under `admin_products`; every edit
/// rewrites the array. `quantity` is stock on hand, not a bag quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Image URI. Only plain string URIs are supported; bundled-asset
    /// references from older clients are dropped at checkout time.
    pub image: String,
    pub category: String,
    /// Units in stock. Crossing below the configured threshold on an admin
    /// save emits a low-stock notification.
    pub quantity: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Average review rating, when the product has been reviewed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Decimal>,
    /// Review count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
}
