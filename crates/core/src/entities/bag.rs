//! Shopping bag line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

use super::Product;

/// One line in the shopping bag: a product snapshot plus a bag quantity.
///
/// The bag is a single array under `shoppingBag`, shared by the whole
/// installation (there is one bag per device, not per user). As in the data
/// it replaces, the snapshot's `quantity` field is the bag quantity — the
/// product's stock count is not carried into the bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagItem {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    /// Image URI. Legacy bags may hold numeric bundled-asset references
    /// here; those decode as `None` and checkout logs the loss.
    #[serde(default, deserialize_with = "lenient_image")]
    pub image: Option<String>,
    #[serde(default)]
    pub category: String,
    /// How many units of this product are in the bag.
    pub quantity: u32,
}

/// Accept a string URI, and turn anything else (null, numeric asset refs
/// from old clients) into `None` instead of failing the whole record.
fn lenient_image<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

impl BagItem {
    /// Snapshot a catalog product into a bag line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: (!product.image.is_empty()).then(|| product.image.clone()),
            category: product.category.clone(),
            quantity,
        }
    }

    /// Price of this line: unit price times bag quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_bag_quantity() {
        let product = Product {
            id: ProductId::new("4"),
            name: "Leather Biker Jacket".to_owned(),
            description: "Jacket.".to_owned(),
            price: Decimal::new(19900, 2),
            image: "https://cdn.example.com/products/jacket.png".to_owned(),
            category: "Outerwear".to_owned(),
            quantity: 12,
            tags: vec![],
            rating: None,
            reviews: None,
        };

        let item = BagItem::from_product(&product, 2);
        assert_eq!(item.quantity, 2);
        assert_eq!(item.line_total(), Decimal::new(39800, 2));
        assert_eq!(item.image.as_deref(), Some(product.image.as_str()));
    }

    #[test]
    fn test_round_trip() {
        let item = BagItem {
            id: ProductId::new("4"),
            name: "Jacket".to_owned(),
            description: String::new(),
            price: Decimal::new(100, 0),
            image: None,
            category: String::new(),
            quantity: 1,
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: BagItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_numeric_asset_reference_decodes_as_none() {
        // Old clients stored bundled-asset references as numbers.
        let raw = r#"{"id":"1","name":"Polo","price":"60.00","image":7,"quantity":2}"#;
        let item: BagItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.image, None);
    }
}
