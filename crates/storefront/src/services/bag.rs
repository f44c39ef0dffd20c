//! The shopping bag.
//!
//! One bag per installation, stored as a single JSON array under
//! `shoppingBag`. Totals are never stored; they are derived from the
//! current lines on every read.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use velvet_mango_core::entities::codec::{self, CodecError};
use velvet_mango_core::store::{KvStore, StoreError};
use velvet_mango_core::types::ProductId;
use velvet_mango_core::{BagItem, Product, keys};

/// Errors from bag operations.
#[derive(Debug, Error)]
pub enum BagError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Read/write access to the shopping bag.
pub struct BagService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> BagService<'a, S> {
    /// Create a new bag service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Current bag lines, in insertion order.
    ///
    /// A bag blob that does not decode at all is treated as empty (the next
    /// write replaces it); individually malformed lines are dropped with a
    /// warning rather than blocking the whole bag.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Store`] if the store read fails.
    pub async fn items(&self) -> Result<Vec<BagItem>, BagError> {
        let Some(raw) = self.store.get(keys::SHOPPING_BAG).await? else {
            return Ok(Vec::new());
        };
        match codec::decode_array::<BagItem>(&raw) {
            Ok(decoded) => {
                if decoded.is_lossy() {
                    warn!(skipped = decoded.skipped, "dropped malformed bag lines");
                }
                Ok(decoded.records)
            }
            Err(err) => {
                warn!(error = %err, "shopping bag unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Add `quantity` units of a product, merging with an existing line
    /// for the same product id.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Store`] if the write fails.
    pub async fn add_item(&self, product: &Product, quantity: u32) -> Result<Vec<BagItem>, BagError> {
        let mut items = self.items().await?;
        match items.iter_mut().find(|line| line.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => items.push(BagItem::from_product(product, quantity)),
        }
        self.save(&items).await?;
        Ok(items)
    }

    /// Remove a line outright. A no-op if the product is not in the bag.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Store`] if the write fails.
    pub async fn remove_item(&self, id: &ProductId) -> Result<Vec<BagItem>, BagError> {
        let mut items = self.items().await?;
        let before = items.len();
        items.retain(|line| &line.id != id);
        if items.len() != before {
            self.save(&items).await?;
        }
        Ok(items)
    }

    /// Set a line's quantity. Zero or negative removes the line, matching
    /// the decrement-past-one gesture in the bag screen.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Store`] if the write fails.
    pub async fn update_quantity(
        &self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<Vec<BagItem>, BagError> {
        if quantity <= 0 {
            return self.remove_item(id).await;
        }
        let mut items = self.items().await?;
        if let Some(line) = items.iter_mut().find(|line| &line.id == id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.save(&items).await?;
        }
        Ok(items)
    }

    /// Empty the bag.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Store`] if the write fails.
    pub async fn clear(&self) -> Result<(), BagError> {
        self.save(&[]).await
    }

    /// Sum of line totals over the current bag.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Store`] if the store read fails.
    pub async fn total_price(&self) -> Result<Decimal, BagError> {
        Ok(self
            .items()
            .await?
            .iter()
            .map(BagItem::line_total)
            .sum())
    }

    /// Total unit count across all lines.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Store`] if the store read fails.
    pub async fn item_count(&self) -> Result<u64, BagError> {
        Ok(self
            .items()
            .await?
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum())
    }

    async fn save(&self, items: &[BagItem]) -> Result<(), BagError> {
        let encoded = codec::encode(&items)?;
        self.store.set(keys::SHOPPING_BAG, &encoded).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use velvet_mango_core::store::MemoryStore;

    fn polo() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Striped Cotton Polo".to_owned(),
            description: "A polo.".to_owned(),
            price: Decimal::new(4500, 2),
            image: "https://cdn.example.com/products/polo.png".to_owned(),
            category: "Tops".to_owned(),
            quantity: 40,
            tags: vec![],
            rating: None,
            reviews: None,
        }
    }

    fn jacket() -> Product {
        Product {
            id: ProductId::new("4"),
            name: "Leather Biker Jacket".to_owned(),
            description: "A jacket.".to_owned(),
            price: Decimal::new(19900, 2),
            image: String::new(),
            category: "Outerwear".to_owned(),
            quantity: 12,
            tags: vec![],
            rating: None,
            reviews: None,
        }
    }

    #[tokio::test]
    async fn test_add_merges_existing_line() {
        let store = MemoryStore::new();
        let bag = BagService::new(&store);

        bag.add_item(&polo(), 1).await.unwrap();
        let items = bag.add_item(&polo(), 2).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().quantity, 3);
        assert_eq!(bag.item_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_totals_are_derived_from_lines() {
        let store = MemoryStore::new();
        let bag = BagService::new(&store);

        bag.add_item(&polo(), 2).await.unwrap();
        bag.add_item(&jacket(), 1).await.unwrap();

        assert_eq!(bag.total_price().await.unwrap(), Decimal::new(28900, 2));
        assert_eq!(bag.item_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_quantity_zero_removes_line() {
        let store = MemoryStore::new();
        let bag = BagService::new(&store);

        bag.add_item(&polo(), 2).await.unwrap();
        let items = bag.update_quantity(&ProductId::new("1"), 0).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_update_quantity_for_absent_line_is_noop() {
        let store = MemoryStore::new();
        let bag = BagService::new(&store);

        bag.add_item(&polo(), 1).await.unwrap();
        let items = bag.update_quantity(&ProductId::new("99"), 5).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_corrupt_bag_reads_as_empty_and_resets_on_write() {
        let store = MemoryStore::with_pairs([(keys::SHOPPING_BAG, "not json")]);
        let bag = BagService::new(&store);

        assert!(bag.items().await.unwrap().is_empty());
        bag.add_item(&polo(), 1).await.unwrap();
        assert_eq!(bag.items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_line_is_dropped_not_fatal() {
        let raw = r#"[
            {"id":"1","name":"Polo","price":"45.00","quantity":2},
            {"this is": "not a bag line"}
        ]"#;
        let store = MemoryStore::with_pairs([(keys::SHOPPING_BAG, raw)]);
        let bag = BagService::new(&store);

        let items = bag.items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().name, "Polo");
    }

    #[tokio::test]
    async fn test_clear_empties_the_bag() {
        let store = MemoryStore::new();
        let bag = BagService::new(&store);

        bag.add_item(&polo(), 2).await.unwrap();
        bag.clear().await.unwrap();
        assert!(bag.items().await.unwrap().is_empty());
        assert_eq!(bag.total_price().await.unwrap(), Decimal::ZERO);
    }
}
