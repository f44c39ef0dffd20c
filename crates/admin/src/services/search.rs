//! Cross-entity back-office search.
//!
//! One query box over three record types. Each entity matches on the
//! fields an admin would actually type: products on name, category,
//! description, or tags; orders on id, customer email, or status;
//! customers on name or email.

use velvet_mango_core::store::KvStore;
use velvet_mango_core::{Order, Product, User};

use crate::error::Result;
use crate::services::orders::AdminOrderService;
use crate::services::products::ProductService;
use crate::services::users::AdminUserService;

/// Everything a query matched, grouped by entity.
#[derive(Debug, Default)]
pub struct SearchResults {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub users: Vec<User>,
}

impl SearchResults {
    /// Match count across all three groups.
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len() + self.orders.len() + self.users.len()
    }
}

/// Substring search across products, orders, and customers.
pub struct SearchService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> SearchService<'a, S> {
    /// Create a new search service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Case-insensitive substring search. A blank query matches nothing.
    ///
    /// Orders keep their newest-first ordering and customers their
    /// newest-registration-first ordering from the underlying listings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AdminError::Store`] if any of the underlying
    /// listings fail to read.
    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(SearchResults::default());
        }

        let products = ProductService::new(self.store)
            .list()
            .await?
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect();

        let orders = AdminOrderService::new(self.store)
            .list_all()
            .await?
            .into_iter()
            .filter(|o| {
                o.id.as_str().to_lowercase().contains(&needle)
                    || o.user_email
                        .as_ref()
                        .is_some_and(|e| e.as_str().to_lowercase().contains(&needle))
                    || o.status.to_string().to_lowercase().contains(&needle)
            })
            .collect();

        let users = AdminUserService::new(self.store)
            .list()
            .await?
            .into_iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle)
                    || u.email.as_str().to_lowercase().contains(&needle)
            })
            .collect();

        Ok(SearchResults {
            products,
            orders,
            users,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use velvet_mango_core::entities::codec;
    use velvet_mango_core::store::MemoryStore;
    use velvet_mango_core::types::{Email, OrderId, OrderStatus};

    use crate::services::users::NewUserAccount;

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        // First catalog read writes the starter products back.
        ProductService::new(&store).list().await.unwrap();

        AdminUserService::new(&store)
            .create(NewUserAccount {
                name: "Alice Vaughn".to_owned(),
                email: "alice@x.com".to_owned(),
                password: "pw123".to_owned(),
            })
            .await
            .unwrap();

        let order = Order {
            id: OrderId::new("order_77_abc"),
            date: Utc::now(),
            items: Vec::new(),
            total_price: Decimal::new(4500, 2),
            user_email: Some(Email::parse("alice@x.com").unwrap()),
            status: OrderStatus::Shipped,
        };
        store
            .set("orders_alice@x.com", &codec::encode(&[order]).unwrap())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_products_match_on_tags_and_category() {
        let store = seeded_store().await;
        let search = SearchService::new(&store);

        let by_category = search.search("outerwear").await.unwrap();
        assert!(!by_category.products.is_empty());
        assert!(by_category.products.iter().all(|p| p.category == "Outerwear"));

        // "wedge" appears only as a tag on one sandal.
        let by_tag = search.search("wedge").await.unwrap();
        assert_eq!(by_tag.products.len(), 1);
        assert_eq!(by_tag.products.first().unwrap().name, "Platform Wedge Sandal");
    }

    #[tokio::test]
    async fn test_orders_match_on_id_email_and_status() {
        let store = seeded_store().await;
        let search = SearchService::new(&store);

        assert_eq!(search.search("order_77").await.unwrap().orders.len(), 1);
        assert_eq!(search.search("shipped").await.unwrap().orders.len(), 1);
        // The email hits the order and the customer record both.
        let by_email = search.search("alice@x.com").await.unwrap();
        assert_eq!(by_email.orders.len(), 1);
        assert_eq!(by_email.users.len(), 1);
    }

    #[tokio::test]
    async fn test_users_match_on_name() {
        let store = seeded_store().await;
        let results = SearchService::new(&store).search("vaughn").await.unwrap();
        assert_eq!(results.users.len(), 1);
        assert!(results.products.is_empty());
        assert!(results.orders.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_matches_nothing() {
        let store = seeded_store().await;
        let results = SearchService::new(&store).search("  ").await.unwrap();
        assert_eq!(results.total(), 0);
    }
}
