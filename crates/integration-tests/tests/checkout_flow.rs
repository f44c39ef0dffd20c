//! The bag-to-order flow, end to end.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use velvet_mango_core::notifications::NotificationLog;
use velvet_mango_core::store::{KvStore, MemoryStore};
use velvet_mango_core::types::{Email, OrderStatus};
use velvet_mango_core::{NotificationKind, keys};
use velvet_mango_integration_tests::{ReadOnlyStore, product};
use velvet_mango_storefront::{BagService, CheckoutError, CheckoutService};

fn priya() -> Email {
    Email::parse("priya@example.com").unwrap()
}

#[tokio::test]
async fn test_checkout_moves_bag_into_order_history() {
    let store = MemoryStore::new();
    let bag = BagService::new(&store);
    let checkout = CheckoutService::new(&store);

    bag.add_item(&product("1", "Striped Cotton Polo", 4500, 40), 2)
        .await
        .unwrap();
    bag.add_item(&product("4", "Leather Biker Jacket", 19900, 12), 1)
        .await
        .unwrap();

    let order = checkout.place_order(&priya()).await.unwrap();
    assert_eq!(order.total_price, Decimal::new(28900, 2));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);

    let history = checkout.order_history(&priya()).await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(bag.items().await.unwrap().is_empty());

    // The back-office heard about it.
    let latest = NotificationLog::new(&store).recent().await.unwrap().remove(0);
    assert_eq!(latest.kind, NotificationKind::Order);
    assert_eq!(latest.item_id.as_deref(), Some(order.id.as_str()));
}

#[tokio::test]
async fn test_repeat_checkouts_grow_the_history() {
    let store = MemoryStore::new();
    let bag = BagService::new(&store);
    let checkout = CheckoutService::new(&store);
    let polo = product("1", "Striped Cotton Polo", 4500, 40);

    for _ in 0..3 {
        bag.add_item(&polo, 1).await.unwrap();
        checkout.place_order(&priya()).await.unwrap();
    }

    let history = checkout.order_history(&priya()).await.unwrap();
    assert_eq!(history.len(), 3);
    // Every order id is distinct.
    let mut ids: Vec<_> = history.iter().map(|o| o.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_failed_order_write_preserves_the_bag() {
    let store = MemoryStore::new();
    BagService::new(&store)
        .add_item(&product("1", "Striped Cotton Polo", 4500, 40), 2)
        .await
        .unwrap();

    // Persistence goes read-only mid-flow.
    let frozen = ReadOnlyStore::new(store);
    let result = CheckoutService::new(&frozen).place_order(&priya()).await;
    assert!(matches!(result, Err(CheckoutError::Store(_))));

    let store = frozen.into_inner();
    assert_eq!(BagService::new(&store).items().await.unwrap().len(), 1);
    assert_eq!(store.get(&keys::orders(&priya())).await.unwrap(), None);
}

#[tokio::test]
async fn test_corrupt_history_blocks_checkout_without_losing_the_bag() {
    let store = MemoryStore::new();
    let bag = BagService::new(&store);
    bag.add_item(&product("1", "Striped Cotton Polo", 4500, 40), 1)
        .await
        .unwrap();
    store
        .set(&keys::orders(&priya()), "[{\"junk\":true}]")
        .await
        .unwrap();

    let result = CheckoutService::new(&store).place_order(&priya()).await;
    assert!(matches!(result, Err(CheckoutError::CorruptHistory(_))));
    assert_eq!(bag.items().await.unwrap().len(), 1);
}
