//! Low-stock alerting across inventory edits and the settings screen.

#![allow(clippy::unwrap_used)]

use velvet_mango_admin::{NewProduct, ProductService, ProductUpdate, SettingsService};
use velvet_mango_core::NotificationKind;
use velvet_mango_core::notifications::NotificationLog;
use velvet_mango_core::store::MemoryStore;

fn new_product(name: &str, quantity: u32) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        description: format!("{name} (test fixture)"),
        price: rust_decimal::Decimal::new(4500, 2),
        image: String::new(),
        category: "Tops".to_owned(),
        quantity,
        tags: Vec::new(),
    }
}

fn quantity_update(quantity: u32) -> ProductUpdate {
    ProductUpdate {
        quantity: Some(quantity),
        ..ProductUpdate::default()
    }
}

fn empty_catalog_store() -> MemoryStore {
    MemoryStore::with_pairs([("admin_products", "[]")])
}

#[tokio::test]
async fn test_dropping_below_threshold_alerts_exactly_once() {
    let store = empty_catalog_store();
    SettingsService::new(&store)
        .set_low_stock_threshold(10)
        .await
        .unwrap();

    let products = ProductService::new(&store);
    let created = products.create(new_product("Polo", 15)).await.unwrap();
    products
        .update(&created.id, quantity_update(8))
        .await
        .unwrap();

    let log = NotificationLog::new(&store);
    let recent = log.recent().await.unwrap();
    assert_eq!(recent.len(), 1);
    let alert = recent.first().unwrap();
    assert_eq!(alert.kind, NotificationKind::Stock);
    assert_eq!(alert.item_id.as_deref(), Some(created.id.as_str()));
}

#[tokio::test]
async fn test_staying_below_threshold_stays_quiet() {
    let store = empty_catalog_store();
    // Default threshold is 5.
    let products = ProductService::new(&store);
    let created = products.create(new_product("Polo", 10)).await.unwrap();

    products
        .update(&created.id, quantity_update(3))
        .await
        .unwrap();
    products
        .update(&created.id, quantity_update(3))
        .await
        .unwrap();
    products
        .update(&created.id, quantity_update(1))
        .await
        .unwrap();

    assert_eq!(
        NotificationLog::new(&store).recent().await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_restock_rearms_the_alert() {
    let store = empty_catalog_store();
    let products = ProductService::new(&store);
    let created = products.create(new_product("Polo", 10)).await.unwrap();

    products.update(&created.id, quantity_update(2)).await.unwrap();
    products.update(&created.id, quantity_update(20)).await.unwrap();
    products.update(&created.id, quantity_update(4)).await.unwrap();

    assert_eq!(
        NotificationLog::new(&store).recent().await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_threshold_change_applies_to_later_edits() {
    let store = empty_catalog_store();
    let settings = SettingsService::new(&store);
    let products = ProductService::new(&store);
    let created = products.create(new_product("Polo", 20)).await.unwrap();

    // Under the default threshold of 5, dropping to 7 is fine.
    products.update(&created.id, quantity_update(7)).await.unwrap();
    assert!(NotificationLog::new(&store).recent().await.unwrap().is_empty());

    // Raise the bar: the next drop across it alerts.
    settings.set_low_stock_threshold(10).await.unwrap();
    products.update(&created.id, quantity_update(12)).await.unwrap();
    products.update(&created.id, quantity_update(6)).await.unwrap();
    assert_eq!(
        NotificationLog::new(&store).recent().await.unwrap().len(),
        1
    );
}
