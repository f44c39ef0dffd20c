//! Customer-facing commands.
//!
//! Each command maps to one storefront flow. Commands that act on behalf of
//! a customer (checkout, order history) take the identity from the stored
//! session rather than from arguments.

use velvet_mango_core::session::SessionManager;
use velvet_mango_core::types::{Email, ProductId};
use velvet_mango_storefront::{
    AuthService, BagService, CatalogService, CheckoutService, NewCustomer, StorefrontError,
};

use crate::store::SqliteStore;

type CommandResult = Result<(), StorefrontError>;

/// Who the stored session says is logged in, or an error if nobody is.
async fn require_client(store: &SqliteStore) -> Result<Email, StorefrontError> {
    let session = SessionManager::new(store).check_status().await?;
    session
        .client_email()
        .cloned()
        .ok_or(StorefrontError::NotLoggedIn)
}

pub async fn register(store: &SqliteStore, name: &str, email: &str, password: &str) -> CommandResult {
    let user = AuthService::new(store)
        .register(NewCustomer {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            middlename: None,
            gender: None,
            age: None,
        })
        .await?;
    tracing::info!("Registered {} ({})", user.name, user.email);
    Ok(())
}

pub async fn login(store: &SqliteStore, email: &str, password: &str) -> CommandResult {
    let user = AuthService::new(store).login(email, password).await?;
    SessionManager::new(store).login(user.email.clone()).await?;
    tracing::info!("Logged in as {}", user.email);
    Ok(())
}

pub async fn logout(store: &SqliteStore) -> CommandResult {
    SessionManager::new(store).logout().await?;
    tracing::info!("Logged out");
    Ok(())
}

pub async fn status(store: &SqliteStore) -> CommandResult {
    let session = SessionManager::new(store).check_status().await?;
    match session.client_email() {
        Some(email) => tracing::info!("Logged in as {email}"),
        None if session.is_admin() => tracing::info!("Admin is logged in"),
        None => tracing::info!("Nobody is logged in"),
    }
    Ok(())
}

pub async fn products(store: &SqliteStore) -> CommandResult {
    for product in CatalogService::new(store).fetch_products().await? {
        tracing::info!(
            "{}  {} - ${} ({} in stock)",
            product.id,
            product.name,
            product.price,
            product.quantity
        );
    }
    Ok(())
}

pub async fn search(store: &SqliteStore, query: &str) -> CommandResult {
    let matches = CatalogService::new(store).search(query).await?;
    if matches.is_empty() {
        tracing::info!("No products match {query:?}");
        return Ok(());
    }
    for product in matches {
        tracing::info!(
            "{}  {} - ${} ({} in stock)",
            product.id,
            product.name,
            product.price,
            product.quantity
        );
    }
    Ok(())
}

pub async fn bag_add(store: &SqliteStore, product_id: &str, quantity: u32) -> CommandResult {
    let id = ProductId::new(product_id);
    let Some(product) = CatalogService::new(store).fetch_product_by_id(&id).await? else {
        return Err(StorefrontError::UnknownProduct(id));
    };
    BagService::new(store).add_item(&product, quantity).await?;
    tracing::info!("Added {} x {}", quantity, product.name);
    Ok(())
}

pub async fn bag_show(store: &SqliteStore) -> CommandResult {
    let bag = BagService::new(store);
    let items = bag.items().await?;
    if items.is_empty() {
        tracing::info!("The bag is empty");
        return Ok(());
    }
    for item in &items {
        tracing::info!(
            "{}  {} x{} - ${}",
            item.id,
            item.name,
            item.quantity,
            item.line_total()
        );
    }
    tracing::info!("Total: ${}", bag.total_price().await?);
    Ok(())
}

pub async fn bag_remove(store: &SqliteStore, product_id: &str) -> CommandResult {
    BagService::new(store)
        .remove_item(&ProductId::new(product_id))
        .await?;
    tracing::info!("Removed {product_id} from the bag");
    Ok(())
}

pub async fn bag_set_quantity(store: &SqliteStore, product_id: &str, quantity: i64) -> CommandResult {
    BagService::new(store)
        .update_quantity(&ProductId::new(product_id), quantity)
        .await?;
    tracing::info!("Updated quantity for {product_id}");
    Ok(())
}

pub async fn bag_clear(store: &SqliteStore) -> CommandResult {
    BagService::new(store).clear().await?;
    tracing::info!("Bag cleared");
    Ok(())
}

pub async fn checkout(store: &SqliteStore) -> CommandResult {
    let email = require_client(store).await?;
    let order = CheckoutService::new(store).place_order(&email).await?;
    tracing::info!("Placed order {} for ${}", order.id, order.total_price);
    Ok(())
}

pub async fn orders(store: &SqliteStore) -> CommandResult {
    let email = require_client(store).await?;
    let history = CheckoutService::new(store).order_history(&email).await?;
    if history.is_empty() {
        tracing::info!("No orders yet");
        return Ok(());
    }
    for order in history {
        tracing::info!(
            "{}  {}  ${}  {}",
            order.id,
            order.date.format("%Y-%m-%d %H:%M"),
            order.total_price,
            order.status
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn open_in_memory() -> SqliteStore {
        SqliteStore::open("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_checkout_without_login_is_refused() {
        let store = open_in_memory().await;
        let err = checkout(&store).await.unwrap_err();
        assert!(matches!(err, StorefrontError::NotLoggedIn));
    }

    #[tokio::test]
    async fn test_orders_without_login_is_refused() {
        let store = open_in_memory().await;
        let err = orders(&store).await.unwrap_err();
        assert!(matches!(err, StorefrontError::NotLoggedIn));
    }

    #[tokio::test]
    async fn test_bag_add_rejects_unknown_product() {
        let store = open_in_memory().await;
        let err = bag_add(&store, "no-such-id", 1).await.unwrap_err();
        assert!(matches!(err, StorefrontError::UnknownProduct(_)));
    }
}
