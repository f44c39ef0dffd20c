//! Back-office commands.
//!
//! Everything except `login` requires an admin session, mirroring the
//! gating in the app screens.

use rust_decimal::Decimal;

use velvet_mango_admin::{
    AdminConfig, AdminError, AdminOrderService, AdminUserService, DashboardService, NewProduct,
    NewUserAccount, ProductService, ProductUpdate, SearchService, SettingsService,
};
use velvet_mango_core::notifications::NotificationLog;
use velvet_mango_core::session::SessionManager;
use velvet_mango_core::types::{Email, NotificationId, OrderId, OrderStatus, ProductId};

use crate::store::SqliteStore;

type CommandResult = Result<(), AdminError>;

async fn require_admin(store: &SqliteStore) -> CommandResult {
    let session = SessionManager::new(store).check_status().await?;
    if session.is_admin() {
        Ok(())
    } else {
        Err(AdminError::Unauthorized)
    }
}

pub async fn login(store: &SqliteStore, email: &str, password: &str) -> CommandResult {
    let config = AdminConfig::from_env();
    SessionManager::new(store)
        .admin_login(&config.credentials, email, password)
        .await?;
    tracing::info!("Admin logged in");
    Ok(())
}

pub async fn logout(store: &SqliteStore) -> CommandResult {
    SessionManager::new(store).admin_logout().await?;
    tracing::info!("Admin logged out");
    Ok(())
}

pub async fn products_list(store: &SqliteStore) -> CommandResult {
    require_admin(store).await?;
    for product in ProductService::new(store).list().await? {
        tracing::info!(
            "{}  {} - ${} ({} in stock, {})",
            product.id,
            product.name,
            product.price,
            product.quantity,
            product.category
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn product_add(
    store: &SqliteStore,
    name: &str,
    description: &str,
    price: Decimal,
    image: &str,
    category: &str,
    quantity: u32,
) -> CommandResult {
    require_admin(store).await?;
    let product = ProductService::new(store)
        .create(NewProduct {
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            image: image.to_owned(),
            category: category.to_owned(),
            quantity,
            tags: Vec::new(),
        })
        .await?;
    tracing::info!("Created product {} ({})", product.name, product.id);
    Ok(())
}

pub async fn product_set_quantity(
    store: &SqliteStore,
    product_id: &str,
    quantity: u32,
) -> CommandResult {
    require_admin(store).await?;
    let product = ProductService::new(store)
        .update(
            &ProductId::new(product_id),
            ProductUpdate {
                quantity: Some(quantity),
                ..ProductUpdate::default()
            },
        )
        .await?;
    tracing::info!("{} now has {} in stock", product.name, product.quantity);
    Ok(())
}

pub async fn product_delete(store: &SqliteStore, product_id: &str) -> CommandResult {
    require_admin(store).await?;
    ProductService::new(store)
        .delete(&ProductId::new(product_id))
        .await?;
    tracing::info!("Deleted product {product_id}");
    Ok(())
}

pub async fn seed(store: &SqliteStore) -> CommandResult {
    require_admin(store).await?;
    let products = ProductService::new(store).list().await?;
    tracing::info!("Catalog holds {} products", products.len());
    Ok(())
}

pub async fn orders_list(store: &SqliteStore) -> CommandResult {
    require_admin(store).await?;
    for order in AdminOrderService::new(store).list_all().await? {
        let customer = order
            .user_email
            .as_ref()
            .map_or("(unknown)", Email::as_str);
        tracing::info!(
            "{}  {}  {}  ${}  {}",
            order.id,
            order.date.format("%Y-%m-%d %H:%M"),
            customer,
            order.total_price,
            order.status
        );
    }
    Ok(())
}

pub async fn order_set_status(
    store: &SqliteStore,
    customer: &str,
    order_id: &str,
    status: &str,
) -> CommandResult {
    require_admin(store).await?;
    let email = Email::parse(customer).map_err(|e| AdminError::Validation(e.to_string()))?;
    let status = OrderStatus::from(status.to_owned());
    let order = AdminOrderService::new(store)
        .update_status(&email, &OrderId::new(order_id), status)
        .await?;
    tracing::info!("Order {} is now {}", order.id, order.status);
    Ok(())
}

pub async fn search(store: &SqliteStore, query: &str) -> CommandResult {
    require_admin(store).await?;
    let results = SearchService::new(store).search(query).await?;
    for product in &results.products {
        tracing::info!("product  {}  {} ({})", product.id, product.name, product.category);
    }
    for order in &results.orders {
        let customer = order.user_email.as_ref().map_or("(unknown)", Email::as_str);
        tracing::info!("order    {}  {}  {}", order.id, customer, order.status);
    }
    for user in &results.users {
        tracing::info!("user     {}  {}", user.email, user.name);
    }
    tracing::info!("{} matches", results.total());
    Ok(())
}

pub async fn users_list(store: &SqliteStore) -> CommandResult {
    require_admin(store).await?;
    for user in AdminUserService::new(store).list().await? {
        tracing::info!(
            "{}  {} (registered {})",
            user.email,
            user.name,
            user.registered_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

pub async fn user_add(store: &SqliteStore, name: &str, email: &str, password: &str) -> CommandResult {
    require_admin(store).await?;
    let user = AdminUserService::new(store)
        .create(NewUserAccount {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        })
        .await?;
    tracing::info!("Created user {} ({})", user.name, user.email);
    Ok(())
}

pub async fn user_delete(store: &SqliteStore, email: &str) -> CommandResult {
    require_admin(store).await?;
    let email = Email::parse(email).map_err(|e| AdminError::Validation(e.to_string()))?;
    AdminUserService::new(store).delete(&email).await?;
    tracing::info!("Deleted user {email}");
    Ok(())
}

pub async fn notifications_list(store: &SqliteStore) -> CommandResult {
    require_admin(store).await?;
    let log = NotificationLog::new(store);
    for n in log.recent().await? {
        let marker = if n.is_read { " " } else { "*" };
        tracing::info!(
            "{marker} {}  [{}] {} - {}",
            n.id,
            n.kind.as_str(),
            n.title,
            n.message
        );
    }
    tracing::info!("{} unread", log.unread_count().await?);
    Ok(())
}

pub async fn notifications_read_all(store: &SqliteStore) -> CommandResult {
    require_admin(store).await?;
    NotificationLog::new(store).mark_all_read().await?;
    tracing::info!("All notifications marked read");
    Ok(())
}

pub async fn notification_dismiss(store: &SqliteStore, id: &str) -> CommandResult {
    require_admin(store).await?;
    NotificationLog::new(store)
        .dismiss(&NotificationId::new(id))
        .await?;
    tracing::info!("Dismissed {id}");
    Ok(())
}

pub async fn settings_show(store: &SqliteStore) -> CommandResult {
    require_admin(store).await?;
    let threshold = SettingsService::new(store).low_stock_threshold().await?;
    tracing::info!("Low-stock threshold: {threshold}");
    Ok(())
}

pub async fn settings_set_threshold(store: &SqliteStore, threshold: u32) -> CommandResult {
    require_admin(store).await?;
    SettingsService::new(store)
        .set_low_stock_threshold(threshold)
        .await?;
    tracing::info!("Low-stock threshold set to {threshold}");
    Ok(())
}

pub async fn dashboard(store: &SqliteStore, year: Option<i32>) -> CommandResult {
    require_admin(store).await?;
    let service = DashboardService::new(store);

    let summary = service.summary().await?;
    tracing::info!(
        "{} orders, ${} income, {} customers, {} products",
        summary.total_orders,
        summary.total_income,
        summary.total_users,
        summary.total_products
    );

    if let Some(year) = year {
        let breakdown = service.monthly_breakdown(year).await?;
        for (month, (count, income)) in breakdown
            .orders
            .iter()
            .zip(breakdown.income.iter())
            .enumerate()
        {
            tracing::info!("{year}-{:02}: {count} orders, ${income}", month + 1);
        }
    }
    Ok(())
}
