//! Velvet Mango CLI - storefront and back-office over a local SQLite store.
//!
//! # Usage
//!
//! ```bash
//! # Browse and shop
//! vmango shop register -n "Alice" -e alice@example.com -p secret
//! vmango shop login -e alice@example.com -p secret
//! vmango shop products
//! vmango shop bag add 4 --quantity 2
//! vmango shop checkout
//!
//! # Run the back-office
//! vmango admin login -e admin@fashion.com -p admin123
//! vmango admin orders list
//! vmango admin settings set-threshold 10
//! ```
//!
//! The database file defaults to `vmango.db` and can be overridden with
//! `--db` or the `VMANGO_DB` environment variable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod store;

use store::SqliteStore;

#[derive(Parser)]
#[command(name = "vmango")]
#[command(author, version, about = "Velvet Mango shop and back-office CLI")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, env = "VMANGO_DB", default_value = "vmango.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer-facing shopping commands
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Back-office commands
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ShopAction {
    /// Register a new customer account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in as a customer
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show who is logged in
    Status,
    /// List the product catalog
    Products,
    /// Search the catalog by name or description
    Search {
        /// Search text
        query: String,
    },
    /// Shopping bag operations
    Bag {
        #[command(subcommand)]
        action: BagAction,
    },
    /// Place an order for the current bag
    Checkout,
    /// Show the logged-in customer's order history
    Orders,
}

#[derive(Subcommand)]
enum BagAction {
    /// Add a product to the bag
    Add {
        /// Product id
        id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Show the bag contents and total
    Show,
    /// Remove a product from the bag
    Remove {
        /// Product id
        id: String,
    },
    /// Set a line's quantity (zero removes it)
    SetQuantity {
        /// Product id
        id: String,
        quantity: i64,
    },
    /// Empty the bag
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log in as the back-office admin
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log the admin out
    Logout,
    /// Catalog management
    Products {
        #[command(subcommand)]
        action: AdminProductAction,
    },
    /// Order oversight
    Orders {
        #[command(subcommand)]
        action: AdminOrderAction,
    },
    /// Customer administration
    Users {
        #[command(subcommand)]
        action: AdminUserAction,
    },
    /// Notification triage
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
    /// Back-office settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Search products, orders, and customers in one pass
    Search {
        /// Search text
        query: String,
    },
    /// Seed the catalog with the starter products if it is absent
    Seed,
    /// Dashboard figures
    Dashboard {
        /// Also show a per-month breakdown for this year
        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
enum AdminProductAction {
    /// List the catalog
    List,
    /// Add a product
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        price: Decimal,
        #[arg(short, long, default_value = "")]
        image: String,
        #[arg(short, long)]
        category: String,
        #[arg(short, long, default_value_t = 0)]
        quantity: u32,
    },
    /// Set a product's stock quantity
    SetQuantity {
        /// Product id
        id: String,
        quantity: u32,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum AdminOrderAction {
    /// List every order across all customers
    List,
    /// Change an order's status
    SetStatus {
        /// Email of the customer who placed the order
        #[arg(short, long)]
        email: String,
        /// Order id
        id: String,
        /// New status (pending, processing, shipped, delivered, cancelled)
        status: String,
    },
}

#[derive(Subcommand)]
enum AdminUserAction {
    /// List registered customers
    List,
    /// Create an account for a customer
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Delete a customer account
    Delete {
        /// Customer email
        email: String,
    },
}

#[derive(Subcommand)]
enum NotificationAction {
    /// List recent notifications
    List,
    /// Mark every notification as read
    ReadAll,
    /// Dismiss one notification
    Dismiss {
        /// Notification id
        id: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show current settings
    Show,
    /// Set the low-stock alert threshold
    SetThreshold { threshold: u32 },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(&cli.db).await?;

    match cli.command {
        Commands::Shop { action } => match action {
            ShopAction::Register {
                name,
                email,
                password,
            } => commands::shop::register(&store, &name, &email, &password).await?,
            ShopAction::Login { email, password } => {
                commands::shop::login(&store, &email, &password).await?;
            }
            ShopAction::Logout => commands::shop::logout(&store).await?,
            ShopAction::Status => commands::shop::status(&store).await?,
            ShopAction::Products => commands::shop::products(&store).await?,
            ShopAction::Search { query } => commands::shop::search(&store, &query).await?,
            ShopAction::Bag { action } => match action {
                BagAction::Add { id, quantity } => {
                    commands::shop::bag_add(&store, &id, quantity).await?;
                }
                BagAction::Show => commands::shop::bag_show(&store).await?,
                BagAction::Remove { id } => commands::shop::bag_remove(&store, &id).await?,
                BagAction::SetQuantity { id, quantity } => {
                    commands::shop::bag_set_quantity(&store, &id, quantity).await?;
                }
                BagAction::Clear => commands::shop::bag_clear(&store).await?,
            },
            ShopAction::Checkout => commands::shop::checkout(&store).await?,
            ShopAction::Orders => commands::shop::orders(&store).await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Login { email, password } => {
                commands::admin::login(&store, &email, &password).await?;
            }
            AdminAction::Logout => commands::admin::logout(&store).await?,
            AdminAction::Products { action } => match action {
                AdminProductAction::List => commands::admin::products_list(&store).await?,
                AdminProductAction::Add {
                    name,
                    description,
                    price,
                    image,
                    category,
                    quantity,
                } => {
                    commands::admin::product_add(
                        &store,
                        &name,
                        &description,
                        price,
                        &image,
                        &category,
                        quantity,
                    )
                    .await?;
                }
                AdminProductAction::SetQuantity { id, quantity } => {
                    commands::admin::product_set_quantity(&store, &id, quantity).await?;
                }
                AdminProductAction::Delete { id } => {
                    commands::admin::product_delete(&store, &id).await?;
                }
            },
            AdminAction::Orders { action } => match action {
                AdminOrderAction::List => commands::admin::orders_list(&store).await?,
                AdminOrderAction::SetStatus { email, id, status } => {
                    commands::admin::order_set_status(&store, &email, &id, &status).await?;
                }
            },
            AdminAction::Users { action } => match action {
                AdminUserAction::List => commands::admin::users_list(&store).await?,
                AdminUserAction::Add {
                    name,
                    email,
                    password,
                } => commands::admin::user_add(&store, &name, &email, &password).await?,
                AdminUserAction::Delete { email } => {
                    commands::admin::user_delete(&store, &email).await?;
                }
            },
            AdminAction::Notifications { action } => match action {
                NotificationAction::List => commands::admin::notifications_list(&store).await?,
                NotificationAction::ReadAll => {
                    commands::admin::notifications_read_all(&store).await?;
                }
                NotificationAction::Dismiss { id } => {
                    commands::admin::notification_dismiss(&store, &id).await?;
                }
            },
            AdminAction::Settings { action } => match action {
                SettingsAction::Show => commands::admin::settings_show(&store).await?,
                SettingsAction::SetThreshold { threshold } => {
                    commands::admin::settings_set_threshold(&store, threshold).await?;
                }
            },
            AdminAction::Search { query } => commands::admin::search(&store, &query).await?,
            AdminAction::Seed => commands::admin::seed(&store).await?,
            AdminAction::Dashboard { year } => commands::admin::dashboard(&store, year).await?,
        },
    }
    Ok(())
}
