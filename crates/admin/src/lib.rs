//! Velvet Mango Admin - back-office management flows.
//!
//! Catalog and inventory management, order oversight across every customer,
//! customer administration, notification triage, settings, and the
//! dashboard. Services work directly against the key-value store, same as
//! the storefront side.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod services;

pub use config::AdminConfig;
pub use error::AdminError;
pub use services::dashboard::{DashboardService, DashboardSummary, MonthlyBreakdown};
pub use services::orders::AdminOrderService;
pub use services::products::{NewProduct, ProductService, ProductUpdate};
pub use services::search::{SearchResults, SearchService};
pub use services::settings::SettingsService;
pub use services::users::{AdminUserService, NewUserAccount};
