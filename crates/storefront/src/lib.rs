//! Velvet Mango Storefront - client-facing shopping flows.
//!
//! Everything a customer-facing screen needs: registration and login,
//! the shopping bag, catalog browsing, and checkout. Each service works
//! directly against the key-value store; there is no intermediate layer.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod services;

pub use error::StorefrontError;
pub use services::auth::{AuthError, AuthService, NewCustomer, ProfileUpdate};
pub use services::bag::{BagError, BagService};
pub use services::catalog::{CatalogError, CatalogService};
pub use services::checkout::{CheckoutError, CheckoutService};
