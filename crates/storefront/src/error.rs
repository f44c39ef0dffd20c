//! Unified storefront error.
//!
//! Individual services expose their own error enums; frontends that drive
//! several of them (the CLI) can funnel everything through [`StorefrontError`].

use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::bag::BagError;
use crate::services::catalog::CatalogError;
use crate::services::checkout::CheckoutError;
use velvet_mango_core::session::SessionError;
use velvet_mango_core::types::ProductId;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Registration, login, or profile operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Bag operation failed.
    #[error("bag error: {0}")]
    Bag(#[from] BagError),

    /// Catalog read failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout failed; the bag is untouched.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Session update failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// The flow needs a customer identity and no session carries one.
    #[error("no customer is logged in")]
    NotLoggedIn,

    /// A product id named by the caller is not in the catalog.
    #[error("no product with id {0}")]
    UnknownProduct(ProductId),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
