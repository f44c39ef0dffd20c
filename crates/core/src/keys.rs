//! The persisted key space.
//!
//! Every piece of application state lives under one of these keys. Fixed
//! keys hold a single JSON blob; the `user_` and `orders_` families hold one
//! blob per customer, keyed by email.
//!
//! | Key | Value |
//! |---|---|
//! | `user_<email>` | one [`crate::User`] record |
//! | `orders_<email>` | array of [`crate::Order`] |
//! | `admin_products` | array of [`crate::Product`] |
//! | `admin_notifications` | array of [`crate::Notification`], capped |
//! | `admin_settings_low_stock_threshold` | stringified integer |
//! | `session` | tagged [`crate::Session`] value |
//! | `shoppingBag` | array of [`crate::BagItem`] |

use crate::types::Email;

/// Prefix for per-user profile records.
pub const USER_PREFIX: &str = "user_";

/// Prefix for per-user order arrays.
pub const ORDERS_PREFIX: &str = "orders_";

/// The whole product catalog, as one array.
pub const ADMIN_PRODUCTS: &str = "admin_products";

/// The admin notification log, newest first.
pub const ADMIN_NOTIFICATIONS: &str = "admin_notifications";

/// Low-stock alert threshold, stored as a stringified integer.
pub const LOW_STOCK_THRESHOLD: &str = "admin_settings_low_stock_threshold";

/// The current login session (sum-typed, see [`crate::Session`]).
pub const SESSION: &str = "session";

/// The shopping bag, global per installation.
pub const SHOPPING_BAG: &str = "shoppingBag";

/// Legacy client-session key, read once at startup and migrated away.
pub const LEGACY_CLIENT_SESSION: &str = "loggedInUserEmail";

/// Legacy admin-session flag, read once at startup and migrated away.
pub const LEGACY_ADMIN_SESSION: &str = "isAdminLoggedInStatus";

/// Storage key for a user's profile record.
#[must_use]
pub fn user(email: &Email) -> String {
    format!("{USER_PREFIX}{email}")
}

/// Storage key for a user's order array.
#[must_use]
pub fn orders(email: &Email) -> String {
    format!("{ORDERS_PREFIX}{email}")
}

/// Extract the email suffix from a `user_` key, if it is one.
#[must_use]
pub fn email_from_user_key(key: &str) -> Option<&str> {
    key.strip_prefix(USER_PREFIX)
}

/// Extract the email suffix from an `orders_` key, if it is one.
///
/// Orders are expected to carry their own `userEmail` field; this suffix is
/// the fallback identity when a record predates that field.
#[must_use]
pub fn email_from_orders_key(key: &str) -> Option<&str> {
    key.strip_prefix(ORDERS_PREFIX)
}
