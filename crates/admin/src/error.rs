//! Shared error type for back-office services.

use thiserror::Error;

use velvet_mango_core::entities::codec::CodecError;
use velvet_mango_core::notifications::NotificationError;
use velvet_mango_core::session::SessionError;
use velvet_mango_core::store::StoreError;

/// Errors from back-office operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored blob could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Notification log operation failed.
    #[error("notification error: {0}")]
    Notification(#[from] NotificationError),

    /// Session operation failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// The caller has no admin session.
    #[error("admin is not logged in")]
    Unauthorized,

    /// Another writer changed the data between read and write.
    #[error("record was modified concurrently")]
    Conflict,

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
