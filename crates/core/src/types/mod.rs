//! Core types for Velvet Mango.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod status;

pub use credential::{CredentialError, hash_password, verify_password};
pub use email::{Email, EmailError};
pub use id::*;
pub use status::OrderStatus;
