//! Storefront services.

pub mod auth;
pub mod bag;
pub mod catalog;
pub mod checkout;
