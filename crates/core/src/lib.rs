//! Velvet Mango Core - Shared types and storage model.
//!
//! This crate provides the pieces every Velvet Mango component builds on:
//! - `storefront` - Client-facing shopping flows (bag, checkout, catalog)
//! - `admin` - Back-office flows (products, orders, notifications, users)
//! - `cli` - Command-line frontend for both
//!
//! # Architecture
//!
//! All persistent state lives in an async, string-keyed, string-valued
//! key-value store behind the [`store::KvStore`] trait. Every aggregate
//! (bag, order list, catalog, notification log) is one JSON blob under one
//! well-known key (see [`keys`]), read and written wholesale. There are no
//! partial updates; single-key writes go through compare-and-swap so a
//! concurrent writer surfaces as a conflict instead of a silent lost update.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, ids, prices, and statuses
//! - [`entities`] - The persisted domain records and their JSON codecs
//! - [`keys`] - The persisted key space
//! - [`store`] - The key-value store abstraction and an in-memory impl
//! - [`session`] - The sum-typed login session and its persistence
//! - [`notifications`] - The capped admin notification log
//! - [`seed`] - The bundled starter catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod entities;
pub mod keys;
pub mod notifications;
pub mod seed;
pub mod session;
pub mod store;
pub mod types;

pub use entities::{BagItem, Notification, NotificationKind, Order, OrderItem, Product, User};
pub use session::Session;
pub use store::{KvStore, StoreError};
pub use types::*;
