//! Persisted domain records and their JSON codecs.
//!
//! Wire names are camelCase because that is what already sits in deployed
//! stores; the structs here are the typed view over those blobs. Collection
//! blobs are decoded through [`codec`], which repairs rather than rejects:
//! individually malformed records are dropped and counted so callers can log
//! them, instead of the whole collection silently becoming empty.

pub mod bag;
pub mod codec;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;

pub use bag::BagItem;
pub use codec::{CodecError, Decoded};
pub use notification::{Notification, NotificationKind};
pub use order::{Order, OrderItem};
pub use product::Product;
pub use user::User;
