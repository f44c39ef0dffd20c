//! Checkout: turn the shopping bag into an order.
//!
//! Orders are an append-only per-customer history under `orders_<email>`.
//! Unlike the bag and the notification log, order history is never repaired
//! by dropping entries: a blob that does not decode cleanly aborts the
//! checkout, and the bag is left untouched so nothing is lost.

use chrono::Utc;
use thiserror::Error;
use tracing::warn;

use velvet_mango_core::entities::codec::{self, CodecError};
use velvet_mango_core::notifications::{NewNotification, NotificationLog};
use velvet_mango_core::store::{KvStore, StoreError};
use velvet_mango_core::types::{Email, OrderId, base36};
use velvet_mango_core::{BagItem, NotificationKind, Order, OrderItem, keys};

use super::bag::{BagError, BagService};

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The bag has no lines to order.
    #[error("cannot checkout an empty bag")]
    EmptyBag,

    /// The stored order history could not be decoded; checkout refuses to
    /// write next to data it cannot read.
    #[error("order history is unreadable: {0}")]
    CorruptHistory(CodecError),

    /// Another writer changed the order history during checkout.
    #[error("order history was modified concurrently")]
    Conflict,

    #[error("bag error: {0}")]
    Bag(#[from] BagError),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Checkout flow over a store.
pub struct CheckoutService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> CheckoutService<'a, S> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Place an order for the current bag contents.
    ///
    /// On success the order is appended to the customer's history, an order
    /// notification is recorded for the back-office (best effort), and the
    /// bag is emptied. On any failure the bag is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyBag`] for an empty bag,
    /// [`CheckoutError::CorruptHistory`] if the existing history does not
    /// decode, and [`CheckoutError::Conflict`] on a concurrent write.
    pub async fn place_order(&self, email: &Email) -> Result<Order, CheckoutError> {
        let bag = BagService::new(self.store);
        let lines = bag.items().await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyBag);
        }

        let now = Utc::now();
        let order = Order {
            id: OrderId::new(format!(
                "order_{}_{}",
                now.timestamp_millis(),
                base36(rand::random::<u64>())
            )),
            date: now,
            total_price: lines.iter().map(BagItem::line_total).sum(),
            items: lines.into_iter().map(Self::order_line).collect(),
            user_email: Some(email.clone()),
            status: velvet_mango_core::types::OrderStatus::Pending,
        };

        let key = keys::orders(email);
        let raw = self.store.get(&key).await?;
        let mut history: Vec<Order> = match raw.as_deref() {
            Some(blob) => codec::decode_array_strict(blob)
                .map_err(CheckoutError::CorruptHistory)?,
            None => Vec::new(),
        };
        history.push(order.clone());

        let encoded = codec::encode(&history)?;
        if !self
            .store
            .compare_and_swap(&key, raw.as_deref(), &encoded)
            .await?
        {
            return Err(CheckoutError::Conflict);
        }

        let log = NotificationLog::new(self.store);
        let notify = log
            .add(NewNotification {
                title: "New Order Received!".to_owned(),
                message: format!(
                    "Order {} for ${} placed by {email}.",
                    order.id, order.total_price
                ),
                kind: NotificationKind::Order,
                item_id: Some(order.id.as_str().to_owned()),
            })
            .await;
        if let Err(err) = notify {
            warn!(error = %err, order = %order.id, "failed to record order notification");
        }

        // Only after the order is durable.
        bag.clear().await?;
        Ok(order)
    }

    fn order_line(line: BagItem) -> OrderItem {
        if line.image.is_none() {
            warn!(product = %line.id, "bag line has no usable image, ordering without one");
        }
        OrderItem {
            id: line.id,
            name: line.name,
            image: line.image,
            price: line.price,
            quantity: line.quantity,
        }
    }

    /// A customer's order history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CorruptHistory`] if the stored blob does
    /// not decode cleanly.
    pub async fn order_history(&self, email: &Email) -> Result<Vec<Order>, CheckoutError> {
        match self.store.get(&keys::orders(email)).await? {
            Some(raw) => {
                codec::decode_array_strict(&raw).map_err(CheckoutError::CorruptHistory)
            }
            None => Ok(Vec::new()),
        }
    }
}
