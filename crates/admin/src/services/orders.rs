//! Order oversight across every customer.
//!
//! There is no global order index; the back-office view is assembled by
//! scanning every `orders_<email>` key. Reads are lenient so one customer's
//! corrupt history does not blank the whole screen, but a status update
//! rewrites a history blob and therefore insists on decoding it cleanly.

use tracing::warn;

use velvet_mango_core::entities::codec;
use velvet_mango_core::store::KvStore;
use velvet_mango_core::types::{Email, OrderId, OrderStatus};
use velvet_mango_core::{Order, keys};

use crate::error::{AdminError, Result};

/// Back-office order service.
pub struct AdminOrderService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> AdminOrderService<'a, S> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every order across every customer, newest first.
    ///
    /// Each order carries its customer email: from the record itself when
    /// present, backfilled from the key suffix for records that predate the
    /// field. A key whose suffix is not a usable email and whose records
    /// carry none is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] if the key scan fails.
    pub async fn list_all(&self) -> Result<Vec<Order>> {
        let mut all = Vec::new();
        for key in self.store.list_keys().await? {
            let Some(suffix) = keys::email_from_orders_key(&key) else {
                continue;
            };
            let Some(raw) = self.store.get(&key).await? else {
                continue;
            };
            let decoded = match codec::decode_array::<Order>(&raw) {
                Ok(decoded) => {
                    if decoded.is_lossy() {
                        warn!(%key, skipped = decoded.skipped, "dropped malformed orders");
                    }
                    decoded.records
                }
                Err(err) => {
                    warn!(%key, error = %err, "order history unreadable, skipping");
                    continue;
                }
            };

            let key_email = Email::parse(suffix).ok();
            for mut order in decoded {
                if order.user_email.is_none() {
                    match &key_email {
                        Some(email) => order.user_email = Some(email.clone()),
                        None => {
                            warn!(%key, order = %order.id, "order has no attributable customer, skipping");
                            continue;
                        }
                    }
                }
                all.push(order);
            }
        }
        all.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(all)
    }

    /// Look up one of a customer's orders by id.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if that customer has no such order.
    pub async fn get(&self, email: &Email, id: &OrderId) -> Result<Order> {
        let key = keys::orders(email);
        let Some(raw) = self.store.get(&key).await? else {
            return Err(AdminError::NotFound(format!("order {id} for {email}")));
        };
        let decoded = codec::decode_array::<Order>(&raw)?;
        if decoded.is_lossy() {
            warn!(%key, skipped = decoded.skipped, "dropped malformed orders");
        }
        decoded
            .records
            .into_iter()
            .find(|order| &order.id == id)
            .ok_or_else(|| AdminError::NotFound(format!("order {id} for {email}")))
    }

    /// Change an order's status, rewriting that customer's history blob.
    ///
    /// The rewrite insists on a clean decode of the whole blob; dropping a
    /// record it could not read would destroy it on the write back.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if that customer has no such order
    /// and [`AdminError::Conflict`] if the history changed concurrently.
    pub async fn update_status(
        &self,
        email: &Email,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order> {
        let key = keys::orders(email);
        let Some(raw) = self.store.get(&key).await? else {
            return Err(AdminError::NotFound(format!("order {id} for {email}")));
        };
        let mut history: Vec<Order> = codec::decode_array_strict(&raw)?;
        let Some(order) = history.iter_mut().find(|o| &o.id == id) else {
            return Err(AdminError::NotFound(format!("order {id} for {email}")));
        };

        order.status = status;
        let updated = order.clone();
        let encoded = codec::encode(&history)?;
        if !self
            .store
            .compare_and_swap(&key, Some(&raw), &encoded)
            .await?
        {
            return Err(AdminError::Conflict);
        }
        Ok(updated)
    }
}
