//! The admin notification log.
//!
//! A bounded, newest-first list under `admin_notifications`. Both sides of
//! the app write to it: the storefront on checkout and registration, the
//! back-office on low-stock crossings. Every operation is read-whole-array,
//! mutate, write-whole-array; writes go through compare-and-swap so two
//! concurrent writers cannot silently drop each other's entries.

use chrono::Utc;

use crate::entities::codec::{self, CodecError};
use crate::entities::{Notification, NotificationKind};
use crate::keys;
use crate::store::{KvStore, StoreError};
use crate::types::{NotificationId, base36};

/// Maximum entries kept in the log; the oldest are dropped on overflow.
pub const MAX_RECENT: usize = 50;

/// Input for a new notification; id, timestamp, and read flag are generated.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// The entity the notification is about (order id, product id, or user
    /// email). Also used as the id suffix when present.
    pub item_id: Option<String>,
}

/// Errors from notification log operations.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    /// Another writer updated the log between our read and write.
    #[error("notification log was modified concurrently")]
    Conflict,
}

/// Read/write access to the notification log.
pub struct NotificationLog<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> NotificationLog<'a, S> {
    /// Create a log handle over the given store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All retained notifications, newest first.
    ///
    /// A log blob that is not an array at all is treated as an empty log
    /// (the next write replaces it); individually malformed entries are
    /// dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Store`] if the store read fails.
    pub async fn recent(&self) -> Result<Vec<Notification>, NotificationError> {
        Ok(self.load().await?.1)
    }

    /// Number of unread notifications, derived on every call.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Store`] if the store read fails.
    pub async fn unread_count(&self) -> Result<usize, NotificationError> {
        Ok(self
            .recent()
            .await?
            .iter()
            .filter(|n| !n.is_read)
            .count())
    }

    /// Prepend a notification, truncating the log to [`MAX_RECENT`] entries.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Conflict`] if the log changed under us.
    pub async fn add(
        &self,
        new: NewNotification,
    ) -> Result<Notification, NotificationError> {
        let (raw, mut entries) = self.load().await?;

        let now = Utc::now();
        let suffix = new
            .item_id
            .clone()
            .unwrap_or_else(|| base36(rand::random::<u64>()));
        let notification = Notification {
            id: NotificationId::new(format!(
                "{}_{}_{}",
                new.kind.as_str(),
                now.timestamp_millis(),
                suffix
            )),
            title: new.title,
            message: new.message,
            kind: new.kind,
            item_id: new.item_id,
            timestamp: now,
            is_read: false,
        };

        entries.insert(0, notification.clone());
        entries.truncate(MAX_RECENT);

        self.save(raw.as_deref(), &entries).await?;
        Ok(notification)
    }

    /// Mark one notification as read. A no-op if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Conflict`] if the log changed under us.
    pub async fn mark_as_read(&self, id: &NotificationId) -> Result<(), NotificationError> {
        let (raw, mut entries) = self.load().await?;
        let mut changed = false;
        for entry in entries.iter_mut().filter(|e| &e.id == id) {
            changed |= !entry.is_read;
            entry.is_read = true;
        }
        if changed {
            self.save(raw.as_deref(), &entries).await?;
        }
        Ok(())
    }

    /// Mark every notification as read (the "clear count" action).
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Conflict`] if the log changed under us.
    pub async fn mark_all_read(&self) -> Result<(), NotificationError> {
        let (raw, mut entries) = self.load().await?;
        if entries.iter().any(|e| !e.is_read) {
            for entry in &mut entries {
                entry.is_read = true;
            }
            self.save(raw.as_deref(), &entries).await?;
        }
        Ok(())
    }

    /// Remove one notification outright. A no-op if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Conflict`] if the log changed under us.
    pub async fn dismiss(&self, id: &NotificationId) -> Result<(), NotificationError> {
        let (raw, mut entries) = self.load().await?;
        let before = entries.len();
        entries.retain(|e| &e.id != id);
        if entries.len() != before {
            self.save(raw.as_deref(), &entries).await?;
        }
        Ok(())
    }

    async fn load(&self) -> Result<(Option<String>, Vec<Notification>), NotificationError> {
        let Some(raw) = self.store.get(keys::ADMIN_NOTIFICATIONS).await? else {
            return Ok((None, Vec::new()));
        };

        match codec::decode_array::<Notification>(&raw) {
            Ok(decoded) => {
                if decoded.is_lossy() {
                    tracing::warn!(
                        skipped = decoded.skipped,
                        "dropped malformed notification entries"
                    );
                }
                Ok((Some(raw), decoded.records))
            }
            Err(err) => {
                // The log is ephemeral; a corrupt blob is reset, not fatal.
                tracing::warn!(error = %err, "notification log unreadable, treating as empty");
                Ok((Some(raw), Vec::new()))
            }
        }
    }

    async fn save(
        &self,
        expected: Option<&str>,
        entries: &[Notification],
    ) -> Result<(), NotificationError> {
        let encoded = codec::encode(&entries)?;
        if self
            .store
            .compare_and_swap(keys::ADMIN_NOTIFICATIONS, expected, &encoded)
            .await?
        {
            Ok(())
        } else {
            Err(NotificationError::Conflict)
        }
    }
}
