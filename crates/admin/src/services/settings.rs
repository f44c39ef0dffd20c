//! Back-office settings.
//!
//! Settings are scalar values, one key each, stored as strings. Currently
//! there is exactly one: the low-stock alert threshold.

use tracing::warn;

use velvet_mango_core::keys;
use velvet_mango_core::store::KvStore;

use crate::error::Result;

/// Threshold used until the admin picks one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Reads and writes back-office settings.
pub struct SettingsService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> SettingsService<'a, S> {
    /// Create a new settings service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The threshold a stock quantity must drop strictly below to count
    /// as low. A quantity exactly at the threshold is not low.
    ///
    /// An unset or unparseable stored value falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AdminError::Store`] if the store read fails.
    pub async fn low_stock_threshold(&self) -> Result<u32> {
        let Some(raw) = self.store.get(keys::LOW_STOCK_THRESHOLD).await? else {
            return Ok(DEFAULT_LOW_STOCK_THRESHOLD);
        };
        match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => {
                warn!(stored = %raw, "low-stock threshold unreadable, using default");
                Ok(DEFAULT_LOW_STOCK_THRESHOLD)
            }
        }
    }

    /// Persist a new low-stock threshold.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AdminError::Store`] if the write fails.
    pub async fn set_low_stock_threshold(&self, threshold: u32) -> Result<()> {
        self.store
            .set(keys::LOW_STOCK_THRESHOLD, &threshold.to_string())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use velvet_mango_core::store::MemoryStore;

    #[tokio::test]
    async fn test_default_applies_when_unset() {
        let store = MemoryStore::new();
        let settings = SettingsService::new(&store);
        assert_eq!(
            settings.low_stock_threshold().await.unwrap(),
            DEFAULT_LOW_STOCK_THRESHOLD
        );
    }

    #[tokio::test]
    async fn test_set_and_get_round_trip() {
        let store = MemoryStore::new();
        let settings = SettingsService::new(&store);

        settings.set_low_stock_threshold(12).await.unwrap();
        assert_eq!(settings.low_stock_threshold().await.unwrap(), 12);
        assert_eq!(
            store.get(keys::LOW_STOCK_THRESHOLD).await.unwrap().as_deref(),
            Some("12")
        );
    }

    #[tokio::test]
    async fn test_garbage_value_falls_back_to_default() {
        let store = MemoryStore::with_pairs([(keys::LOW_STOCK_THRESHOLD, "plenty")]);
        let settings = SettingsService::new(&store);
        assert_eq!(
            settings.low_stock_threshold().await.unwrap(),
            DEFAULT_LOW_STOCK_THRESHOLD
        );
    }
}
