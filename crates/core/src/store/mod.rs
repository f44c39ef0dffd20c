//! The async key-value store abstraction.
//!
//! All persistence goes through [`KvStore`]: a string-keyed, string-valued
//! map whose values are JSON-encoded blobs. The production store is
//! SQLite-backed (see the `cli` crate); tests use [`memory::MemoryStore`].

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

/// Error type for store operations.
///
/// The store is an external collaborator; this type only wraps whatever the
/// backend reports. Data-shape problems are the codec's concern, not the
/// store's.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store failed to read or write.
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// An async, persistent, string-keyed, string-valued map.
///
/// Writers that read-modify-write a shared key should use
/// [`KvStore::compare_and_swap`] so a concurrent write surfaces as a
/// conflict instead of silently winning.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// List every key currently present.
    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;

    /// Write `new` under `key` only if the current value equals `expected`
    /// (`None` meaning the key must be absent). Returns whether the write
    /// happened.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StoreError>;

    /// Read several keys at once, pairing each key with its value.
    ///
    /// The default implementation issues one `get` per key; backends with a
    /// cheaper batch path may override it.
    async fn multi_get(
        &self,
        keys: &[String],
    ) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            out.push((key.clone(), self.get(key).await?));
        }
        Ok(out)
    }
}
