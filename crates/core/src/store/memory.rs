//! In-memory store for tests and examples.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{KvStore, StoreError};

/// A [`KvStore`] backed by an in-process map.
///
/// State does not survive the process; every unit and integration test runs
/// against a fresh instance.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given key-value pairs.
    #[must_use]
    pub fn with_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: Mutex::new(map),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned lock means a test thread panicked mid-write; the map
        // itself is still a consistent String map.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock().keys().cloned().collect())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StoreError> {
        let mut map = self.lock();
        if map.get(key).map(String::as_str) == expected {
            map.insert(key.to_owned(), new.to_owned());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_owned()));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        // Removing again is a no-op.
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_is_sorted() {
        let store = MemoryStore::with_pairs([("b", "2"), ("a", "1")]);
        assert_eq!(store.list_keys().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_compare_and_swap() {
        let store = MemoryStore::new();

        // Absent key: expected None succeeds, anything else fails.
        assert!(store.compare_and_swap("k", None, "v1").await.unwrap());
        assert!(!store.compare_and_swap("k", None, "v2").await.unwrap());

        // Present key: must match the current value.
        assert!(!store.compare_and_swap("k", Some("stale"), "v2").await.unwrap());
        assert!(store.compare_and_swap("k", Some("v1"), "v2").await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), Some("v2".to_owned()));
    }

    #[tokio::test]
    async fn test_multi_get() {
        let store = MemoryStore::with_pairs([("a", "1")]);
        let got = store
            .multi_get(&["a".to_owned(), "missing".to_owned()])
            .await
            .unwrap();
        assert_eq!(
            got,
            vec![
                ("a".to_owned(), Some("1".to_owned())),
                ("missing".to_owned(), None),
            ]
        );
    }
}
