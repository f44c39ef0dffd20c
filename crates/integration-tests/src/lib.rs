//! Integration tests for Velvet Mango.
//!
//! The tests in `tests/` drive the storefront and back-office services
//! together over a shared in-memory store, the way the app composes them at
//! runtime. This library holds the shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use async_trait::async_trait;
use rust_decimal::Decimal;

use velvet_mango_core::Product;
use velvet_mango_core::store::{KvStore, StoreError};
use velvet_mango_core::types::ProductId;

/// A catalog product for tests, priced in whole-cent decimals.
#[must_use]
pub fn product(id: &str, name: &str, cents: i64, quantity: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: format!("{name} (test fixture)"),
        price: Decimal::new(cents, 2),
        image: format!("https://cdn.example.com/products/{id}.png"),
        category: "Tops".to_owned(),
        quantity,
        tags: Vec::new(),
        rating: None,
        reviews: None,
    }
}

#[derive(Debug, thiserror::Error)]
#[error("store is in read-only mode")]
struct WriteRefused;

/// A store wrapper that serves reads but refuses every write.
///
/// Used to check that flows leave existing data alone when persistence
/// fails partway through.
pub struct ReadOnlyStore<S> {
    inner: S,
}

impl<S> ReadOnlyStore<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: KvStore> KvStore for ReadOnlyStore<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::backend(WriteRefused))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::backend(WriteRefused))
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list_keys().await
    }

    async fn compare_and_swap(
        &self,
        _key: &str,
        _expected: Option<&str>,
        _new: &str,
    ) -> Result<bool, StoreError> {
        Err(StoreError::backend(WriteRefused))
    }
}
