//! Read-only catalog access for the client.
//!
//! The catalog lives under `admin_products` and is owned by the back-office.
//! The client never writes it: when the key is absent, empty, or unreadable
//! the built-in starter catalog is served instead, so browsing works on a
//! fresh install before the back-office has ever run.

use thiserror::Error;
use tracing::warn;

use velvet_mango_core::entities::codec::{self, CodecError};
use velvet_mango_core::seed;
use velvet_mango_core::store::{KvStore, StoreError};
use velvet_mango_core::types::ProductId;
use velvet_mango_core::{Product, keys};

/// Errors from catalog reads.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Client-side catalog reader.
pub struct CatalogService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> CatalogService<'a, S> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The full product list, falling back to the starter catalog when the
    /// stored one is absent, empty, or unreadable.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] if the store read fails.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let Some(raw) = self.store.get(keys::ADMIN_PRODUCTS).await? else {
            return Ok(seed::starter_catalog());
        };

        match codec::decode_array::<Product>(&raw) {
            Ok(decoded) => {
                if decoded.is_lossy() {
                    warn!(skipped = decoded.skipped, "dropped malformed catalog entries");
                }
                if decoded.records.is_empty() {
                    Ok(seed::starter_catalog())
                } else {
                    Ok(decoded.records)
                }
            }
            Err(err) => {
                warn!(error = %err, "stored catalog unreadable, serving starter catalog");
                Ok(seed::starter_catalog())
            }
        }
    }

    /// Case-insensitive substring search over product names and
    /// descriptions.
    ///
    /// A blank query matches nothing rather than everything, mirroring a
    /// search box nobody has typed into yet.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] if the store read fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .fetch_products()
            .await?
            .into_iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Look up one product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] if the store read fails.
    pub async fn fetch_product_by_id(
        &self,
        id: &ProductId,
    ) -> Result<Option<Product>, CatalogError> {
        Ok(self
            .fetch_products()
            .await?
            .into_iter()
            .find(|product| &product.id == id))
    }
}
