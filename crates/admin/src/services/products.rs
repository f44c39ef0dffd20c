//! Catalog and inventory management.
//!
//! The catalog is one array under `admin_products`, seeded with the starter
//! catalog the first time the back-office touches it. Every edit rewrites
//! the whole array through compare-and-swap.
//!
//! Low-stock alerts fire on the crossing edge only: a product that was at or
//! above the threshold and drops below it produces one notification. Edits
//! that keep a product below the threshold stay quiet, so a slow-moving item
//! does not re-alert on every save.

use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use velvet_mango_core::entities::codec;
use velvet_mango_core::notifications::{NewNotification, NotificationLog};
use velvet_mango_core::seed;
use velvet_mango_core::store::KvStore;
use velvet_mango_core::types::ProductId;
use velvet_mango_core::{NotificationKind, Product, keys};

use crate::error::{AdminError, Result};

use super::settings::SettingsService;

/// Input for creating a product. The id is generated.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub quantity: u32,
    pub tags: Vec<String>,
}

/// Fields a product edit may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub tags: Option<Vec<String>>,
}

/// Catalog management service.
pub struct ProductService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> ProductService<'a, S> {
    /// Create a new product service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The full catalog, seeding the starter products on first use.
    ///
    /// Unlike the client's read-only fallback, the back-office writes the
    /// seed back so subsequent edits have a base to work from. An existing
    /// empty array is respected (the admin deleted everything).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] if the store fails.
    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.load().await?.1)
    }

    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] for an unknown id.
    pub async fn get(&self, id: &ProductId) -> Result<Product> {
        self.list()
            .await?
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| AdminError::NotFound(format!("product {id}")))
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] on bad input and
    /// [`AdminError::Conflict`] if the catalog changed concurrently.
    pub async fn create(&self, new: NewProduct) -> Result<Product> {
        validate(&new.name, &new.description, &new.category, new.price)?;

        let product = Product {
            id: ProductId::new(Uuid::new_v4().to_string()),
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            category: new.category,
            quantity: new.quantity,
            tags: new.tags,
            rating: None,
            reviews: None,
        };

        let (raw, mut products) = self.load().await?;
        products.push(product.clone());
        self.save(raw.as_deref(), &products).await?;

        // A product born below the threshold counts as a crossing.
        self.maybe_alert_low_stock(&product, None).await?;
        Ok(product)
    }

    /// Apply an edit to a product and rewrite the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] for an unknown id,
    /// [`AdminError::Validation`] on bad input, and
    /// [`AdminError::Conflict`] if the catalog changed concurrently.
    pub async fn update(&self, id: &ProductId, update: ProductUpdate) -> Result<Product> {
        let (raw, mut products) = self.load().await?;
        let Some(slot) = products.iter_mut().find(|p| &p.id == id) else {
            return Err(AdminError::NotFound(format!("product {id}")));
        };
        let previous_quantity = slot.quantity;

        if let Some(name) = update.name {
            slot.name = name;
        }
        if let Some(description) = update.description {
            slot.description = description;
        }
        if let Some(price) = update.price {
            slot.price = price;
        }
        if let Some(image) = update.image {
            slot.image = image;
        }
        if let Some(category) = update.category {
            slot.category = category;
        }
        if let Some(quantity) = update.quantity {
            slot.quantity = quantity;
        }
        if let Some(tags) = update.tags {
            slot.tags = tags;
        }
        validate(&slot.name, &slot.description, &slot.category, slot.price)?;
        let updated = slot.clone();

        self.save(raw.as_deref(), &products).await?;
        self.maybe_alert_low_stock(&updated, Some(previous_quantity))
            .await?;
        Ok(updated)
    }

    /// Remove a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] for an unknown id and
    /// [`AdminError::Conflict`] if the catalog changed concurrently.
    pub async fn delete(&self, id: &ProductId) -> Result<()> {
        let (raw, mut products) = self.load().await?;
        let before = products.len();
        products.retain(|p| &p.id != id);
        if products.len() == before {
            return Err(AdminError::NotFound(format!("product {id}")));
        }
        self.save(raw.as_deref(), &products).await
    }

    /// Emit one stock notification when a quantity crosses below the
    /// threshold. `previous` is `None` for a freshly created product.
    async fn maybe_alert_low_stock(
        &self,
        product: &Product,
        previous: Option<u32>,
    ) -> Result<()> {
        let threshold = SettingsService::new(self.store)
            .low_stock_threshold()
            .await?;
        let was_low = previous.is_some_and(|q| q < threshold);
        if product.quantity >= threshold || was_low {
            return Ok(());
        }

        NotificationLog::new(self.store)
            .add(NewNotification {
                title: "Low Stock Alert!".to_owned(),
                message: format!(
                    "\"{}\" is running low: {} left.",
                    product.name, product.quantity
                ),
                kind: NotificationKind::Stock,
                item_id: Some(product.id.as_str().to_owned()),
            })
            .await?;
        Ok(())
    }

    async fn load(&self) -> Result<(Option<String>, Vec<Product>)> {
        let Some(raw) = self.store.get(keys::ADMIN_PRODUCTS).await? else {
            let products = seed::starter_catalog();
            let encoded = codec::encode(&products)?;
            if !self
                .store
                .compare_and_swap(keys::ADMIN_PRODUCTS, None, &encoded)
                .await?
            {
                return Err(AdminError::Conflict);
            }
            return Ok((Some(encoded), products));
        };

        match codec::decode_array::<Product>(&raw) {
            Ok(decoded) => {
                if decoded.is_lossy() {
                    warn!(skipped = decoded.skipped, "dropped malformed catalog entries");
                }
                Ok((Some(raw), decoded.records))
            }
            Err(err) => {
                warn!(error = %err, "stored catalog unreadable, treating as empty");
                Ok((Some(raw), Vec::new()))
            }
        }
    }

    async fn save(&self, expected: Option<&str>, products: &[Product]) -> Result<()> {
        let encoded = codec::encode(&products)?;
        if self
            .store
            .compare_and_swap(keys::ADMIN_PRODUCTS, expected, &encoded)
            .await?
        {
            Ok(())
        } else {
            Err(AdminError::Conflict)
        }
    }
}

fn validate(name: &str, description: &str, category: &str, price: Decimal) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AdminError::Validation("name must not be empty".to_owned()));
    }
    if description.trim().is_empty() {
        return Err(AdminError::Validation(
            "description must not be empty".to_owned(),
        ));
    }
    if category.trim().is_empty() {
        return Err(AdminError::Validation(
            "category must not be empty".to_owned(),
        ));
    }
    if price <= Decimal::ZERO {
        return Err(AdminError::Validation(
            "price must be greater than zero".to_owned(),
        ));
    }
    Ok(())
}
