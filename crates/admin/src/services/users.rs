//! Customer administration.
//!
//! Works over the same `user_<email>` records the storefront creates. An
//! account the admin creates goes through the same hashing path as a
//! self-registration but does not ring the notification bell.

use chrono::Utc;
use tracing::warn;

use velvet_mango_core::entities::codec;
use velvet_mango_core::store::KvStore;
use velvet_mango_core::types::{Email, hash_password};
use velvet_mango_core::{User, keys};

use crate::error::{AdminError, Result};

/// Input for an admin-created account.
#[derive(Debug, Clone)]
pub struct NewUserAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Back-office customer service.
pub struct AdminUserService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> AdminUserService<'a, S> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every registered customer, newest registration first.
    ///
    /// A record that does not decode is skipped with a warning; one corrupt
    /// profile must not blank the customer list.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] if the key scan fails.
    pub async fn list(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();
        for key in self.store.list_keys().await? {
            if keys::email_from_user_key(&key).is_none() {
                continue;
            }
            let Some(raw) = self.store.get(&key).await? else {
                continue;
            };
            match codec::decode_record::<User>(&raw) {
                Ok(user) => users.push(user),
                Err(err) => warn!(%key, error = %err, "user record unreadable, skipping"),
            }
        }
        users.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(users)
    }

    /// Look up one customer.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] for an unknown email.
    pub async fn get(&self, email: &Email) -> Result<User> {
        let raw = self
            .store
            .get(&keys::user(email))
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("user {email}")))?;
        Ok(codec::decode_record(&raw)?)
    }

    /// Create an account on a customer's behalf.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] on bad input or a taken email.
    pub async fn create(&self, new: NewUserAccount) -> Result<User> {
        if new.name.trim().is_empty() {
            return Err(AdminError::Validation("name must not be empty".to_owned()));
        }
        if new.password.is_empty() {
            return Err(AdminError::Validation(
                "password must not be empty".to_owned(),
            ));
        }
        let email = Email::parse(&new.email)
            .map_err(|e| AdminError::Validation(e.to_string()))?;
        let password_hash = hash_password(&new.password)
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        let user = User {
            name: new.name,
            email: email.clone(),
            password_hash,
            middlename: None,
            gender: None,
            age: None,
            address: None,
            mobile: None,
            profile_image_uri: None,
            registered_at: Utc::now(),
        };

        let encoded = codec::encode(&user)?;
        if !self
            .store
            .compare_and_swap(&keys::user(&email), None, &encoded)
            .await?
        {
            return Err(AdminError::Validation(format!(
                "user {email} already exists"
            )));
        }
        Ok(user)
    }

    /// Rename a customer, leaving the rest of the record alone.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] for an unknown email and
    /// [`AdminError::Conflict`] if the record changed concurrently.
    pub async fn update_name(&self, email: &Email, name: &str) -> Result<User> {
        if name.trim().is_empty() {
            return Err(AdminError::Validation("name must not be empty".to_owned()));
        }
        let key = keys::user(email);
        let raw = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("user {email}")))?;
        let mut user: User = codec::decode_record(&raw)?;
        user.name = name.to_owned();

        let encoded = codec::encode(&user)?;
        if !self
            .store
            .compare_and_swap(&key, Some(&raw), &encoded)
            .await?
        {
            return Err(AdminError::Conflict);
        }
        Ok(user)
    }

    /// Delete a customer's account record. Their order history stays.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] for an unknown email.
    pub async fn delete(&self, email: &Email) -> Result<()> {
        let key = keys::user(email);
        if self.store.get(&key).await?.is_none() {
            return Err(AdminError::NotFound(format!("user {email}")));
        }
        self.store.remove(&key).await?;
        Ok(())
    }
}
