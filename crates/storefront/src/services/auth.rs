//! Authentication and profile service.
//!
//! Customers are records under `user_<email>`; registration claims the key
//! atomically, so a duplicate email loses the race instead of overwriting.
//! Passwords are salted argon2 hashes. Session state itself is the
//! [`velvet_mango_core::session`] module's business — callers validate
//! credentials here first, then update the session.

use chrono::Utc;
use thiserror::Error;
use tracing::warn;

use velvet_mango_core::entities::codec::{self, CodecError};
use velvet_mango_core::notifications::{NewNotification, NotificationLog};
use velvet_mango_core::store::{KvStore, StoreError};
use velvet_mango_core::types::{CredentialError, Email, EmailError, hash_password, verify_password};
use velvet_mango_core::{NotificationKind, User, keys};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A required field was left empty.
    #[error("required field missing: {0}")]
    MissingField(&'static str),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Another writer touched the record between read and write.
    #[error("user record was modified concurrently")]
    Conflict,

    /// Password hashing failed.
    #[error("password hashing error: {0}")]
    Credential(#[from] CredentialError),

    /// The stored user record could not be decoded.
    #[error("stored user record is unreadable: {0}")]
    Corrupt(#[from] CodecError),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for registering a new customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub password: String,
    pub middlename: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
}

/// Fields a profile edit may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub middlename: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub profile_image_uri: Option<String>,
}

/// Authentication service.
pub struct AuthService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Register a new customer.
    ///
    /// Emits a `"user"` notification for the back-office on success; a
    /// failure to notify is logged and does not fail the registration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` / `InvalidEmail` on bad input and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(&self, new: NewCustomer) -> Result<User, AuthError> {
        if new.name.trim().is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if new.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        let email = Email::parse(&new.email)?;

        let user = User {
            name: new.name,
            email: email.clone(),
            password_hash: hash_password(&new.password)?,
            middlename: new.middlename,
            gender: new.gender,
            age: new.age,
            address: None,
            mobile: None,
            profile_image_uri: None,
            registered_at: Utc::now(),
        };

        let encoded = codec::encode(&user)?;
        let claimed = self
            .store
            .compare_and_swap(&keys::user(&email), None, &encoded)
            .await?;
        if !claimed {
            return Err(AuthError::UserAlreadyExists);
        }

        let log = NotificationLog::new(self.store);
        let notify = log
            .add(NewNotification {
                title: "New Customer Registered!".to_owned(),
                message: format!("User {} ({email}) just signed up.", user.name),
                kind: NotificationKind::User,
                item_id: Some(email.as_str().to_owned()),
            })
            .await;
        if let Err(err) = notify {
            warn!(error = %err, %email, "failed to record registration notification");
        }

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let user = self.fetch(&email).await?.ok_or(AuthError::InvalidCredentials)?;

        let verified = match verify_password(password, &user.password_hash) {
            Ok(ok) => ok,
            Err(CredentialError::MalformedHash) => {
                // Pre-migration records stored plaintext; those accounts
                // need a reset, not a silent plaintext comparison.
                warn!(%email, "stored credential is not a valid hash, rejecting login");
                false
            }
            Err(err) => return Err(err.into()),
        };

        if verified {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Fetch a customer's profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no record exists.
    pub async fn profile(&self, email: &Email) -> Result<User, AuthError> {
        self.fetch(email).await?.ok_or(AuthError::UserNotFound)
    }

    /// Apply a profile edit and rewrite the record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no record exists, or
    /// `AuthError::Conflict` if the record changed during the edit.
    pub async fn update_profile(
        &self,
        email: &Email,
        update: ProfileUpdate,
    ) -> Result<User, AuthError> {
        let key = keys::user(email);
        let raw = self.store.get(&key).await?.ok_or(AuthError::UserNotFound)?;
        let mut user: User = codec::decode_record(&raw)?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if update.middlename.is_some() {
            user.middlename = update.middlename;
        }
        if update.gender.is_some() {
            user.gender = update.gender;
        }
        if update.age.is_some() {
            user.age = update.age;
        }
        if update.address.is_some() {
            user.address = update.address;
        }
        if update.mobile.is_some() {
            user.mobile = update.mobile;
        }
        if update.profile_image_uri.is_some() {
            user.profile_image_uri = update.profile_image_uri;
        }

        let encoded = codec::encode(&user)?;
        if !self
            .store
            .compare_and_swap(&key, Some(&raw), &encoded)
            .await?
        {
            return Err(AuthError::Conflict);
        }
        Ok(user)
    }

    async fn fetch(&self, email: &Email) -> Result<Option<User>, AuthError> {
        match self.store.get(&keys::user(email)).await? {
            Some(raw) => Ok(Some(codec::decode_record(&raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use velvet_mango_core::store::MemoryStore;

    fn alice() -> NewCustomer {
        NewCustomer {
            name: "Alice Vaughn".to_owned(),
            email: "alice@x.com".to_owned(),
            password: "pw123".to_owned(),
            middlename: None,
            gender: None,
            age: None,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let user = auth.register(alice()).await.unwrap();
        assert!(user.password_hash.starts_with("$argon2"));

        let logged_in = auth.login("alice@x.com", "pw123").await.unwrap();
        assert_eq!(logged_in.email, user.email);

        assert!(matches!(
            auth.login("alice@x.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let first = auth.register(alice()).await.unwrap();
        let err = auth.register(alice()).await.unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));

        // The original record is unchanged.
        let profile = auth.profile(&first.email).await.unwrap();
        assert_eq!(profile, first);
    }

    #[tokio::test]
    async fn test_registration_emits_user_notification() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(alice()).await.unwrap();

        let log = NotificationLog::new(&store);
        let recent = log.recent().await.unwrap();
        assert_eq!(recent.len(), 1);
        let n = recent.first().unwrap();
        assert_eq!(n.kind, NotificationKind::User);
        assert_eq!(n.item_id.as_deref(), Some("alice@x.com"));
    }

    #[tokio::test]
    async fn test_register_validates_before_store_access() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let mut no_name = alice();
        no_name.name = "  ".to_owned();
        assert!(matches!(
            auth.register(no_name).await,
            Err(AuthError::MissingField("name"))
        ));
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_profile_update_merges_fields() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let user = auth.register(alice()).await.unwrap();

        let updated = auth
            .update_profile(
                &user.email,
                ProfileUpdate {
                    address: Some("12 Mango Lane".to_owned()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.address.as_deref(), Some("12 Mango Lane"));
        assert_eq!(updated.name, "Alice Vaughn");
    }

    #[tokio::test]
    async fn test_legacy_plaintext_credential_is_rejected() {
        let store = MemoryStore::new();
        let raw = r#"{
            "name": "Old Bob",
            "email": "bob@x.com",
            "passwordHash": "hunter2",
            "registeredAt": "2023-01-01T00:00:00Z"
        }"#;
        store.set("user_bob@x.com", raw).await.unwrap();

        let auth = AuthService::new(&store);
        assert!(matches!(
            auth.login("bob@x.com", "hunter2").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
