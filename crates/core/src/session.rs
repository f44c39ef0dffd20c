//! Login session state.
//!
//! Exactly one party can be logged in at a time: nobody, a client, or the
//! admin. The session is one sum-typed value under one key, so the states
//! are mutually exclusive by representation — there is no pair of boolean
//! flags that a crash between writes could leave inconsistent.
//!
//! Older installations stored two independent keys (`loggedInUserEmail` and
//! `isAdminLoggedInStatus`); [`SessionManager::check_status`] migrates them
//! on first read, applying the historical rule that admin wins when both
//! happen to be set.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::entities::codec::{self, CodecError};
use crate::keys;
use crate::store::{KvStore, StoreError};
use crate::types::Email;

/// Who is currently logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Session {
    #[default]
    LoggedOut,
    Client {
        email: Email,
    },
    Admin,
}

impl Session {
    /// The client email, when a client is logged in.
    #[must_use]
    pub const fn client_email(&self) -> Option<&Email> {
        match self {
            Self::Client { email } => Some(email),
            _ => None,
        }
    }

    /// Whether the admin is logged in.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The admin credential pair.
///
/// There is a single back-office account. Its credentials come from the
/// environment (see the admin crate's config); the default matches what the
/// shipped installations were provisioned with.
pub struct AdminCredentials {
    pub email: String,
    pub password: SecretString,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            email: "admin@fashion.com".to_owned(),
            password: SecretString::from("admin123"),
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminCredentials {
    /// Check a login attempt. The email comparison is case-insensitive.
    #[must_use]
    pub fn verify(&self, email: &str, password: &str) -> bool {
        email.eq_ignore_ascii_case(&self.email) && password == self.password.expose_secret()
    }
}

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Admin login with a wrong credential pair.
    #[error("invalid admin credentials")]
    InvalidCredentials,
    /// The store failed; the session could not be updated.
    #[error("failed to update session state")]
    Store(#[from] StoreError),
    /// The stored session value could not be encoded.
    #[error("failed to encode session state")]
    Codec(#[from] CodecError),
}

/// Reads and writes the persisted session.
pub struct SessionManager<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> SessionManager<'a, S> {
    /// Create a manager over the given store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read the current session, migrating legacy two-key state on first use.
    ///
    /// Run once at startup. A stored session that fails to decode is treated
    /// as logged out and overwritten rather than propagated.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store fails.
    pub async fn check_status(&self) -> Result<Session, SessionError> {
        if let Some(raw) = self.store.get(keys::SESSION).await? {
            if let Ok(session) = codec::decode_record::<Session>(&raw) {
                return Ok(session);
            }
            // Corrupt session blob: reset to logged out.
            self.save(&Session::LoggedOut).await?;
            return Ok(Session::LoggedOut);
        }

        let session = self.migrate_legacy().await?;
        self.save(&session).await?;
        self.store.remove(keys::LEGACY_CLIENT_SESSION).await?;
        self.store.remove(keys::LEGACY_ADMIN_SESSION).await?;
        Ok(session)
    }

    /// Log a client in. Credential validation happens before this call.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the session cannot be persisted.
    pub async fn login(&self, email: Email) -> Result<(), SessionError> {
        self.save(&Session::Client { email }).await
    }

    /// Log the client out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the session cannot be persisted.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.save(&Session::LoggedOut).await
    }

    /// Log the admin in, replacing any client session in the same write.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredentials`] on a wrong pair, or
    /// [`SessionError::Store`] if the session cannot be persisted.
    pub async fn admin_login(
        &self,
        credentials: &AdminCredentials,
        email: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        if !credentials.verify(email, password) {
            return Err(SessionError::InvalidCredentials);
        }
        self.save(&Session::Admin).await
    }

    /// Log the admin out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the session cannot be persisted.
    pub async fn admin_logout(&self) -> Result<(), SessionError> {
        self.save(&Session::LoggedOut).await
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        let raw = codec::encode(session)?;
        self.store.set(keys::SESSION, &raw).await?;
        Ok(())
    }

    /// Reconstruct a session from the legacy two-key layout.
    async fn migrate_legacy(&self) -> Result<Session, SessionError> {
        let admin_flag = self.store.get(keys::LEGACY_ADMIN_SESSION).await?;
        if admin_flag.as_deref() == Some("true") {
            // Admin takes precedence when both keys happen to be set.
            return Ok(Session::Admin);
        }

        let client = self.store.get(keys::LEGACY_CLIENT_SESSION).await?;
        match client {
            Some(raw) => match Email::parse(&raw) {
                Ok(email) => Ok(Session::Client { email }),
                Err(_) => Ok(Session::LoggedOut),
            },
            None => Ok(Session::LoggedOut),
        }
    }
}
