//! Back-office configuration.

use secrecy::SecretString;

use velvet_mango_core::session::AdminCredentials;

/// Environment variable overriding the admin login email.
pub const ADMIN_EMAIL_VAR: &str = "VELVET_ADMIN_EMAIL";

/// Environment variable overriding the admin login password.
pub const ADMIN_PASSWORD_VAR: &str = "VELVET_ADMIN_PASSWORD";

/// Admin-side configuration, sourced from the environment.
#[derive(Debug)]
pub struct AdminConfig {
    pub credentials: AdminCredentials,
}

impl AdminConfig {
    /// Build the configuration from environment variables, falling back to
    /// the provisioned defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = AdminCredentials::default();
        let email = std::env::var(ADMIN_EMAIL_VAR).unwrap_or(defaults.email);
        let password = std::env::var(ADMIN_PASSWORD_VAR)
            .map_or(defaults.password, SecretString::from);
        Self {
            credentials: AdminCredentials { email, password },
        }
    }
}
