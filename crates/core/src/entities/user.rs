//! Customer profile record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Email;

/// A registered customer, stored whole under `user_<email>`.
///
/// The email is the identity: it appears both inside the record and as the
/// storage key suffix. `password_hash` keeps its historical wire name but
/// holds a salted argon2 PHC string, never a plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name, e.g. "First Last".
    pub name: String,
    /// The user's email; also the storage key suffix.
    pub email: Email,
    /// Salted argon2 hash of the password (PHC string format).
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middlename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Free-text age as entered in the registration form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_uri: Option<String>,
    /// When the account was created.
    pub registered_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            name: "Alice Vaughn".to_owned(),
            email: Email::parse("alice@x.com").unwrap(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
            middlename: None,
            gender: Some("female".to_owned()),
            age: Some("29".to_owned()),
            address: None,
            mobile: None,
            profile_image_uri: None,
            registered_at: "2025-03-01T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_round_trip() {
        let user = sample();
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("passwordHash").is_some());
        assert!(json.get("registeredAt").is_some());
        // Absent optionals are omitted entirely, not serialized as null.
        assert!(json.get("middlename").is_none());
    }

    #[test]
    fn test_decodes_minimal_legacy_record() {
        // Records written before the optional profile fields existed.
        let raw = r#"{
            "name": "Bob",
            "email": "bob@x.com",
            "passwordHash": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
            "registeredAt": "2024-11-20T08:30:00Z"
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.name, "Bob");
        assert_eq!(user.age, None);
    }
}
