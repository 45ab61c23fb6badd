//! User records from the remote user directory.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::UserId;

/// A user as returned by the remote directory.
///
/// The directory hands out plaintext passwords; the client only ever compares
/// them. The password is kept behind [`SecretString`] so it never shows up in
/// `Debug` output and is never serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Avatar URL.
    pub image: String,
}

impl User {
    /// First and last name separated by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Exact, case-sensitive password comparison.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

fn deserialize_secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DIRECTORY_ENTRY: &str = r#"{
        "id": 1,
        "firstName": "Emily",
        "lastName": "Johnson",
        "maidenName": "Smith",
        "age": 28,
        "email": "emily.johnson@x.dummyjson.com",
        "username": "emilys",
        "password": "emilyspass",
        "image": "https://dummyjson.com/icon/emilys/128"
    }"#;

    #[test]
    fn test_deserialize_directory_entry() {
        let user: User = serde_json::from_str(DIRECTORY_ENTRY).unwrap();
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.username, "emilys");
        assert_eq!(user.full_name(), "Emily Johnson");
        assert!(user.password_matches("emilyspass"));
        assert!(!user.password_matches("EmilysPass"));
    }

    #[test]
    fn test_password_not_leaked() {
        let user: User = serde_json::from_str(DIRECTORY_ENTRY).unwrap();
        assert!(!format!("{user:?}").contains("emilyspass"));
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("emilyspass"));
        assert!(json.contains("\"firstName\":\"Emily\""));
    }
}
