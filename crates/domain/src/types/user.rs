//! Account owner profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user, as returned by the `me` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<UserEmail>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserEmail {
    pub address: String,
    #[serde(default)]
    pub verified: bool,
}

impl User {
    /// First verified email address, if any.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.iter().find(|email| email.verified).map(|email| email.address.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_email_skips_unverified_addresses() {
        let user: User = serde_json::from_str(
            r#"{
                "Id": "u-1",
                "UserName": "driver",
                "Emails": [
                    {"Address": "old@example.com", "Verified": false},
                    {"Address": "driver@example.com", "Verified": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(user.primary_email(), Some("driver@example.com"));
    }
}
