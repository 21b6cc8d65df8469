//! DTOs for user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::domain::entities::User;

/// Request to register a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// A registered user.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        let valid = CreateUserRequest {
            email: "ann@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateUserRequest {
            email: "not-an-email".to_string(),
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_email_is_trimmed_before_validation() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"email":"  ann@example.com \n"}"#).unwrap();

        assert_eq!(req.email, "ann@example.com");
        assert!(req.validate().is_ok());
    }
}
