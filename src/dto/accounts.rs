use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation;
use crate::database::models::User;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

impl UserCredentials {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validation::require(&mut errors, "email", &self.email);
        validation::email_format(&mut errors, "email", &self.email);
        validation::require(&mut errors, "password", &self.password);
        validation::min_len(&mut errors, "password", &self.password, 6);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(errors))
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    pub token: String,
    pub expiration: DateTime<Utc>,
}

/// User listing entry; the password hash never leaves the database layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self { id: user.id, email: user.email, is_admin: user.is_admin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_fails_policy() {
        let dto = UserCredentials {
            email: "user@example.com".to_string(),
            password: "12345".to_string(),
        };
        let err = dto.validate().expect_err("should fail");
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].starts_with("password:"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_email_fails() {
        let dto = UserCredentials {
            email: "invalid".to_string(),
            password: "longenough".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn well_formed_credentials_pass() {
        let dto = UserCredentials {
            email: "user@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
