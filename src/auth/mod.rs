use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

pub mod password;

/// Claims embedded in every issued bearer token. The email is the identity
/// key; the admin flag drives the IsAdmin authorization policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: String, admin: bool) -> Self {
        let now = Utc::now();
        let expiry_days = config::config().security.jwt_expiry_days;
        let exp = (now + Duration::days(expiry_days)).timestamp();

        Self {
            email,
            admin,
            exp,
            iat: now.timestamp(),
        }
    }

    pub fn expiration(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("invalid JWT secret")]
    InvalidSecret,
}

/// Sign a token for the given claims. Stateless: expiry is the only
/// invalidation mechanism, there is no refresh or revocation list.
pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the decoded claims.
pub fn decode_jwt(token: &str) -> Result<Claims, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = Claims::new("viewer@example.com".to_string(), false);
        let token = generate_jwt(&claims).expect("token should be issued");

        let decoded = decode_jwt(&token).expect("token should verify");
        assert_eq!(decoded.email, "viewer@example.com");
        assert!(!decoded.admin);
    }

    #[test]
    fn token_expires_about_a_year_out() {
        let claims = Claims::new("viewer@example.com".to_string(), true);
        let lifetime = claims.exp - claims.iat;
        let one_year = 365 * 24 * 3600;
        assert!((lifetime - one_year).abs() < 3600, "lifetime was {}", lifetime);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let claims = Claims::new("viewer@example.com".to_string(), false);
        let mut token = generate_jwt(&claims).expect("token should be issued");
        token.push('x');
        assert!(decode_jwt(&token).is_err());
    }
}
