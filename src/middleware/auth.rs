use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Authenticated caller context extracted from a verified bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { email: claims.email, admin: claims.admin }
    }
}

/// Validates the bearer token and injects an `AuthUser` extension. Routes
/// behind this layer reject missing or invalid tokens with 401.
pub async fn bearer_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;
    let claims = auth::decode_jwt(&token)?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// The IsAdmin policy: requires a verified token whose claims carry the
/// admin role. Layered after `bearer_auth`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    if !user.admin {
        return Err(ApiError::forbidden("Admin role required"));
    }

    Ok(next.run(request).await)
}

/// Opportunistic identity for anonymous endpoints: a valid token yields the
/// caller, anything else (absent, malformed, expired) yields `None`.
pub fn optional_user(headers: &HeaderMap) -> Option<AuthUser> {
    let token = extract_bearer_token(headers).ok()?;
    auth::decode_jwt(&token).ok().map(AuthUser::from)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn rejects_non_bearer_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn optional_user_round_trips_a_valid_token() {
        let claims = Claims::new("admin@example.com".to_string(), true);
        let token = crate::auth::generate_jwt(&claims).expect("token");

        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {}", token)).expect("header"),
        );

        let user = optional_user(&headers).expect("user should be recognized");
        assert_eq!(user.email, "admin@example.com");
        assert!(user.admin);
    }

    #[test]
    fn optional_user_is_none_for_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer not.a.token"));
        assert!(optional_user(&headers).is_none());
        assert!(optional_user(&HeaderMap::new()).is_none());
    }
}
