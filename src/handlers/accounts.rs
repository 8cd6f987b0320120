use axum::{extract::Query, http::StatusCode, Json};
use uuid::Uuid;

use crate::auth::{self, password, Claims};
use crate::database::models::User;
use crate::database::DatabaseManager;
use crate::dto::accounts::{AuthenticationResponse, UserCredentials, UserDto};
use crate::error::ApiError;
use crate::pagination::{Page, Paginated};

const USER_COLUMNS: &str = "id, email, password_hash, is_admin, created_at";

/// POST /api/accounts/create - register and receive a token
pub async fn create(Json(credentials): Json<UserCredentials>) -> Result<Json<AuthenticationResponse>, ApiError> {
    credentials.validate()?;

    let password_hash = password::hash_password(&credentials.password)?;

    let pool = DatabaseManager::pool().await?;
    let inserted = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (id, email, password_hash, is_admin) VALUES ($1, $2, $3, FALSE) \
         ON CONFLICT (email) DO NOTHING RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(&credentials.email)
    .bind(&password_hash)
    .fetch_optional(&pool)
    .await?;

    if inserted.is_none() {
        return Err(ApiError::validation(vec![
            "email:An account with this email already exists".to_string(),
        ]));
    }

    build_token(&credentials.email, false).map(Json)
}

/// POST /api/accounts/login - verify credentials and receive a token.
/// Unknown user and wrong password are indistinguishable to the caller.
pub async fn login(Json(credentials): Json<UserCredentials>) -> Result<Json<AuthenticationResponse>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&query)
        .bind(&credentials.email)
        .fetch_optional(&pool)
        .await?;

    let verified = match &user {
        Some(user) => password::verify_password(&credentials.password, &user.password_hash)?,
        None => false,
    };

    match (user, verified) {
        (Some(user), true) => build_token(&user.email, user.is_admin).map(Json),
        _ => Err(ApiError::bad_request("Incorrect login")),
    }
}

/// GET /api/accounts/listUsrs - paginated, ordered by email
pub async fn list_users(Query(page): Query<Page>) -> Result<Paginated<UserDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;

    let query = format!(
        "SELECT {} FROM users ORDER BY email ASC {}",
        USER_COLUMNS,
        page.to_sql()
    );
    let users = sqlx::query_as::<_, User>(&query).fetch_all(&pool).await?;

    Ok(Paginated::new(users.into_iter().map(UserDto::from).collect(), total))
}

/// POST /api/accounts/makeAdmin - grant the admin role claim
pub async fn make_admin(Json(user_id): Json<Uuid>) -> Result<StatusCode, ApiError> {
    set_admin(user_id, true).await
}

/// POST /api/accounts/removeAdmin - revoke the admin role claim
pub async fn remove_admin(Json(user_id): Json<Uuid>) -> Result<StatusCode, ApiError> {
    set_admin(user_id, false).await
}

async fn set_admin(user_id: Uuid, admin: bool) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("UPDATE users SET is_admin = $1 WHERE id = $2")
        .bind(admin)
        .bind(user_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

fn build_token(email: &str, admin: bool) -> Result<AuthenticationResponse, ApiError> {
    let claims = Claims::new(email.to_string(), admin);
    let token = auth::generate_jwt(&claims)?;
    Ok(AuthenticationResponse { token, expiration: claims.expiration() })
}
