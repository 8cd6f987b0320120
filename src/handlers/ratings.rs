use axum::{http::StatusCode, Extension, Json};
use uuid::Uuid;

use crate::database::DatabaseManager;
use crate::dto::ratings::RatingSubmission;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// POST /api/rating - upsert the caller's rating for a movie. The unique
/// (movie, user) key makes re-rating an update, never a second row.
pub async fn rate(
    Extension(user): Extension<AuthUser>,
    Json(submission): Json<RatingSubmission>,
) -> Result<StatusCode, ApiError> {
    submission.validate()?;

    let pool = DatabaseManager::pool().await?;

    let movie_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
            .bind(submission.movie_id)
            .fetch_one(&pool)
            .await?;
    if !movie_exists {
        return Err(ApiError::NotFound);
    }

    let user_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(&user.email)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;

    sqlx::query(
        "INSERT INTO ratings (movie_id, user_id, rate) VALUES ($1, $2, $3) \
         ON CONFLICT (movie_id, user_id) DO UPDATE SET rate = EXCLUDED.rate",
    )
    .bind(submission.movie_id)
    .bind(user_id)
    .bind(submission.rate)
    .execute(&pool)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
