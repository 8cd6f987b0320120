use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};

use crate::database::models::Genre;
use crate::database::DatabaseManager;
use crate::dto::genres::{GenreCreation, GenreDto};
use crate::error::ApiError;
use crate::pagination::{Page, Paginated};

/// GET /api/genres - paginated, ordered by name
pub async fn list(Query(page): Query<Page>) -> Result<Paginated<GenreDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres")
        .fetch_one(&pool)
        .await?;

    let query = format!("SELECT id, name FROM genres ORDER BY name ASC {}", page.to_sql());
    let genres = sqlx::query_as::<_, Genre>(&query).fetch_all(&pool).await?;

    Ok(Paginated::new(genres.into_iter().map(GenreDto::from).collect(), total))
}

/// GET /api/genres/all - unpaginated full list
pub async fn all() -> Result<Json<Vec<GenreDto>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name ASC")
        .fetch_all(&pool)
        .await?;

    Ok(Json(genres.into_iter().map(GenreDto::from).collect()))
}

/// GET /api/genres/{id}
pub async fn get_by_id(Path(id): Path<i32>) -> Result<Json<GenreDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(genre.into()))
}

/// POST /api/genres
pub async fn create(Json(payload): Json<GenreCreation>) -> Result<StatusCode, ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    sqlx::query("INSERT INTO genres (name) VALUES ($1)")
        .bind(&payload.name)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/genres/{id}
pub async fn update(
    Path(id): Path<i32>,
    Json(payload): Json<GenreCreation>,
) -> Result<StatusCode, ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("UPDATE genres SET name = $1 WHERE id = $2")
        .bind(&payload.name)
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/genres/{id}
pub async fn remove(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("DELETE FROM genres WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
