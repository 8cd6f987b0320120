use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};

use crate::database::models::MovieTheater;
use crate::database::DatabaseManager;
use crate::dto::theaters::{MovieTheaterCreation, MovieTheaterDto};
use crate::error::ApiError;
use crate::pagination::{Page, Paginated};

const THEATER_COLUMNS: &str = "id, name, latitude, longitude";

/// GET /api/movietheaters - paginated, ordered by name
pub async fn list(Query(page): Query<Page>) -> Result<Paginated<MovieTheaterDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movie_theaters")
        .fetch_one(&pool)
        .await?;

    let query = format!(
        "SELECT {} FROM movie_theaters ORDER BY name ASC {}",
        THEATER_COLUMNS,
        page.to_sql()
    );
    let theaters = sqlx::query_as::<_, MovieTheater>(&query).fetch_all(&pool).await?;

    Ok(Paginated::new(theaters.into_iter().map(MovieTheaterDto::from).collect(), total))
}

/// GET /api/movietheaters/{id}
pub async fn get_by_id(Path(id): Path<i32>) -> Result<Json<MovieTheaterDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let query = format!("SELECT {} FROM movie_theaters WHERE id = $1", THEATER_COLUMNS);
    let theater = sqlx::query_as::<_, MovieTheater>(&query)
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(theater.into()))
}

/// POST /api/movietheaters
pub async fn create(Json(payload): Json<MovieTheaterCreation>) -> Result<StatusCode, ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    sqlx::query("INSERT INTO movie_theaters (name, latitude, longitude) VALUES ($1, $2, $3)")
        .bind(&payload.name)
        .bind(payload.latitude)
        .bind(payload.longitude)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/movietheaters/{id}
pub async fn update(
    Path(id): Path<i32>,
    Json(payload): Json<MovieTheaterCreation>,
) -> Result<StatusCode, ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let result =
        sqlx::query("UPDATE movie_theaters SET name = $1, latitude = $2, longitude = $3 WHERE id = $4")
            .bind(&payload.name)
            .bind(payload.latitude)
            .bind(payload.longitude)
            .bind(id)
            .execute(&pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/movietheaters/{id}
pub async fn remove(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("DELETE FROM movie_theaters WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
