use axum::{
    extract::{Multipart, Path, Query},
    http::StatusCode,
    Json,
};

use crate::database::models::Actor;
use crate::database::DatabaseManager;
use crate::dto::actors::{ActorDto, ActorForm};
use crate::error::ApiError;
use crate::pagination::{Page, Paginated};
use crate::storage::FileStore;

const ACTOR_COLUMNS: &str = "id, name, picture";
const PICTURE_CONTAINER: &str = "actors";
const SEARCH_LIMIT: i64 = 5;

/// GET /api/actors - paginated, ordered by name
pub async fn list(Query(page): Query<Page>) -> Result<Paginated<ActorDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM actors")
        .fetch_one(&pool)
        .await?;

    let query = format!("SELECT {} FROM actors ORDER BY name ASC {}", ACTOR_COLUMNS, page.to_sql());
    let actors = sqlx::query_as::<_, Actor>(&query).fetch_all(&pool).await?;

    Ok(Paginated::new(actors.into_iter().map(ActorDto::from).collect(), total))
}

/// GET /api/actors/searchByName/{query} - top matches for typeahead pickers
pub async fn search_by_name(Path(query): Path<String>) -> Result<Json<Vec<ActorDto>>, ApiError> {
    if query.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let pool = DatabaseManager::pool().await?;
    let sql = format!(
        "SELECT {} FROM actors WHERE name ILIKE '%' || $1 || '%' ORDER BY name ASC LIMIT {}",
        ACTOR_COLUMNS, SEARCH_LIMIT
    );
    let actors = sqlx::query_as::<_, Actor>(&sql).bind(query.trim()).fetch_all(&pool).await?;

    Ok(Json(actors.into_iter().map(ActorDto::from).collect()))
}

/// GET /api/actors/{id}
pub async fn get_by_id(Path(id): Path<i32>) -> Result<Json<ActorDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let query = format!("SELECT {} FROM actors WHERE id = $1", ACTOR_COLUMNS);
    let actor = sqlx::query_as::<_, Actor>(&query)
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(actor.into()))
}

/// POST /api/actors - multipart form with an optional picture file
pub async fn create(multipart: Multipart) -> Result<StatusCode, ApiError> {
    let form = ActorForm::from_multipart(multipart).await?;
    form.validate()?;

    let picture_route = match &form.picture {
        Some(upload) => Some(
            FileStore::from_config()
                .save(PICTURE_CONTAINER, &upload.file_name, &upload.bytes)
                .await?,
        ),
        None => None,
    };

    let pool = DatabaseManager::pool().await?;
    sqlx::query("INSERT INTO actors (name, picture) VALUES ($1, $2)")
        .bind(&form.name)
        .bind(&picture_route)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/actors/{id} - multipart; a new picture replaces the old asset
pub async fn update(Path(id): Path<i32>, multipart: Multipart) -> Result<StatusCode, ApiError> {
    let form = ActorForm::from_multipart(multipart).await?;
    form.validate()?;

    let pool = DatabaseManager::pool().await?;
    let query = format!("SELECT {} FROM actors WHERE id = $1", ACTOR_COLUMNS);
    let actor = sqlx::query_as::<_, Actor>(&query)
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    let picture_route = match &form.picture {
        Some(upload) => Some(
            FileStore::from_config()
                .replace(PICTURE_CONTAINER, actor.picture.as_deref(), &upload.file_name, &upload.bytes)
                .await?,
        ),
        None => actor.picture,
    };

    sqlx::query("UPDATE actors SET name = $1, picture = $2 WHERE id = $3")
        .bind(&form.name)
        .bind(&picture_route)
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/actors/{id} - removes the row, then its picture asset
pub async fn remove(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let picture = sqlx::query_scalar::<_, Option<String>>("SELECT picture FROM actors WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    sqlx::query("DELETE FROM actors WHERE id = $1").bind(id).execute(&pool).await?;

    // File cleanup is best-effort; the row is already gone
    if let Some(route) = picture {
        if let Err(e) = FileStore::from_config().delete(&route).await {
            tracing::warn!("failed to delete picture asset {}: {}", route, e);
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
