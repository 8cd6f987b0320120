use axum::{
    extract::{Multipart, Path, Query},
    http::{HeaderMap, StatusCode},
    Json,
};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::database::bind::{bind_param_query_as, bind_param_query_scalar};
use crate::database::models::{Genre, Movie, MovieTheater};
use crate::database::DatabaseManager;
use crate::dto::actors::MovieActorDto;
use crate::dto::genres::GenreDto;
use crate::dto::movies::{
    LandingPageDto, MovieDetailDto, MovieDto, MovieForm, MoviePostGetDto, MoviePutGetDto,
};
use crate::dto::theaters::MovieTheaterDto;
use crate::error::ApiError;
use crate::filter::MovieFilter;
use crate::middleware::{optional_user, AuthUser};
use crate::pagination::{Page, Paginated};
use crate::storage::FileStore;

const MOVIE_COLUMNS: &str = "id, title, summary, trailer, in_theaters, release_date, poster";
const POSTER_CONTAINER: &str = "posters";
const LANDING_TOP: i64 = 6;

/// GET /api/movies - landing page: next releases and what is playing now
pub async fn landing() -> Result<Json<LandingPageDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let upcoming_query = format!(
        "SELECT {} FROM movies WHERE release_date > CURRENT_DATE \
         ORDER BY release_date ASC LIMIT {}",
        MOVIE_COLUMNS, LANDING_TOP
    );
    let in_theaters_query = format!(
        "SELECT {} FROM movies WHERE in_theaters = TRUE \
         ORDER BY release_date ASC LIMIT {}",
        MOVIE_COLUMNS, LANDING_TOP
    );

    let upcoming = sqlx::query_as::<_, Movie>(&upcoming_query).fetch_all(&pool).await?;
    let in_theaters = sqlx::query_as::<_, Movie>(&in_theaters_query).fetch_all(&pool).await?;

    Ok(Json(LandingPageDto {
        upcoming_releases: upcoming.into_iter().map(MovieDto::from).collect(),
        in_theaters: in_theaters.into_iter().map(MovieDto::from).collect(),
    }))
}

/// GET /api/movies/filter - optional predicates, title ordering, paging.
/// The count of the filtered, unpaginated set rides the response header.
pub async fn filter(
    Query(filter): Query<MovieFilter>,
    Query(page): Query<Page>,
) -> Result<Paginated<MovieDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let count_sql = filter.to_count_sql();
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql.query);
    for param in count_sql.params.iter() {
        count_query = bind_param_query_scalar(count_query, param);
    }
    let total = count_query.fetch_one(&pool).await?;

    let page_sql = filter.to_sql(&page);
    let mut movies_query = sqlx::query_as::<_, Movie>(&page_sql.query);
    for param in page_sql.params.iter() {
        movies_query = bind_param_query_as(movies_query, param);
    }
    let movies = movies_query.fetch_all(&pool).await?;

    Ok(Paginated::new(movies.into_iter().map(MovieDto::from).collect(), total))
}

/// GET /api/movies/{id} - detail with associations and rating aggregate.
/// Identity is opportunistic: an anonymous caller still gets the detail,
/// just with a zero own-vote.
pub async fn detail(Path(id): Path<i32>, headers: HeaderMap) -> Result<Json<MovieDetailDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let viewer = optional_user(&headers);
    let detail = load_detail(&pool, id, viewer.as_ref()).await?;
    Ok(Json(detail))
}

/// GET /api/movies/postget - selectable genres and theaters for the create form
pub async fn post_get() -> Result<Json<MoviePostGetDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name ASC")
        .fetch_all(&pool)
        .await?;
    let theaters = sqlx::query_as::<_, MovieTheater>(
        "SELECT id, name, latitude, longitude FROM movie_theaters ORDER BY name ASC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(MoviePostGetDto {
        genres: genres.into_iter().map(GenreDto::from).collect(),
        movie_theaters: theaters.into_iter().map(MovieTheaterDto::from).collect(),
    }))
}

/// GET /api/movies/putget/{id} - detail plus the non-selected complements
pub async fn put_get(Path(id): Path<i32>, headers: HeaderMap) -> Result<Json<MoviePutGetDto>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let viewer = optional_user(&headers);
    let detail = load_detail(&pool, id, viewer.as_ref()).await?;

    let selected_genre_ids: Vec<i32> = detail.genres.iter().map(|g| g.id).collect();
    let non_selected_genres = sqlx::query_as::<_, Genre>(
        "SELECT id, name FROM genres WHERE NOT (id = ANY($1)) ORDER BY name ASC",
    )
    .bind(&selected_genre_ids)
    .fetch_all(&pool)
    .await?;

    let selected_theater_ids: Vec<i32> = detail.movie_theaters.iter().map(|t| t.id).collect();
    let non_selected_theaters = sqlx::query_as::<_, MovieTheater>(
        "SELECT id, name, latitude, longitude FROM movie_theaters \
         WHERE NOT (id = ANY($1)) ORDER BY name ASC",
    )
    .bind(&selected_theater_ids)
    .fetch_all(&pool)
    .await?;

    let actors = detail.actors.clone();
    let selected_genres = detail.genres.clone();
    let selected_movie_theaters = detail.movie_theaters.clone();

    Ok(Json(MoviePutGetDto {
        movie: detail,
        selected_genres,
        non_selected_genres: non_selected_genres.into_iter().map(GenreDto::from).collect(),
        selected_movie_theaters,
        non_selected_movie_theaters: non_selected_theaters
            .into_iter()
            .map(MovieTheaterDto::from)
            .collect(),
        actors,
    }))
}

/// POST /api/movies - multipart form, optional poster upload
pub async fn create(multipart: Multipart) -> Result<StatusCode, ApiError> {
    let form = MovieForm::from_multipart(multipart).await?;
    form.validate()?;

    let poster_route = match &form.poster {
        Some(upload) => Some(
            FileStore::from_config()
                .save(POSTER_CONTAINER, &upload.file_name, &upload.bytes)
                .await?,
        ),
        None => None,
    };

    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let movie_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO movies (title, summary, trailer, in_theaters, release_date, poster) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(&form.title)
    .bind(&form.summary)
    .bind(&form.trailer)
    .bind(form.in_theaters)
    .bind(form.release_date)
    .bind(&poster_route)
    .fetch_one(&mut *tx)
    .await?;

    insert_associations(&mut tx, movie_id, &form).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/movies/{id} - multipart; associations are replaced wholesale and
/// cast order is reassigned from submission order
pub async fn update(Path(id): Path<i32>, multipart: Multipart) -> Result<StatusCode, ApiError> {
    let form = MovieForm::from_multipart(multipart).await?;
    form.validate()?;

    let pool = DatabaseManager::pool().await?;
    let query = format!("SELECT {} FROM movies WHERE id = $1", MOVIE_COLUMNS);
    let existing = sqlx::query_as::<_, Movie>(&query)
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    let poster_route = match &form.poster {
        Some(upload) => Some(
            FileStore::from_config()
                .replace(POSTER_CONTAINER, existing.poster.as_deref(), &upload.file_name, &upload.bytes)
                .await?,
        ),
        None => existing.poster,
    };

    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE movies SET title = $1, summary = $2, trailer = $3, in_theaters = $4, \
         release_date = $5, poster = $6 WHERE id = $7",
    )
    .bind(&form.title)
    .bind(&form.summary)
    .bind(&form.trailer)
    .bind(form.in_theaters)
    .bind(form.release_date)
    .bind(&poster_route)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM movies_genres WHERE movie_id = $1").bind(id).execute(&mut *tx).await?;
    sqlx::query("DELETE FROM movie_theaters_movies WHERE movie_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM movies_actors WHERE movie_id = $1").bind(id).execute(&mut *tx).await?;

    insert_associations(&mut tx, id, &form).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/movies/{id} - removes the row, then its poster asset
pub async fn remove(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let poster = sqlx::query_scalar::<_, Option<String>>("SELECT poster FROM movies WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    sqlx::query("DELETE FROM movies WHERE id = $1").bind(id).execute(&pool).await?;

    // File cleanup is best-effort; the row is already gone
    if let Some(route) = poster {
        if let Err(e) = FileStore::from_config().delete(&route).await {
            tracing::warn!("failed to delete poster asset {}: {}", route, e);
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, FromRow)]
struct CastRow {
    id: i32,
    name: String,
    picture: Option<String>,
    character: Option<String>,
    ord: i32,
}

async fn load_detail(
    pool: &PgPool,
    id: i32,
    viewer: Option<&AuthUser>,
) -> Result<MovieDetailDto, ApiError> {
    let query = format!("SELECT {} FROM movies WHERE id = $1", MOVIE_COLUMNS);
    let movie = sqlx::query_as::<_, Movie>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    let genres = sqlx::query_as::<_, Genre>(
        "SELECT g.id, g.name FROM genres g \
         JOIN movies_genres mg ON mg.genre_id = g.id \
         WHERE mg.movie_id = $1 ORDER BY g.name ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let theaters = sqlx::query_as::<_, MovieTheater>(
        "SELECT t.id, t.name, t.latitude, t.longitude FROM movie_theaters t \
         JOIN movie_theaters_movies mt ON mt.movie_theater_id = t.id \
         WHERE mt.movie_id = $1 ORDER BY t.name ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let cast = sqlx::query_as::<_, CastRow>(
        "SELECT a.id, a.name, a.picture, ma.character, ma.ord FROM actors a \
         JOIN movies_actors ma ON ma.actor_id = a.id \
         WHERE ma.movie_id = $1 ORDER BY ma.ord ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let average_vote =
        sqlx::query_scalar::<_, f64>("SELECT COALESCE(AVG(rate), 0)::float8 FROM ratings WHERE movie_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;

    let user_vote = match viewer {
        Some(user) => sqlx::query_scalar::<_, i32>(
            "SELECT r.rate FROM ratings r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.movie_id = $1 AND u.email = $2",
        )
        .bind(id)
        .bind(&user.email)
        .fetch_optional(pool)
        .await?
        .unwrap_or(0),
        None => 0,
    };

    Ok(MovieDetailDto {
        movie: movie.into(),
        genres: genres.into_iter().map(GenreDto::from).collect(),
        movie_theaters: theaters.into_iter().map(MovieTheaterDto::from).collect(),
        actors: cast
            .into_iter()
            .map(|row| MovieActorDto {
                id: row.id,
                name: row.name,
                picture: row.picture,
                character: row.character,
                order: row.ord,
            })
            .collect(),
        average_vote,
        user_vote,
    })
}

/// Insert the movie's join rows. Cast display order is a dense 0-based
/// sequence taken from submission order, reassigned on every write.
async fn insert_associations(
    tx: &mut Transaction<'_, Postgres>,
    movie_id: i32,
    form: &MovieForm,
) -> Result<(), ApiError> {
    for genre_id in &form.genres_ids {
        sqlx::query("INSERT INTO movies_genres (movie_id, genre_id) VALUES ($1, $2)")
            .bind(movie_id)
            .bind(genre_id)
            .execute(&mut **tx)
            .await?;
    }

    for theater_id in &form.movie_theaters_ids {
        sqlx::query("INSERT INTO movie_theaters_movies (movie_theater_id, movie_id) VALUES ($1, $2)")
            .bind(theater_id)
            .bind(movie_id)
            .execute(&mut **tx)
            .await?;
    }

    for (order, actor) in form.actors.iter().enumerate() {
        sqlx::query(
            "INSERT INTO movies_actors (movie_id, actor_id, character, ord) VALUES ($1, $2, $3, $4)",
        )
        .bind(movie_id)
        .bind(actor.actor_id)
        .bind(&actor.character)
        .bind(order as i32)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
