use axum::{middleware::from_fn, routing::get, routing::post, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod storage;

/// Assemble the full application router. Each endpoint declares exactly one
/// of three policies: anonymous, any authenticated bearer, or IsAdmin.
pub fn app() -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(public_routes())
        .merge(bearer_routes())
        .merge(admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use handlers::{accounts, genres, movies};

    Router::new()
        .route("/api/genres/all", get(genres::all))
        .route("/api/movies", get(movies::landing))
        .route("/api/movies/filter", get(movies::filter))
        .route("/api/movies/:id", get(movies::detail))
        .route("/api/accounts/create", post(accounts::create))
        .route("/api/accounts/login", post(accounts::login))
}

fn bearer_routes() -> Router {
    use handlers::ratings;

    Router::new()
        .route("/api/rating", post(ratings::rate))
        .route_layer(from_fn(middleware::bearer_auth))
}

fn admin_routes() -> Router {
    use axum::routing::put;
    use handlers::{accounts, actors, genres, movies, theaters};

    Router::new()
        // Genres
        .route("/api/genres", get(genres::list).post(genres::create))
        .route(
            "/api/genres/:id",
            get(genres::get_by_id).put(genres::update).delete(genres::remove),
        )
        // Movies
        .route("/api/movies", post(movies::create))
        .route("/api/movies/postget", get(movies::post_get))
        .route("/api/movies/putget/:id", get(movies::put_get))
        .route("/api/movies/:id", put(movies::update).delete(movies::remove))
        // Theaters
        .route("/api/movietheaters", get(theaters::list).post(theaters::create))
        .route(
            "/api/movietheaters/:id",
            get(theaters::get_by_id).put(theaters::update).delete(theaters::remove),
        )
        // Actors
        .route("/api/actors", get(actors::list).post(actors::create))
        .route("/api/actors/searchByName/:query", get(actors::search_by_name))
        .route(
            "/api/actors/:id",
            get(actors::get_by_id).put(actors::update).delete(actors::remove),
        )
        // Accounts
        .route("/api/accounts/listUsrs", get(accounts::list_users))
        .route("/api/accounts/makeAdmin", post(accounts::make_admin))
        .route("/api/accounts/removeAdmin", post(accounts::remove_admin))
        // IsAdmin policy: token first, then the role claim
        .route_layer(from_fn(middleware::require_admin))
        .route_layer(from_fn(middleware::bearer_auth))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
