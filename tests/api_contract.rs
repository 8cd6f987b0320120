// Contract tests that exercise the router and response surfaces without a
// live database: authorization short-circuits, error body shapes, and the
// pagination header.

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use tower::ServiceExt;

use marquee_api::auth::{self, Claims};
use marquee_api::error::ApiError;
use marquee_api::pagination::{Paginated, TOTAL_RECORDS_HEADER};

#[tokio::test]
async fn admin_routes_reject_missing_tokens() -> Result<()> {
    let app = marquee_api::app();

    let response = app
        .oneshot(Request::builder().uri("/api/genres").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_non_admin_tokens() -> Result<()> {
    let app = marquee_api::app();

    let claims = Claims::new("viewer@example.com".to_string(), false);
    let token = auth::generate_jwt(&claims)?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/genres")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn rating_endpoint_requires_a_bearer_token() -> Result<()> {
    let app = marquee_api::app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rating")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"movieId":1,"rate":5}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_tokens_are_unauthorized_not_server_errors() -> Result<()> {
    let app = marquee_api::app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/genres")
                .header("authorization", "Bearer not.a.token")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn validation_errors_are_a_flat_string_list() -> Result<()> {
    let response = ApiError::validation(vec![
        "name:First letter should be uppercase".to_string(),
        "name:The field name must be at most 10 characters".to_string(),
    ])
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let parsed: Vec<String> = serde_json::from_slice(&bytes)?;
    assert_eq!(parsed.len(), 2);
    assert!(parsed.iter().all(|e| e.starts_with("name:")));
    Ok(())
}

#[tokio::test]
async fn not_found_has_no_body() -> Result<()> {
    let response = ApiError::not_found().into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    assert!(bytes.is_empty());
    Ok(())
}

#[tokio::test]
async fn paginated_lists_publish_the_total_count_header() -> Result<()> {
    let response = Paginated::new(vec![1, 2, 3], 120).into_response();

    let total = response
        .headers()
        .get(TOTAL_RECORDS_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(total.as_deref(), Some("120"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let items: Vec<i32> = serde_json::from_slice(&bytes)?;
    assert_eq!(items, vec![1, 2, 3]);
    Ok(())
}
