use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One rating per (movie, user) pair, enforced by a unique index; rating
/// submission is an upsert against that key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: i32,
    pub movie_id: i32,
    pub user_id: Uuid,
    pub rate: i32,
}
