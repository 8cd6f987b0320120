use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub summary: Option<String>,
    pub trailer: Option<String>,
    pub in_theaters: bool,
    pub release_date: NaiveDate,
    pub poster: Option<String>,
}

/// Join row carrying the per-movie cast annotations. `ord` is a dense
/// 0-based sequence reassigned on every movie create/update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovieActor {
    pub movie_id: i32,
    pub actor_id: i32,
    pub character: Option<String>,
    pub ord: i32,
}
