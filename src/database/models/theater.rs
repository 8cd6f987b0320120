use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovieTheater {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
