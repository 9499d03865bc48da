use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: i64,
    pub pilot: String,
    pub drone: String,
    pub distance_in_feet: i32,
    pub date: DateTime<Utc>,
}
