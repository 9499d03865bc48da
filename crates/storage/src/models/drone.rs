use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Drone {
    pub id: i64,
    pub name: String,
    /// Category name, resolved through `drone_category_id`.
    pub drone_category: String,
    pub manufacturing_date: DateTime<Utc>,
    pub has_it_competed: bool,
    pub inserted_timestamp: DateTime<Utc>,
}
