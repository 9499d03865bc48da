use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DroneCategory {
    pub id: i64,
    pub name: String,
    /// Names of the drones filed under this category, alphabetical.
    pub drones: Vec<String>,
}
