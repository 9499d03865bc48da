use axum::{Json, Router, routing::get};
use drones_storage::Database;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::WebError;

/// Entry points of the API
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiRoot {
    #[serde(rename = "drone-categories")]
    pub drone_categories: &'static str,
    pub drones: &'static str,
    pub pilots: &'static str,
    pub competitions: &'static str,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Links to every collection", body = ApiRoot)
    ),
    tag = "root"
)]
pub async fn api_root() -> Json<ApiRoot> {
    Json(ApiRoot {
        drone_categories: "/drone-categories/",
        drones: "/drones/",
        pilots: "/pilots/",
        competitions: "/competitions/",
    })
}

async fn not_found() -> WebError {
    WebError::NotFound
}

pub fn routes() -> Router<Database> {
    Router::new().route("/", get(api_root)).fallback(not_found)
}
