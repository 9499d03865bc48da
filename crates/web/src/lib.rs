pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod openapi;
pub mod pagination;

use std::time::Duration;

use axum::Router;
use drones_storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use middleware::auth::{ApiKeys, AuthState};
use openapi::ApiDoc;

/// Builds the full application router.
pub fn app(db: Database, api_keys: ApiKeys) -> Router {
    let auth = AuthState::new(db.clone(), api_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(features::root::routes())
        .merge(features::drone_categories::routes())
        .merge(features::drones::routes())
        .merge(features::pilots::routes(auth))
        .merge(features::competitions::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}
