use axum::{Router, middleware, routing::get};
use drones_storage::Database;

use super::handlers::{
    create_pilot, delete_pilot, get_pilot, list_pilots, replace_pilot, update_pilot,
};
use crate::middleware::auth::{AuthState, require_auth};

/// Every pilot route sits behind the token check.
pub fn routes(auth: AuthState) -> Router<Database> {
    Router::new()
        .route("/pilots/", get(list_pilots).post(create_pilot))
        .route(
            "/pilots/:id/",
            get(get_pilot)
                .put(replace_pilot)
                .patch(update_pilot)
                .delete(delete_pilot),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
}
