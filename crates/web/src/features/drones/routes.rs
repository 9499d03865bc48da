use axum::{Router, routing::get};
use drones_storage::Database;

use super::handlers::{
    create_drone, delete_drone, get_drone, list_drones, replace_drone, update_drone,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/drones/", get(list_drones).post(create_drone))
        .route(
            "/drones/:id/",
            get(get_drone)
                .put(replace_drone)
                .patch(update_drone)
                .delete(delete_drone),
        )
}
