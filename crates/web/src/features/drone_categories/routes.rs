use axum::{Router, routing::get};
use drones_storage::Database;

use super::handlers::{
    create_drone_category, delete_drone_category, get_drone_category, list_drone_categories,
    replace_drone_category, update_drone_category,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route(
            "/drone-categories/",
            get(list_drone_categories).post(create_drone_category),
        )
        .route(
            "/drone-categories/:id/",
            get(get_drone_category)
                .put(replace_drone_category)
                .patch(update_drone_category)
                .delete(delete_drone_category),
        )
}
