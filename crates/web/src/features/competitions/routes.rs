use axum::{Router, routing::get};
use drones_storage::Database;

use super::handlers::{
    create_competition, delete_competition, get_competition, list_competitions,
    replace_competition, update_competition,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/competitions/", get(list_competitions).post(create_competition))
        .route(
            "/competitions/:id/",
            get(get_competition)
                .put(replace_competition)
                .patch(update_competition)
                .delete(delete_competition),
        )
}
