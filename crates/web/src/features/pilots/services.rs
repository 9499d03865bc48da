use sqlx::PgPool;
use drones_storage::{
    dto::{
        common::PaginationParams,
        pilot::{CreatePilotRequest, PilotFilter, UpdatePilotRequest},
    },
    error::Result,
    models::Pilot,
    repository::pilot::PilotRepository,
};

/// List one page of pilots
pub async fn list_pilots(
    pool: &PgPool,
    filter: &PilotFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<Pilot>, i64)> {
    let repo = PilotRepository::new(pool);
    repo.list(filter, pagination).await
}

/// Get pilot by ID
pub async fn get_pilot(pool: &PgPool, id: i64) -> Result<Pilot> {
    let repo = PilotRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new pilot
pub async fn create_pilot(pool: &PgPool, request: &CreatePilotRequest) -> Result<Pilot> {
    let repo = PilotRepository::new(pool);
    repo.create(request).await
}

/// Replace a pilot
pub async fn replace_pilot(pool: &PgPool, id: i64, request: &CreatePilotRequest) -> Result<Pilot> {
    let repo = PilotRepository::new(pool);
    repo.update(id, request).await
}

/// Partially update a pilot
pub async fn update_pilot(pool: &PgPool, id: i64, request: &UpdatePilotRequest) -> Result<Pilot> {
    let repo = PilotRepository::new(pool);
    repo.patch(id, request).await
}

/// Delete a pilot
pub async fn delete_pilot(pool: &PgPool, id: i64) -> Result<()> {
    let repo = PilotRepository::new(pool);
    repo.delete(id).await
}
