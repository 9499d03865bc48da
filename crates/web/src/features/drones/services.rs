use sqlx::PgPool;
use drones_storage::{
    dto::{
        common::PaginationParams,
        drone::{CreateDroneRequest, DroneFilter, UpdateDroneRequest},
    },
    error::Result,
    models::Drone,
    repository::drone::DroneRepository,
};

/// List one page of drones
pub async fn list_drones(
    pool: &PgPool,
    filter: &DroneFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<Drone>, i64)> {
    let repo = DroneRepository::new(pool);
    repo.list(filter, pagination).await
}

/// Get drone by ID
pub async fn get_drone(pool: &PgPool, id: i64) -> Result<Drone> {
    let repo = DroneRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new drone
pub async fn create_drone(pool: &PgPool, request: &CreateDroneRequest) -> Result<Drone> {
    let repo = DroneRepository::new(pool);
    repo.create(request).await
}

/// Replace a drone
pub async fn replace_drone(pool: &PgPool, id: i64, request: &CreateDroneRequest) -> Result<Drone> {
    let repo = DroneRepository::new(pool);
    repo.update(id, request).await
}

/// Partially update a drone
pub async fn update_drone(pool: &PgPool, id: i64, request: &UpdateDroneRequest) -> Result<Drone> {
    let repo = DroneRepository::new(pool);
    repo.patch(id, request).await
}

/// Delete a drone
pub async fn delete_drone(pool: &PgPool, id: i64) -> Result<()> {
    let repo = DroneRepository::new(pool);
    repo.delete(id).await
}
