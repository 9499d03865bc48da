use sqlx::PgPool;
use drones_storage::{
    dto::{
        common::PaginationParams,
        drone_category::{
            CreateDroneCategoryRequest, DroneCategoryFilter, UpdateDroneCategoryRequest,
        },
    },
    error::Result,
    models::DroneCategory,
    repository::drone_category::DroneCategoryRepository,
};

/// List one page of drone categories
pub async fn list_drone_categories(
    pool: &PgPool,
    filter: &DroneCategoryFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<DroneCategory>, i64)> {
    let repo = DroneCategoryRepository::new(pool);
    repo.list(filter, pagination).await
}

/// Get drone category by ID
pub async fn get_drone_category(pool: &PgPool, id: i64) -> Result<DroneCategory> {
    let repo = DroneCategoryRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new drone category
pub async fn create_drone_category(
    pool: &PgPool,
    request: &CreateDroneCategoryRequest,
) -> Result<DroneCategory> {
    let repo = DroneCategoryRepository::new(pool);
    repo.create(request).await
}

/// Replace a drone category
pub async fn replace_drone_category(
    pool: &PgPool,
    id: i64,
    request: &CreateDroneCategoryRequest,
) -> Result<DroneCategory> {
    let repo = DroneCategoryRepository::new(pool);
    repo.update(id, request).await
}

/// Partially update a drone category
pub async fn update_drone_category(
    pool: &PgPool,
    id: i64,
    request: &UpdateDroneCategoryRequest,
) -> Result<DroneCategory> {
    let repo = DroneCategoryRepository::new(pool);
    repo.patch(id, request).await
}

/// Delete a drone category
pub async fn delete_drone_category(pool: &PgPool, id: i64) -> Result<()> {
    let repo = DroneCategoryRepository::new(pool);
    repo.delete(id).await
}
