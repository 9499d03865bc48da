use sqlx::PgPool;
use drones_storage::{
    dto::{
        common::PaginationParams,
        competition::{CompetitionFilter, CreateCompetitionRequest, UpdateCompetitionRequest},
    },
    error::Result,
    models::Competition,
    repository::competition::CompetitionRepository,
};

/// List one page of competitions
pub async fn list_competitions(
    pool: &PgPool,
    filter: &CompetitionFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<Competition>, i64)> {
    let repo = CompetitionRepository::new(pool);
    repo.list(filter, pagination).await
}

/// Get competition by ID
pub async fn get_competition(pool: &PgPool, id: i64) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new competition
pub async fn create_competition(
    pool: &PgPool,
    request: &CreateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.create(request).await
}

/// Replace a competition
pub async fn replace_competition(
    pool: &PgPool,
    id: i64,
    request: &CreateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.update(id, request).await
}

/// Partially update a competition
pub async fn update_competition(
    pool: &PgPool,
    id: i64,
    request: &UpdateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.patch(id, request).await
}

/// Delete a competition
pub async fn delete_competition(pool: &PgPool, id: i64) -> Result<()> {
    let repo = CompetitionRepository::new(pool);
    repo.delete(id).await
}
