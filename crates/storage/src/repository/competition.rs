use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::common::{PaginationParams, order_by_clause};
use crate::dto::competition::{
    CompetitionFilter, CreateCompetitionRequest, UpdateCompetitionRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Competition;
use crate::repository::drone::DroneRepository;
use crate::repository::pilot::PilotRepository;

const SELECT_COMPETITION: &str = r#"
    SELECT c.id, p.name AS pilot, d.name AS drone, c.distance_in_feet, c.date
    FROM competitions c
    INNER JOIN pilots p ON p.id = c.pilot_id
    INNER JOIN drones d ON d.id = c.drone_id
"#;

const ORDERING_FIELDS: &[(&str, &str)] = &[
    ("distance_in_feet", "c.distance_in_feet"),
    ("date", "c.date"),
];

pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of competitions matching the filter, along with the total match count
    pub async fn list(
        &self,
        filter: &CompetitionFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Competition>, i64)> {
        let total_items = self.count(filter).await?;

        let mut query = QueryBuilder::new(SELECT_COMPETITION);
        query.push(" WHERE 1=1");
        push_filters(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(order_by_clause(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            "c.distance_in_feet DESC",
            "c.id",
        ));
        query.push(" LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let competitions = query
            .build_query_as::<Competition>()
            .fetch_all(self.pool)
            .await?;

        Ok((competitions, total_items))
    }

    async fn count(&self, filter: &CompetitionFilter) -> Result<i64> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT COUNT(*)
            FROM competitions c
            INNER JOIN pilots p ON p.id = c.pilot_id
            INNER JOIN drones d ON d.id = c.drone_id
            WHERE 1=1
            "#,
        );
        push_filters(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Find competition by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Competition> {
        let competition =
            sqlx::query_as::<_, Competition>(&format!("{SELECT_COMPETITION} WHERE c.id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?
                .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Look up the pilot and drone IDs a request refers to
    async fn resolve_references(&self, req: &CreateCompetitionRequest) -> Result<(i64, i64)> {
        let pilot_id = PilotRepository::new(self.pool)
            .find_id_by_name(&req.pilot)
            .await?
            .ok_or_else(|| missing_reference("pilot", &req.pilot))?;

        let drone_id = DroneRepository::new(self.pool)
            .find_id_by_name(&req.drone)
            .await?
            .ok_or_else(|| missing_reference("drone", &req.drone))?;

        Ok((pilot_id, drone_id))
    }

    /// Record a new competition result
    pub async fn create(&self, req: &CreateCompetitionRequest) -> Result<Competition> {
        let (pilot_id, drone_id) = self.resolve_references(req).await?;

        let competition = sqlx::query_as::<_, Competition>(
            r#"
            WITH inserted AS (
                INSERT INTO competitions (pilot_id, drone_id, distance_in_feet, date)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT i.id, p.name AS pilot, d.name AS drone, i.distance_in_feet, i.date
            FROM inserted i
            INNER JOIN pilots p ON p.id = i.pilot_id
            INNER JOIN drones d ON d.id = i.drone_id
            "#,
        )
        .bind(pilot_id)
        .bind(drone_id)
        .bind(req.distance_in_feet)
        .bind(req.date)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_write_error(e, req))?
        .ok_or_else(|| missing_reference("pilot", &req.pilot))?;

        Ok(competition)
    }

    /// Replace every writable field of an existing competition
    pub async fn update(&self, id: i64, req: &CreateCompetitionRequest) -> Result<Competition> {
        let (pilot_id, drone_id) = self.resolve_references(req).await?;

        let competition = sqlx::query_as::<_, Competition>(
            r#"
            WITH updated AS (
                UPDATE competitions
                SET pilot_id = $2,
                    drone_id = $3,
                    distance_in_feet = $4,
                    date = $5
                WHERE id = $1
                RETURNING *
            )
            SELECT u.id, p.name AS pilot, d.name AS drone, u.distance_in_feet, u.date
            FROM updated u
            INNER JOIN pilots p ON p.id = u.pilot_id
            INNER JOIN drones d ON d.id = u.drone_id
            "#,
        )
        .bind(id)
        .bind(pilot_id)
        .bind(drone_id)
        .bind(req.distance_in_feet)
        .bind(req.date)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_write_error(e, req))?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Update only the fields present in `req`, in a single statement
    pub async fn patch(&self, id: i64, req: &UpdateCompetitionRequest) -> Result<Competition> {
        let pilot_id = match req.pilot.as_deref() {
            Some(name) => Some(
                PilotRepository::new(self.pool)
                    .find_id_by_name(name)
                    .await?
                    .ok_or_else(|| missing_reference("pilot", name))?,
            ),
            None => None,
        };
        let drone_id = match req.drone.as_deref() {
            Some(name) => Some(
                DroneRepository::new(self.pool)
                    .find_id_by_name(name)
                    .await?
                    .ok_or_else(|| missing_reference("drone", name))?,
            ),
            None => None,
        };

        let competition = sqlx::query_as::<_, Competition>(
            r#"
            WITH updated AS (
                UPDATE competitions
                SET pilot_id = COALESCE($2, competitions.pilot_id),
                    drone_id = COALESCE($3, competitions.drone_id),
                    distance_in_feet = COALESCE($4, competitions.distance_in_feet),
                    date = COALESCE($5, competitions.date)
                WHERE id = $1
                RETURNING *
            )
            SELECT u.id, p.name AS pilot, d.name AS drone, u.distance_in_feet, u.date
            FROM updated u
            INNER JOIN pilots p ON p.id = u.pilot_id
            INNER JOIN drones d ON d.id = u.drone_id
            "#,
        )
        .bind(id)
        .bind(pilot_id)
        .bind(drone_id)
        .bind(req.distance_in_feet)
        .bind(req.date)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            map_reference_error(
                e,
                req.pilot.as_deref().unwrap_or_default(),
                req.drone.as_deref().unwrap_or_default(),
            )
        })?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Delete a competition by ID
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn missing_reference(field: &'static str, name: &str) -> StorageError {
    StorageError::invalid(field, format!("Object with name={name} does not exist."))
}

/// A reference can disappear between lookup and write; report it on the field it came from.
fn map_write_error(error: sqlx::Error, req: &CreateCompetitionRequest) -> StorageError {
    map_reference_error(error, &req.pilot, &req.drone)
}

fn map_reference_error(error: sqlx::Error, pilot: &str, drone: &str) -> StorageError {
    let error = StorageError::from(error);
    if !error.is_foreign_key_violation() {
        return error;
    }

    match error.constraint() {
        Some("competitions_drone_id_fkey") => missing_reference("drone", drone),
        _ => missing_reference("pilot", pilot),
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &CompetitionFilter) {
    if let Some(ref pilot_name) = filter.pilot_name {
        query.push(" AND p.name = ");
        query.push_bind(pilot_name.clone());
    }

    if let Some(ref drone_name) = filter.drone_name {
        query.push(" AND d.name = ");
        query.push_bind(drone_name.clone());
    }

    if let Some(min) = filter.min_distance_in_feet {
        query.push(" AND c.distance_in_feet >= ");
        query.push_bind(min);
    }

    if let Some(max) = filter.max_distance_in_feet {
        query.push(" AND c.distance_in_feet <= ");
        query.push_bind(max);
    }

    if let Some(from) = filter.from_date {
        query.push(" AND c.date >= ");
        query.push_bind(from);
    }

    if let Some(to) = filter.to_date {
        query.push(" AND c.date <= ");
        query.push_bind(to);
    }
}
