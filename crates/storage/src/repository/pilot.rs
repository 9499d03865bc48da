use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::common::{PaginationParams, escape_like, order_by_clause};
use crate::dto::pilot::{CreatePilotRequest, PilotFilter, UpdatePilotRequest};
use crate::error::{Result, StorageError};
use crate::models::Pilot;

const SELECT_PILOT: &str = r#"
    SELECT p.id, p.name, p.gender, p.races_count, p.inserted_timestamp,
           (SELECT COUNT(*) FROM competitions c WHERE c.pilot_id = p.id) AS competitions_count
    FROM pilots p
"#;

const RETURNING_PILOT: &str = r#"
    RETURNING pilots.id, pilots.name, pilots.gender, pilots.races_count, pilots.inserted_timestamp,
              (SELECT COUNT(*) FROM competitions c WHERE c.pilot_id = pilots.id) AS competitions_count
"#;

const ORDERING_FIELDS: &[(&str, &str)] = &[("name", "p.name"), ("races_count", "p.races_count")];

const DUPLICATE_NAME: &str = "pilot with this name already exists.";

pub struct PilotRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PilotRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of pilots matching the filter, along with the total match count
    pub async fn list(
        &self,
        filter: &PilotFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Pilot>, i64)> {
        let total_items = self.count(filter).await?;

        let mut query = QueryBuilder::new(SELECT_PILOT);
        query.push(" WHERE 1=1");
        push_filters(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(order_by_clause(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            "p.name ASC",
            "p.id",
        ));
        query.push(" LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let pilots = query.build_query_as::<Pilot>().fetch_all(self.pool).await?;

        Ok((pilots, total_items))
    }

    async fn count(&self, filter: &PilotFilter) -> Result<i64> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM pilots p WHERE 1=1");
        push_filters(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Find pilot by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Pilot> {
        let pilot = sqlx::query_as::<_, Pilot>(&format!("{SELECT_PILOT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(pilot)
    }

    /// Resolve a pilot name to its ID
    pub async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM pilots WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(id)
    }

    /// Create a new pilot
    pub async fn create(&self, req: &CreatePilotRequest) -> Result<Pilot> {
        let pilot = sqlx::query_as::<_, Pilot>(&format!(
            r#"
            INSERT INTO pilots (name, gender, races_count)
            VALUES ($1, $2, $3)
            {RETURNING_PILOT}
            "#
        ))
        .bind(&req.name)
        .bind(&req.gender)
        .bind(req.races_count)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("name", DUPLICATE_NAME))?;

        Ok(pilot)
    }

    /// Replace every writable field of an existing pilot
    pub async fn update(&self, id: i64, req: &CreatePilotRequest) -> Result<Pilot> {
        let pilot = sqlx::query_as::<_, Pilot>(&format!(
            r#"
            UPDATE pilots
            SET name = $2,
                gender = $3,
                races_count = $4
            WHERE pilots.id = $1
            {RETURNING_PILOT}
            "#
        ))
        .bind(id)
        .bind(&req.name)
        .bind(&req.gender)
        .bind(req.races_count)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("name", DUPLICATE_NAME))?
        .ok_or(StorageError::NotFound)?;

        Ok(pilot)
    }

    /// Update only the fields present in `req`, in a single statement
    pub async fn patch(&self, id: i64, req: &UpdatePilotRequest) -> Result<Pilot> {
        let pilot = sqlx::query_as::<_, Pilot>(&format!(
            r#"
            UPDATE pilots
            SET name = COALESCE($2, pilots.name),
                gender = COALESCE($3, pilots.gender),
                races_count = COALESCE($4, pilots.races_count)
            WHERE pilots.id = $1
            {RETURNING_PILOT}
            "#
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.gender.as_deref())
        .bind(req.races_count)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("name", DUPLICATE_NAME))?
        .ok_or(StorageError::NotFound)?;

        Ok(pilot)
    }

    /// Delete a pilot by ID, along with their competition records
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM pilots WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &PilotFilter) {
    if let Some(ref name) = filter.name {
        query.push(" AND p.name = ");
        query.push_bind(name.clone());
    }

    if let Some(ref gender) = filter.gender {
        query.push(" AND p.gender = ");
        query.push_bind(gender.clone());
    }

    if let Some(races_count) = filter.races_count {
        query.push(" AND p.races_count = ");
        query.push_bind(races_count);
    }

    if let Some(ref search) = filter.search {
        query.push(" AND p.name ILIKE ");
        query.push_bind(format!("{}%", escape_like(search)));
    }
}
