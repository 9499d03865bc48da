use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::common::{PaginationParams, escape_like, order_by_clause};
use crate::dto::drone::{CreateDroneRequest, DroneFilter, UpdateDroneRequest};
use crate::error::{Result, StorageError};
use crate::models::Drone;
use crate::repository::drone_category::DroneCategoryRepository;

const SELECT_DRONE: &str = r#"
    SELECT d.id, d.name, dc.name AS drone_category, d.manufacturing_date,
           d.has_it_competed, d.inserted_timestamp
    FROM drones d
    INNER JOIN drone_categories dc ON dc.id = d.drone_category_id
"#;

const ORDERING_FIELDS: &[(&str, &str)] = &[
    ("name", "d.name"),
    ("manufacturing_date", "d.manufacturing_date"),
];

const DUPLICATE_NAME: &str = "drone with this name already exists.";

pub struct DroneRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DroneRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of drones matching the filter, along with the total match count
    pub async fn list(
        &self,
        filter: &DroneFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Drone>, i64)> {
        let total_items = self.count(filter).await?;

        let mut query = QueryBuilder::new(SELECT_DRONE);
        query.push(" WHERE 1=1");
        push_filters(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(order_by_clause(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            "d.name ASC",
            "d.id",
        ));
        query.push(" LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let drones = query.build_query_as::<Drone>().fetch_all(self.pool).await?;

        Ok((drones, total_items))
    }

    async fn count(&self, filter: &DroneFilter) -> Result<i64> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT COUNT(*)
            FROM drones d
            INNER JOIN drone_categories dc ON dc.id = d.drone_category_id
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

    /// Find drone by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Drone> {
        let drone = sqlx::query_as::<_, Drone>(&format!("{SELECT_DRONE} WHERE d.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(drone)
    }

    /// Resolve a drone name to its ID
    pub async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM drones WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(id)
    }

    async fn resolve_category(&self, name: &str) -> Result<i64> {
        DroneCategoryRepository::new(self.pool)
            .find_id_by_name(name)
            .await?
            .ok_or_else(|| missing_category(name))
    }

    /// Create a new drone under an existing category
    pub async fn create(&self, req: &CreateDroneRequest) -> Result<Drone> {
        let category_id = self.resolve_category(&req.drone_category).await?;

        let drone = sqlx::query_as::<_, Drone>(
            r#"
            WITH inserted AS (
                INSERT INTO drones (name, drone_category_id, manufacturing_date, has_it_competed)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT i.id, i.name, dc.name AS drone_category, i.manufacturing_date,
                   i.has_it_competed, i.inserted_timestamp
            FROM inserted i
            INNER JOIN drone_categories dc ON dc.id = i.drone_category_id
            "#,
        )
        .bind(&req.name)
        .bind(category_id)
        .bind(req.manufacturing_date)
        .bind(req.has_it_competed)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| self.map_write_error(e, &req.drone_category))?
        .ok_or_else(|| missing_category(&req.drone_category))?;

        Ok(drone)
    }

    /// Replace every writable field of an existing drone
    pub async fn update(&self, id: i64, req: &CreateDroneRequest) -> Result<Drone> {
        let category_id = self.resolve_category(&req.drone_category).await?;

        let drone = sqlx::query_as::<_, Drone>(
            r#"
            WITH updated AS (
                UPDATE drones
                SET name = $2,
                    drone_category_id = $3,
                    manufacturing_date = $4,
                    has_it_competed = $5
                WHERE id = $1
                RETURNING *
            )
            SELECT u.id, u.name, dc.name AS drone_category, u.manufacturing_date,
                   u.has_it_competed, u.inserted_timestamp
            FROM updated u
            INNER JOIN drone_categories dc ON dc.id = u.drone_category_id
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(category_id)
        .bind(req.manufacturing_date)
        .bind(req.has_it_competed)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| self.map_write_error(e, &req.drone_category))?
        .ok_or(StorageError::NotFound)?;

        Ok(drone)
    }

    /// Update only the fields present in `req`, in a single statement
    pub async fn patch(&self, id: i64, req: &UpdateDroneRequest) -> Result<Drone> {
        let category_id = match req.drone_category.as_deref() {
            Some(name) => Some(self.resolve_category(name).await?),
            None => None,
        };

        let drone = sqlx::query_as::<_, Drone>(
            r#"
            WITH updated AS (
                UPDATE drones
                SET name = COALESCE($2, name),
                    drone_category_id = COALESCE($3, drone_category_id),
                    manufacturing_date = COALESCE($4, manufacturing_date),
                    has_it_competed = COALESCE($5, has_it_competed)
                WHERE id = $1
                RETURNING *
            )
            SELECT u.id, u.name, dc.name AS drone_category, u.manufacturing_date,
                   u.has_it_competed, u.inserted_timestamp
            FROM updated u
            INNER JOIN drone_categories dc ON dc.id = u.drone_category_id
            "#,
        )
        .bind(id)
        .bind(req.name.as_deref())
        .bind(category_id)
        .bind(req.manufacturing_date)
        .bind(req.has_it_competed)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| self.map_write_error(e, req.drone_category.as_deref().unwrap_or_default()))?
        .ok_or(StorageError::NotFound)?;

        Ok(drone)
    }

    /// Delete a drone by ID, along with its competition records
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM drones WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    fn map_write_error(&self, error: sqlx::Error, category: &str) -> StorageError {
        StorageError::from(error)
            .on_unique_violation("name", DUPLICATE_NAME)
            .on_foreign_key_violation("drone_category", &missing_category_message(category))
    }
}

fn missing_category_message(name: &str) -> String {
    format!("Object with name={name} does not exist.")
}

fn missing_category(name: &str) -> StorageError {
    StorageError::invalid("drone_category", missing_category_message(name))
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &DroneFilter) {
    if let Some(ref name) = filter.name {
        query.push(" AND d.name = ");
        query.push_bind(name.clone());
    }

    if let Some(ref category) = filter.drone_category {
        query.push(" AND dc.name = ");
        query.push_bind(category.clone());
    }

    if let Some(has_it_competed) = filter.has_it_competed {
        query.push(" AND d.has_it_competed = ");
        query.push_bind(has_it_competed);
    }

    if let Some(ref search) = filter.search {
        query.push(" AND d.name ILIKE ");
        query.push_bind(format!("{}%", escape_like(search)));
    }
}
