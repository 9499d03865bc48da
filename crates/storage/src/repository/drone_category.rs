use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::common::{PaginationParams, escape_like, order_by_clause};
use crate::dto::drone_category::{
    CreateDroneCategoryRequest, DroneCategoryFilter, UpdateDroneCategoryRequest,
};
use crate::error::{Result, StorageError};
use crate::models::DroneCategory;

const SELECT_DRONE_CATEGORY: &str = r#"
    SELECT dc.id, dc.name,
           ARRAY(SELECT d.name FROM drones d WHERE d.drone_category_id = dc.id ORDER BY d.name)::text[] AS drones
    FROM drone_categories dc
"#;

const ORDERING_FIELDS: &[(&str, &str)] = &[("name", "dc.name")];

const DUPLICATE_NAME: &str = "drone category with this name already exists.";

pub struct DroneCategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DroneCategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of drone categories matching the filter, along with the total match count
    pub async fn list(
        &self,
        filter: &DroneCategoryFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<DroneCategory>, i64)> {
        let total_items = self.count(filter).await?;

        let mut query = QueryBuilder::new(SELECT_DRONE_CATEGORY);
        query.push(" WHERE 1=1");
        push_filters(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(order_by_clause(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            "dc.name ASC",
            "dc.id",
        ));
        query.push(" LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let categories = query
            .build_query_as::<DroneCategory>()
            .fetch_all(self.pool)
            .await?;

        Ok((categories, total_items))
    }

    async fn count(&self, filter: &DroneCategoryFilter) -> Result<i64> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM drone_categories dc WHERE 1=1");
        push_filters(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Find drone category by ID
    pub async fn find_by_id(&self, id: i64) -> Result<DroneCategory> {
        let category = sqlx::query_as::<_, DroneCategory>(&format!(
            "{SELECT_DRONE_CATEGORY} WHERE dc.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Resolve a category name to its ID
    pub async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM drone_categories WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(id)
    }

    /// Create a new drone category
    pub async fn create(&self, req: &CreateDroneCategoryRequest) -> Result<DroneCategory> {
        let category = sqlx::query_as::<_, DroneCategory>(
            r#"
            INSERT INTO drone_categories (name)
            VALUES ($1)
            RETURNING id, name, ARRAY[]::text[] AS drones
            "#,
        )
        .bind(&req.name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("name", DUPLICATE_NAME))?;

        Ok(category)
    }

    /// Replace every writable field of an existing drone category
    pub async fn update(&self, id: i64, req: &CreateDroneCategoryRequest) -> Result<DroneCategory> {
        let category = sqlx::query_as::<_, DroneCategory>(
            r#"
            UPDATE drone_categories dc
            SET name = $2
            WHERE dc.id = $1
            RETURNING dc.id, dc.name,
                      ARRAY(SELECT d.name FROM drones d WHERE d.drone_category_id = dc.id ORDER BY d.name)::text[] AS drones
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("name", DUPLICATE_NAME))?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Update only the fields present in `req`, in a single statement
    pub async fn patch(&self, id: i64, req: &UpdateDroneCategoryRequest) -> Result<DroneCategory> {
        let category = sqlx::query_as::<_, DroneCategory>(
            r#"
            UPDATE drone_categories dc
            SET name = COALESCE($2, dc.name)
            WHERE dc.id = $1
            RETURNING dc.id, dc.name,
                      ARRAY(SELECT d.name FROM drones d WHERE d.drone_category_id = dc.id ORDER BY d.name)::text[] AS drones
            "#,
        )
        .bind(id)
        .bind(req.name.as_deref())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("name", DUPLICATE_NAME))?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Delete a drone category by ID, along with its drones
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM drone_categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &DroneCategoryFilter) {
    if let Some(ref name) = filter.name {
        query.push(" AND dc.name = ");
        query.push_bind(name.clone());
    }

    if let Some(ref search) = filter.search {
        query.push(" AND dc.name ILIKE ");
        query.push_bind(format!("{}%", escape_like(search)));
    }
}
