//! Repository for the `estimation_requests` table.

use chrono::Utc;
use estimation_core::error::CoreError;
use estimation_core::status::StatusCatalog;
use estimation_core::types::DbId;
use validator::Validate;

use crate::error::DbError;
use crate::models::estimation_request::{
    CreateEstimationRequest, EstimationRequest, UpdateEstimationRequest,
};
use crate::pool::{on_session, DbPool};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, request_date, desired_estimation_date, project_name, zac_project_number, \
    sales_person, estimation_person, status, estimation, completion_date, \
    remarks, estimation_materials, box_url, others, created_at, updated_at";

const ENTITY: &str = "EstimationRequest";

/// Provides CRUD operations for estimation requests.
pub struct EstimationRequestRepo;

impl EstimationRequestRepo {
    /// Insert a new request, returning the created row.
    ///
    /// If `status` is `None` in the input, the catalog's default label is
    /// stored. `created_at` and `updated_at` start out equal.
    pub async fn create(
        pool: &DbPool,
        catalog: &StatusCatalog,
        input: &CreateEstimationRequest,
    ) -> Result<EstimationRequest, DbError> {
        input.validate()?;

        let status = input
            .status
            .as_deref()
            .unwrap_or_else(|| catalog.default_status());
        let now = Utc::now();

        let query = format!(
            "INSERT INTO estimation_requests \
                (request_date, desired_estimation_date, project_name, zac_project_number, \
                 sales_person, estimation_person, status, estimation, completion_date, \
                 remarks, estimation_materials, box_url, others, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );

        let mut session = pool.begin().await?;
        let created = on_session!(&mut session, |conn| {
            sqlx::query_as::<_, EstimationRequest>(&query)
                .bind(input.request_date)
                .bind(input.desired_estimation_date)
                .bind(&input.project_name)
                .bind(&input.zac_project_number)
                .bind(&input.sales_person)
                .bind(&input.estimation_person)
                .bind(status)
                .bind(&input.estimation)
                .bind(input.completion_date)
                .bind(&input.remarks)
                .bind(&input.estimation_materials)
                .bind(&input.box_url)
                .bind(&input.others)
                .bind(now)
                .bind(now)
                .fetch_one(conn)
                .await?
        });
        session.commit().await?;

        Ok(created)
    }

    /// List requests in insertion order, skipping `offset` and returning at
    /// most `limit` rows.
    ///
    /// A non-positive `limit` returns an empty list without querying.
    pub async fn list(
        pool: &DbPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<EstimationRequest>, DbError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {COLUMNS} FROM estimation_requests ORDER BY id ASC LIMIT $1 OFFSET $2"
        );

        let mut session = pool.begin().await?;
        let rows = on_session!(&mut session, |conn| {
            sqlx::query_as::<_, EstimationRequest>(&query)
                .bind(limit)
                .bind(offset.max(0))
                .fetch_all(conn)
                .await?
        });
        session.commit().await?;

        Ok(rows)
    }

    /// Find a request by ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<EstimationRequest, DbError> {
        let query = format!("SELECT {COLUMNS} FROM estimation_requests WHERE id = $1");

        let mut session = pool.begin().await?;
        let found = on_session!(&mut session, |conn| {
            sqlx::query_as::<_, EstimationRequest>(&query)
                .bind(id)
                .fetch_optional(conn)
                .await?
        });
        session.commit().await?;

        found.ok_or(DbError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }

    /// Apply a partial update and return the stored result.
    ///
    /// Locks the row, reads it, overwrites only the fields present in `patch`
    /// and writes it back in the same transaction. Concurrent updates of one
    /// row run one after another, last write wins, and none of them sees a
    /// stale copy. `updated_at` never moves backwards, even if the wall clock
    /// does.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: &UpdateEstimationRequest,
    ) -> Result<EstimationRequest, DbError> {
        patch.validate()?;

        let select = format!("SELECT {COLUMNS} FROM estimation_requests WHERE id = $1");
        let update = format!(
            "UPDATE estimation_requests SET \
                request_date = $2, desired_estimation_date = $3, project_name = $4, \
                zac_project_number = $5, sales_person = $6, estimation_person = $7, \
                status = $8, estimation = $9, completion_date = $10, remarks = $11, \
                estimation_materials = $12, box_url = $13, others = $14, updated_at = $15 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );

        let mut session = pool.begin().await?;

        // The first statement must be a write: it takes the row lock on
        // PostgreSQL and the database write lock on SQLite, so concurrent
        // updates queue up instead of reading stale rows or failing to upgrade
        // a read lock.
        let claimed = on_session!(&mut session, |conn| {
            sqlx::query("UPDATE estimation_requests SET updated_at = updated_at WHERE id = $1")
                .bind(id)
                .execute(conn)
                .await?
                .rows_affected()
        });
        if claimed == 0 {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }

        let mut next = on_session!(&mut session, |conn| {
            sqlx::query_as::<_, EstimationRequest>(&select)
                .bind(id)
                .fetch_optional(conn)
                .await?
        })
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

        let previous_updated_at = next.updated_at;
        patch.apply_to(&mut next);
        next.updated_at = Utc::now().max(previous_updated_at);

        let updated = on_session!(&mut session, |conn| {
            sqlx::query_as::<_, EstimationRequest>(&update)
                .bind(id)
                .bind(next.request_date)
                .bind(next.desired_estimation_date)
                .bind(&next.project_name)
                .bind(&next.zac_project_number)
                .bind(&next.sales_person)
                .bind(&next.estimation_person)
                .bind(&next.status)
                .bind(&next.estimation)
                .bind(next.completion_date)
                .bind(&next.remarks)
                .bind(&next.estimation_materials)
                .bind(&next.box_url)
                .bind(&next.others)
                .bind(next.updated_at)
                .fetch_one(conn)
                .await?
        });
        session.commit().await?;

        Ok(updated)
    }

    /// Permanently delete a request by ID.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<(), DbError> {
        let mut session = pool.begin().await?;
        let rows_affected = on_session!(&mut session, |conn| {
            sqlx::query("DELETE FROM estimation_requests WHERE id = $1")
                .bind(id)
                .execute(conn)
                .await?
                .rows_affected()
        });

        if rows_affected == 0 {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }
        session.commit().await?;

        Ok(())
    }
}
