//! Repository for the `universities` table.

use nucap_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::university::{CreateUniversity, University, UpdateUniversity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, short_name, location, website, test_required, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for universities over plain SQL.
pub struct UniversityRepo;

impl UniversityRepo {
    /// Run `SELECT 1 AS test` and return the literal.
    pub async fn select_literal(pool: &PgPool) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as("SELECT 1 AS test").fetch_one(pool).await?;
        Ok(row.0)
    }

    /// Count every row in the table.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) AS count FROM universities")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Find a university by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<University>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM universities WHERE id = $1");
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every row matching `id`. Used to assert that an identifier
    /// resolves to exactly one row.
    pub async fn fetch_all_by_id(pool: &PgPool, id: DbId) -> Result<Vec<University>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM universities WHERE id = $1");
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new university, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUniversity) -> Result<University, DbError> {
        input.check()?;
        let query = format!(
            "INSERT INTO universities (name, short_name, location, website, test_required, is_active)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, University>(&query)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(&input.location)
            .bind(&input.website)
            .bind(input.test_required.as_str())
            .bind(input.is_active)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Update a university. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUniversity,
    ) -> Result<Option<University>, sqlx::Error> {
        let query = format!(
            "UPDATE universities SET
                name = COALESCE($2, name),
                short_name = COALESCE($3, short_name),
                location = COALESCE($4, location),
                website = COALESCE($5, website),
                test_required = COALESCE($6, test_required),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(&input.location)
            .bind(&input.website)
            .bind(input.test_required.map(|t| t.as_str()))
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a university by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM universities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
