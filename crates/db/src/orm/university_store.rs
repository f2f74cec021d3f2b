use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use nucap_core::types::{DbId, Timestamp};
use nucap_core::university::TestRequirement;

use super::schema::universities;
use super::{with_connection, Pool};
use crate::error::DbError;
use crate::models::university::{CreateUniversity, University};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = universities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct DbUniversity {
    id: i64,
    name: String,
    short_name: String,
    location: String,
    website: Option<String>,
    test_required: String,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TryFrom<DbUniversity> for University {
    type Error = DbError;

    fn try_from(value: DbUniversity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            name: value.name,
            short_name: value.short_name,
            location: value.location,
            website: value.website,
            test_required: TestRequirement::from_str_db(&value.test_required)?,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = universities)]
struct NewUniversity<'a> {
    name: &'a str,
    short_name: &'a str,
    location: &'a str,
    website: Option<&'a str>,
    test_required: &'a str,
    is_active: bool,
}

#[derive(QueryableByName)]
struct LiteralRow {
    #[diesel(sql_type = Integer)]
    test: i32,
}

/// Typed CRUD over `universities` through diesel.
#[derive(Clone)]
pub struct DieselUniversityStore {
    pool: Pool,
}

impl DieselUniversityStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub async fn select_literal(&self) -> Result<i32, DbError> {
        with_connection(self.pool.clone(), |conn| {
            let row = diesel::sql_query("SELECT 1 AS test").get_result::<LiteralRow>(conn)?;
            Ok(row.test)
        })
        .await
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        with_connection(self.pool.clone(), |conn| {
            Ok(universities::table.count().get_result::<i64>(conn)?)
        })
        .await
    }

    pub async fn create(&self, input: &CreateUniversity) -> Result<University, DbError> {
        input.check()?;
        let input = input.clone();
        with_connection(self.pool.clone(), move |conn| {
            let row = NewUniversity {
                name: &input.name,
                short_name: &input.short_name,
                location: &input.location,
                website: input.website.as_deref(),
                test_required: input.test_required.as_str(),
                is_active: input.is_active,
            };

            diesel::insert_into(universities::table)
                .values(&row)
                .returning(DbUniversity::as_returning())
                .get_result::<DbUniversity>(conn)?
                .try_into()
        })
        .await
    }

    /// Set `location` on one row. Returns `None` if no row has `university_id`.
    pub async fn update_location(
        &self,
        university_id: DbId,
        new_location: &str,
    ) -> Result<Option<University>, DbError> {
        let new_location = new_location.to_string();
        with_connection(self.pool.clone(), move |conn| {
            diesel::update(universities::table.find(university_id))
                .set((
                    universities::location.eq(&new_location),
                    universities::updated_at.eq(Utc::now()),
                ))
                .returning(DbUniversity::as_returning())
                .get_result::<DbUniversity>(conn)
                .optional()?
                .map(University::try_from)
                .transpose()
        })
        .await
    }

    /// Delete one row by id. Returns `true` if a row was removed.
    pub async fn delete(&self, university_id: DbId) -> Result<bool, DbError> {
        with_connection(self.pool.clone(), move |conn| {
            let removed = diesel::delete(universities::table.find(university_id)).execute(conn)?;
            Ok(removed > 0)
        })
        .await
    }
}
