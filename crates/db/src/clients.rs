//! The two client handles a verification run drives.
//!
//! [`SqlClient`] sends raw statements over sqlx; [`OrmClient`] goes through
//! diesel's typed query builder. Both traits are object-safe so callers can
//! swap in fakes.

use std::time::Duration;

use async_trait::async_trait;
use nucap_core::types::DbId;
use tokio::sync::Mutex;

use crate::error::DbError;
use crate::models::university::{CreateUniversity, University};
use crate::orm::{self, DieselUniversityStore};
use crate::repositories::UniversityRepo;
use crate::DbPool;

#[async_trait]
pub trait SqlClient: Send + Sync {
    /// `SELECT 1 AS test`.
    async fn select_literal(&self) -> Result<i32, DbError>;

    async fn count_universities(&self) -> Result<i64, DbError>;

    /// Every row whose id equals `id` (zero or one in a healthy table).
    async fn find_university(&self, id: DbId) -> Result<Vec<University>, DbError>;

    async fn close(&self);
}

#[async_trait]
pub trait OrmClient: Send + Sync {
    /// `SELECT 1 AS test` as a raw query through the ORM.
    async fn select_literal(&self) -> Result<i32, DbError>;

    async fn count_universities(&self) -> Result<i64, DbError>;

    async fn create_university(&self, input: &CreateUniversity) -> Result<University, DbError>;

    async fn update_location(
        &self,
        id: DbId,
        location: &str,
    ) -> Result<Option<University>, DbError>;

    async fn delete_university(&self, id: DbId) -> Result<bool, DbError>;

    /// Release pooled connections. Later calls fail with [`DbError::Pool`].
    async fn disconnect(&self) -> Result<(), DbError>;
}

// ---------------------------------------------------------------------------
// sqlx
// ---------------------------------------------------------------------------

/// Lightweight handle: one lazily-opened sqlx connection.
pub struct PgSqlClient {
    pool: DbPool,
}

impl PgSqlClient {
    /// Parse `database_url` and build the handle without touching the network.
    pub fn new(database_url: &str, acquire_timeout: Duration) -> Result<Self, DbError> {
        let pool = crate::create_lazy_pool(database_url, acquire_timeout)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SqlClient for PgSqlClient {
    async fn select_literal(&self) -> Result<i32, DbError> {
        Ok(UniversityRepo::select_literal(&self.pool).await?)
    }

    async fn count_universities(&self) -> Result<i64, DbError> {
        Ok(UniversityRepo::count(&self.pool).await?)
    }

    async fn find_university(&self, id: DbId) -> Result<Vec<University>, DbError> {
        Ok(UniversityRepo::fetch_all_by_id(&self.pool, id).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

// ---------------------------------------------------------------------------
// diesel
// ---------------------------------------------------------------------------

/// ORM client over a diesel r2d2 pool. The pool is dropped on
/// [`OrmClient::disconnect`].
pub struct DieselOrmClient {
    store: Mutex<Option<DieselUniversityStore>>,
}

impl DieselOrmClient {
    /// Open the pool, establishing one connection before returning.
    pub async fn connect(database_url: &str, connection_timeout: Duration) -> Result<Self, DbError> {
        let pool = orm::connect(database_url, connection_timeout).await?;
        Ok(Self {
            store: Mutex::new(Some(DieselUniversityStore::new(pool))),
        })
    }

    async fn store(&self) -> Result<DieselUniversityStore, DbError> {
        self.store
            .lock()
            .await
            .clone()
            .ok_or_else(|| DbError::Pool("ORM client is disconnected".to_string()))
    }
}

#[async_trait]
impl OrmClient for DieselOrmClient {
    async fn select_literal(&self) -> Result<i32, DbError> {
        self.store().await?.select_literal().await
    }

    async fn count_universities(&self) -> Result<i64, DbError> {
        self.store().await?.count().await
    }

    async fn create_university(&self, input: &CreateUniversity) -> Result<University, DbError> {
        self.store().await?.create(input).await
    }

    async fn update_location(
        &self,
        id: DbId,
        location: &str,
    ) -> Result<Option<University>, DbError> {
        self.store().await?.update_location(id, location).await
    }

    async fn delete_university(&self, id: DbId) -> Result<bool, DbError> {
        self.store().await?.delete(id).await
    }

    async fn disconnect(&self) -> Result<(), DbError> {
        let Some(store) = self.store.lock().await.take() else {
            return Ok(());
        };
        // Dropping the last pool handle closes its connections; that is
        // blocking socket I/O.
        tokio::task::spawn_blocking(move || drop(store))
            .await
            .map_err(|e| DbError::Task(e.to_string()))?;
        tracing::debug!("ORM connection pool released");
        Ok(())
    }
}
