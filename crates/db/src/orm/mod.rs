//! Diesel-backed ORM access to the same database the sqlx handle talks to.
//!
//! Diesel connections are blocking, so every operation checks a connection
//! out of an r2d2 pool inside `tokio::task::spawn_blocking`.

use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};

use crate::error::DbError;

pub mod schema;
pub mod university_store;

pub use university_store::DieselUniversityStore;

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Build an r2d2 pool for `database_url`.
///
/// Blocks until one idle connection is established, so this must run off the
/// async executor.
pub fn build_pool(database_url: &str, connection_timeout: Duration) -> Result<Pool, DbError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(2)
        .min_idle(Some(1))
        .connection_timeout(connection_timeout)
        .build(manager)
        .map_err(|e| DbError::Pool(e.to_string()))
}

/// Build a pool on the blocking thread pool.
pub async fn connect(database_url: &str, connection_timeout: Duration) -> Result<Pool, DbError> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || build_pool(&url, connection_timeout))
        .await
        .map_err(|e| DbError::Task(e.to_string()))?
}

/// Run `operation` with a pooled connection on the blocking thread pool.
pub(crate) async fn with_connection<T, F>(pool: Pool, operation: F) -> Result<T, DbError>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> Result<T, DbError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|e| DbError::Pool(e.to_string()))?;
        operation(&mut conn)
    })
    .await
    .map_err(|e| DbError::Task(e.to_string()))?
}
