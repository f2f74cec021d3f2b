use nucap_core::error::CoreError;

/// Errors raised by either database client.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("diesel: {0}")]
    Diesel(#[from] diesel::result::Error),

    #[error("connection pool: {0}")]
    Pool(String),

    #[error("database task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
