use std::time::Duration;

use async_trait::async_trait;
use nucap_db::clients::{DieselOrmClient, OrmClient, PgSqlClient, SqlClient};
use nucap_db::DbError;

/// Builds the two client handles a run needs.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Construct the lightweight handle. Must not open a connection.
    fn sql_client(
        &self,
        database_url: &str,
        timeout: Duration,
    ) -> Result<Box<dyn SqlClient>, DbError>;

    async fn orm_client(
        &self,
        database_url: &str,
        timeout: Duration,
    ) -> Result<Box<dyn OrmClient>, DbError>;

    /// Bring the schema up to date.
    async fn migrate(&self, database_url: &str) -> Result<(), DbError>;
}

/// Connects to a real PostgreSQL server.
pub struct LiveConnector;

#[async_trait]
impl Connector for LiveConnector {
    fn sql_client(
        &self,
        database_url: &str,
        timeout: Duration,
    ) -> Result<Box<dyn SqlClient>, DbError> {
        Ok(Box::new(PgSqlClient::new(database_url, timeout)?))
    }

    async fn orm_client(
        &self,
        database_url: &str,
        timeout: Duration,
    ) -> Result<Box<dyn OrmClient>, DbError> {
        Ok(Box::new(DieselOrmClient::connect(database_url, timeout).await?))
    }

    async fn migrate(&self, database_url: &str) -> Result<(), DbError> {
        let pool = nucap_db::create_pool(database_url).await?;
        nucap_db::health_check(&pool).await?;
        nucap_db::run_migrations(&pool).await?;
        pool.close().await;
        Ok(())
    }
}
