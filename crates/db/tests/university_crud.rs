//! Live-database tests for both university clients.
//!
//! Each test returns early when `DATABASE_URL` is not set, so the suite is
//! a no-op on machines without a database.

use std::time::Duration;

use assert_matches::assert_matches;
use nucap_core::error::CoreError;
use nucap_core::university::{FixtureNames, TestRequirement, FIXTURE_UPDATED_LOCATION};
use nucap_db::clients::{DieselOrmClient, OrmClient, PgSqlClient, SqlClient};
use nucap_db::models::university::{CreateUniversity, UpdateUniversity};
use nucap_db::repositories::UniversityRepo;
use nucap_db::DbError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const TIMEOUT: Duration = Duration::from_secs(30);

fn database_url() -> Option<String> {
    dotenvy::dotenv().ok();
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("DATABASE_URL not set. Skipping live database test.");
            None
        }
    }
}

async fn migrated_pool(url: &str) -> PgPool {
    let pool = nucap_db::create_pool(url).await.expect("connect pg");
    nucap_db::run_migrations(&pool).await.expect("migrations");
    pool
}

/// Fixture with a suffix so concurrently running tests never share names.
fn fixture(suffix: &str) -> CreateUniversity {
    let base = FixtureNames::now();
    CreateUniversity::fixture(FixtureNames {
        name: format!("{} {suffix}", base.name),
        short_name: format!("{}{}", base.short_name, suffix.to_uppercase()),
    })
}

// ---------------------------------------------------------------------------
// sqlx repository
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repo_create_update_delete() {
    let Some(url) = database_url() else { return };
    let pool = migrated_pool(&url).await;
    nucap_db::health_check(&pool).await.unwrap();

    let before = UniversityRepo::count(&pool).await.unwrap();
    let created = UniversityRepo::create(&pool, &fixture("repo")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.test_required, TestRequirement::None);

    let update = UpdateUniversity {
        location: Some("Lahore".to_string()),
        test_required: Some(TestRequirement::Ecat),
        ..Default::default()
    };
    let updated = UniversityRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(updated.location, "Lahore");
    assert_eq!(updated.test_required, TestRequirement::Ecat);
    assert_eq!(updated.name, created.name);

    assert!(UniversityRepo::hard_delete(&pool, created.id).await.unwrap());
    assert!(!UniversityRepo::hard_delete(&pool, created.id).await.unwrap());
    assert!(UniversityRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
    assert_eq!(UniversityRepo::count(&pool).await.unwrap(), before);
}

#[tokio::test]
async fn repo_rejects_invalid_input_before_querying() {
    let Some(url) = database_url() else { return };
    let pool = migrated_pool(&url).await;

    let mut input = fixture("invalid");
    input.website = Some("nope".to_string());
    let err = UniversityRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[tokio::test]
async fn duplicate_short_name_violates_unique_constraint() {
    let Some(url) = database_url() else { return };
    let pool = migrated_pool(&url).await;

    let input = fixture("dup");
    let created = UniversityRepo::create(&pool, &input).await.unwrap();

    let mut clash = input.clone();
    clash.name = format!("{} other", input.name);
    let err = UniversityRepo::create(&pool, &clash).await.unwrap_err();
    assert_matches!(err, DbError::Sqlx(_));

    UniversityRepo::hard_delete(&pool, created.id).await.unwrap();
}

// ---------------------------------------------------------------------------
// Cross-client
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clients_agree_on_counts_and_rows() {
    let Some(url) = database_url() else { return };
    let _pool = migrated_pool(&url).await;

    let sql = PgSqlClient::new(&url, TIMEOUT).unwrap();
    let orm = DieselOrmClient::connect(&url, TIMEOUT).await.unwrap();

    assert_eq!(sql.select_literal().await.unwrap(), 1);
    assert_eq!(orm.select_literal().await.unwrap(), 1);

    let created = orm.create_university(&fixture("cross")).await.unwrap();
    let rows = sql.find_university(created.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].short_name, created.short_name);

    let updated = orm
        .update_location(created.id, FIXTURE_UPDATED_LOCATION)
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(updated.location, FIXTURE_UPDATED_LOCATION);
    assert!(updated.updated_at >= created.updated_at);
    let rows = sql.find_university(created.id).await.unwrap();
    assert_eq!(rows[0].location, FIXTURE_UPDATED_LOCATION);

    assert!(orm.delete_university(created.id).await.unwrap());
    assert!(sql.find_university(created.id).await.unwrap().is_empty());
    assert!(orm.update_location(created.id, "x").await.unwrap().is_none());

    orm.disconnect().await.unwrap();
    assert_matches!(orm.count_universities().await, Err(DbError::Pool(_)));
    // A second disconnect is a no-op.
    orm.disconnect().await.unwrap();
    sql.close().await;
}
