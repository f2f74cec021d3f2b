//! The verification sequence.
//!
//! Steps run strictly in order and the first failure aborts the rest. Once
//! the fixture row exists, a failing run still tries to delete it, and the
//! ORM client is released on every path after it was constructed.

use std::io::Write;

use nucap_core::types::DbId;
use nucap_core::university::{FixtureNames, FIXTURE_UPDATED_LOCATION};
use nucap_db::clients::{OrmClient, SqlClient};
use nucap_db::models::university::CreateUniversity;
use nucap_db::DbError;
use serde_json::json;

use crate::config::VerifyConfig;
use crate::connector::Connector;
use crate::error::VerifyError;
use crate::report::Reporter;
use crate::step::Step;

/// Facts observed by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Identifier the insert step received (the row is gone by now).
    pub university_id: DbId,
    /// Row count before the insert, agreed on by both clients.
    pub count_before: i64,
    /// Row count after cleanup.
    pub count_after: i64,
}

fn failed(step: Step) -> impl FnOnce(DbError) -> VerifyError {
    move |source| VerifyError::Step { step, source }
}

fn expect(step: Step, ok: bool, message: impl FnOnce() -> String) -> Result<(), VerifyError> {
    if ok {
        Ok(())
    } else {
        Err(VerifyError::Check {
            step,
            message: message(),
        })
    }
}

fn pass<W: Write>(reporter: &mut Reporter<W>, step: Step, detail: impl std::fmt::Display) {
    tracing::debug!(step = step.number(), label = step.label(), "Step passed");
    reporter.ok(detail);
}

/// Run every step against the database named in `config`.
pub async fn run<W: Write>(
    config: &VerifyConfig,
    connector: &dyn Connector,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary, VerifyError> {
    if config.run_migrations {
        connector
            .migrate(&config.database_url)
            .await
            .map_err(VerifyError::Migrate)?;
        tracing::info!("Database migrations applied");
    }

    let step = Step::SqlConnect;
    reporter.start(step);
    let sql = connector
        .sql_client(&config.database_url, config.connect_timeout)
        .map_err(failed(step))?;
    pass(reporter, step, "SQL client created successfully");

    let result = run_with_sql(config, connector, sql.as_ref(), reporter).await;
    sql.close().await;
    result
}

async fn run_with_sql<W: Write>(
    config: &VerifyConfig,
    connector: &dyn Connector,
    sql: &dyn SqlClient,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary, VerifyError> {
    let step = Step::SqlLiteral;
    reporter.start(step);
    let literal = sql.select_literal().await.map_err(failed(step))?;
    expect(step, literal == 1, || format!("expected 1, got {literal}"))?;
    pass(
        reporter,
        step,
        format_args!("SQL query executed successfully: {}", json!([{ "test": literal }])),
    );

    let step = Step::SqlCount;
    reporter.start(step);
    let count_before = sql.count_universities().await.map_err(failed(step))?;
    pass(
        reporter,
        step,
        format_args!("SQL data retrieved successfully. Universities count: {count_before}"),
    );

    let step = Step::OrmConnect;
    reporter.start(step);
    let orm = connector
        .orm_client(&config.database_url, config.connect_timeout)
        .await
        .map_err(failed(step))?;
    pass(reporter, step, "ORM client created successfully");

    let mut fixture_id = None;
    let result = run_with_orm(sql, orm.as_ref(), count_before, &mut fixture_id, reporter).await;

    if result.is_err() {
        if let Some(id) = fixture_id {
            cleanup_after_failure(orm.as_ref(), id, reporter).await;
        }
    }
    if let Err(e) = orm.disconnect().await {
        tracing::warn!(error = %e, "Failed to release ORM connections");
    }

    result
}

async fn run_with_orm<W: Write>(
    sql: &dyn SqlClient,
    orm: &dyn OrmClient,
    count_before: i64,
    fixture_id: &mut Option<DbId>,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary, VerifyError> {
    let step = Step::OrmLiteral;
    reporter.start(step);
    let literal = orm.select_literal().await.map_err(failed(step))?;
    expect(step, literal == 1, || format!("expected 1, got {literal}"))?;
    pass(
        reporter,
        step,
        format_args!("ORM query executed successfully: {}", json!([{ "test": literal }])),
    );

    let step = Step::OrmCount;
    reporter.start(step);
    let orm_count = orm.count_universities().await.map_err(failed(step))?;
    expect(step, orm_count == count_before, || {
        format!("ORM counted {orm_count} universities, SQL client counted {count_before}")
    })?;
    pass(
        reporter,
        step,
        format_args!("ORM data retrieved successfully. Universities count: {orm_count}"),
    );

    let step = Step::OrmInsert;
    reporter.start(step);
    let input = CreateUniversity::fixture(FixtureNames::now());
    let created = orm.create_university(&input).await.map_err(failed(step))?;
    *fixture_id = Some(created.id);
    expect(step, created.id > 0, || {
        format!("insert returned non-positive id {}", created.id)
    })?;
    tracing::info!(id = created.id, short_name = %created.short_name, "Fixture inserted");
    pass(
        reporter,
        step,
        format_args!(
            "Successfully inserted test university: {}",
            created.short_name
        ),
    );

    let step = Step::CrossClientRead;
    reporter.start(step);
    let rows = sql.find_university(created.id).await.map_err(failed(step))?;
    expect(step, rows.len() == 1, || {
        format!("id {} resolved to {} rows", created.id, rows.len())
    })?;
    let row = &rows[0];
    expect(
        step,
        row.name == input.name && row.short_name == input.short_name,
        || format!("read back {:?}/{:?}", row.name, row.short_name),
    )?;
    pass(
        reporter,
        step,
        format_args!(
            "SQL client retrieved new record: {}",
            json!({ "name": row.name, "short_name": row.short_name })
        ),
    );

    let step = Step::OrmUpdate;
    reporter.start(step);
    let updated = orm
        .update_location(created.id, FIXTURE_UPDATED_LOCATION)
        .await
        .map_err(failed(step))?
        .ok_or_else(|| VerifyError::Check {
            step,
            message: format!("row {} disappeared before update", created.id),
        })?;
    expect(step, updated.location == FIXTURE_UPDATED_LOCATION, || {
        format!("update returned location {:?}", updated.location)
    })?;
    let rows = sql.find_university(created.id).await.map_err(failed(step))?;
    let seen = rows.first().map(|r| r.location.as_str());
    expect(step, seen == Some(FIXTURE_UPDATED_LOCATION), || {
        format!("SQL client sees location {seen:?} after update")
    })?;
    pass(
        reporter,
        step,
        format_args!("Successfully updated university: {}", updated.location),
    );

    let step = Step::Cleanup;
    reporter.start(step);
    let removed = orm
        .delete_university(created.id)
        .await
        .map_err(failed(step))?;
    expect(step, removed, || format!("no row with id {} to delete", created.id))?;
    *fixture_id = None;
    let count_after = sql.count_universities().await.map_err(failed(step))?;
    expect(step, count_after == count_before, || {
        format!("count is {count_after} after cleanup, was {count_before} before insert")
    })?;
    pass(reporter, step, "Test data cleaned up successfully");

    Ok(RunSummary {
        university_id: created.id,
        count_before,
        count_after,
    })
}

async fn cleanup_after_failure<W: Write>(
    orm: &dyn OrmClient,
    id: DbId,
    reporter: &mut Reporter<W>,
) {
    match orm.delete_university(id).await {
        Ok(true) => {
            tracing::info!(id, "Removed fixture after failed run");
            reporter.warn(format_args!("Removed test university {id} after failure"));
        }
        Ok(false) => {
            tracing::warn!(id, "Fixture already gone during failure cleanup");
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "Failed to remove fixture after failed run");
            reporter.warn(format_args!(
                "Could not remove test university {id}: {e}"
            ));
        }
    }
}
