//! Runs generated statements against a live PostgreSQL server.
//!
//! Skipped unless `DATAGEN_TEST_POSTGRESQL` holds a connection string, e.g.
//! `host=postgresql user=postgres password=postgres dbname=testdb`.

use datagen_core::{EntityKind, OperationKind};
use datagen_parallel::{GenerationJob, ParallelCoordinator};
use sql_datagen::{run_job, PostgreSQLExecutor, RunOptions, StatementExecutor};

#[tokio::test]
async fn test_postgresql_insert_users() -> anyhow::Result<()> {
    let Ok(conn) = std::env::var("DATAGEN_TEST_POSTGRESQL") else {
        eprintln!("DATAGEN_TEST_POSTGRESQL not set, skipping");
        return Ok(());
    };

    let table = "e2e_users";
    let mut executor = PostgreSQLExecutor::connect(&conn).await?;
    executor
        .execute_ddl(&format!("DROP TABLE IF EXISTS \"{table}\""))
        .await?;

    let options = RunOptions {
        job: GenerationJob::new(EntityKind::User, 120, OperationKind::Insert, 4).with_table(table),
        batch_size: 50,
        rate: None,
        create_table: true,
    };
    let report = run_job(&mut executor, &ParallelCoordinator::new(), &options).await?;

    assert_eq!(report.metrics.executed, 120);
    assert_eq!(report.metrics.failed, 0, "errors: {:?}", report.metrics.errors);
    assert_eq!(report.metrics.affected_rows, 120);
    Ok(())
}
