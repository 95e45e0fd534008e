//! PostgreSQL executor.

use super::{ExecutorError, StatementExecutor};
use async_trait::async_trait;
use datagen_core::SqlDialect;
use datagen_parallel::ExecutionOutcome;
use std::time::Instant;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

pub struct PostgreSQLExecutor {
    client: Client,
}

impl PostgreSQLExecutor {
    /// Connect using a libpq-style connection string, e.g.
    /// `host=localhost user=postgres password=postgres dbname=testdb`.
    pub async fn connect(connection_string: &str) -> Result<Self, ExecutorError> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("PostgreSQL connection error: {}", e);
            }
        });

        client.simple_query("SELECT 1").await?;
        debug!("PostgreSQL connection established");

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatementExecutor for PostgreSQLExecutor {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn dialect(&self) -> SqlDialect {
        SqlDialect::PostgreSql
    }

    async fn execute(&mut self, statement: &str) -> ExecutionOutcome {
        let start = Instant::now();
        match self.client.execute(statement, &[]).await {
            Ok(rows) => ExecutionOutcome::succeeded(rows, start.elapsed()),
            Err(e) => ExecutionOutcome::failed(e.to_string(), start.elapsed()),
        }
    }

    async fn execute_ddl(&mut self, sql: &str) -> Result<(), ExecutorError> {
        self.client.batch_execute(sql).await?;
        Ok(())
    }
}
