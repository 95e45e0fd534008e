//! Statement executors.
//!
//! An executor takes rendered statement text and runs it against a store,
//! reporting an [`ExecutionOutcome`] per statement. A failing statement never
//! aborts the caller; only connection setup and DDL return errors.

pub mod file;
pub mod mysql;
pub mod postgresql;

pub use file::FileExecutor;
pub use mysql::MySQLExecutor;
pub use postgresql::PostgreSQLExecutor;

use async_trait::async_trait;
use datagen_core::{SqlDialect, TableDefinition};
use datagen_parallel::ExecutionOutcome;
use thiserror::Error;

/// Errors raised while connecting to or preparing a store.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// File sink error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid connection settings.
    #[error("Connection error: {0}")]
    Connection(String),
}

/// A store that accepts literal SQL statements.
#[async_trait]
pub trait StatementExecutor: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Dialect used for DDL.
    fn dialect(&self) -> SqlDialect;

    /// Run one statement.
    async fn execute(&mut self, statement: &str) -> ExecutionOutcome;

    /// Run a DDL statement.
    async fn execute_ddl(&mut self, sql: &str) -> Result<(), ExecutorError>;

    /// Release connections and flush buffers.
    async fn close(&mut self) -> Result<(), ExecutorError> {
        Ok(())
    }

    /// Create `definition`'s table if it does not exist yet.
    async fn create_table(&mut self, definition: &TableDefinition) -> Result<(), ExecutorError> {
        let sql = definition.create_table_sql(self.dialect());
        tracing::info!("Creating table: {}", definition.name);
        tracing::debug!("DDL: {}", sql);
        self.execute_ddl(&sql).await
    }
}
