//! sql-datagen library
//!
//! Generates synthetic users, products and orders as literal SQL statements
//! and optionally runs them against a database.
//!
//! # Crates
//!
//! - `datagen_core` - Records, statements, table layouts and errors
//! - `datagen_generator` - Seeded record generation and statement rendering
//! - `datagen_parallel` - Multi-threaded generation, pacing and reporting
//!
//! This crate adds the pieces the command-line tool needs on top of them:
//! job files, statement executors for PostgreSQL, MySQL and plain files, and
//! the generate-and-execute loop.
//!
//! # CLI Usage
//!
//! ```bash
//! # Print 1000 INSERT statements for users across 4 workers
//! sql-datagen generate --kind user --count 1000 --workers 4
//!
//! # Run a random mix of order statements against PostgreSQL at 200/sec
//! sql-datagen run postgresql --kind order --count 5000 --operation random-mix \
//!   --rate 200 --create-table \
//!   --connection-string "host=localhost user=postgres password=postgres dbname=testdb"
//! ```

pub mod config;
pub mod executor;
pub mod logging;
pub mod run;

pub use config::{ExecutionSettings, JobArgs, JobConfig};
pub use executor::{
    ExecutorError, FileExecutor, MySQLExecutor, PostgreSQLExecutor, StatementExecutor,
};
pub use logging::mask_connection_password;
pub use run::{batch_job, run_job, RunOptions, RunReport};
