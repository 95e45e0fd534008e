//! Job configuration.
//!
//! Options come from two places: command-line flags ([`JobArgs`]) and an
//! optional YAML job file ([`JobConfig`]). Flags win; the file fills in
//! whatever was not given on the command line; built-in defaults cover the
//! rest.
//!
//! ```yaml
//! kind: order
//! count: 5000
//! operation: random-mix
//! workers: 4
//! seed: 42
//! batch_size: 500
//! rate: 250
//! ```

use anyhow::{Context, Result};
use clap::Args;
use datagen_core::{EntityKind, OperationKind, SqlDialect};
use datagen_parallel::{GenerationJob, SeedPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Records generated when no count is given.
pub const DEFAULT_COUNT: u64 = 1000;

/// Statements generated and executed per batch when no batch size is given.
pub const DEFAULT_BATCH_SIZE: u64 = 100;

/// YAML job file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub kind: Option<EntityKind>,
    pub count: Option<u64>,
    pub operation: Option<OperationKind>,
    pub workers: Option<usize>,
    pub seed: Option<u64>,
    pub table: Option<String>,
    pub batch_size: Option<u64>,
    /// Target statements per second
    pub rate: Option<f64>,
    pub connection_string: Option<String>,
    pub dialect: Option<SqlDialect>,
}

impl JobConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {path:?}"))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse job file: {path:?}"))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the file at `path`, or an empty config when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Generation options shared by every subcommand that generates statements.
#[derive(Args, Clone, Debug, Default)]
pub struct JobArgs {
    /// YAML job file supplying defaults for options not given here
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Entity kind to generate (user, product, order)
    #[arg(long)]
    pub kind: Option<EntityKind>,

    /// Total number of statements to generate [default: 1000]
    #[arg(long)]
    pub count: Option<u64>,

    /// Operation: insert, update, delete or random-mix [default: insert]
    #[arg(long)]
    pub operation: Option<OperationKind>,

    /// Worker threads [default: number of logical CPUs]
    #[arg(long)]
    pub workers: Option<usize>,

    /// Top-level seed; makes the run reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target table instead of the kind's default
    #[arg(long)]
    pub table: Option<String>,
}

impl JobArgs {
    pub fn load_config(&self) -> Result<JobConfig> {
        JobConfig::load(self.config.as_deref())
    }

    /// Merge flags over `file` and apply defaults.
    pub fn resolve(&self, file: &JobConfig) -> Result<GenerationJob> {
        let kind = self
            .kind
            .or(file.kind)
            .context("No entity kind given: pass --kind or set `kind` in the job file")?;
        let count = self.count.or(file.count).unwrap_or(DEFAULT_COUNT);
        let operation = self
            .operation
            .or(file.operation)
            .unwrap_or(OperationKind::Insert);
        let workers = self
            .workers
            .or(file.workers)
            .unwrap_or_else(num_cpus::get);
        if workers == 0 {
            anyhow::bail!("Worker count must be at least 1");
        }

        let mut job = GenerationJob::new(kind, count, operation, workers)
            .with_seed(SeedPolicy::from(self.seed.or(file.seed)));
        if let Some(table) = self.table.clone().or_else(|| file.table.clone()) {
            job = job.with_table(table);
        }
        Ok(job)
    }
}

/// Execution options for the `run` subcommand, after merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSettings {
    pub batch_size: u64,
    pub rate: Option<f64>,
    pub connection_string: Option<String>,
    pub dialect: Option<SqlDialect>,
}

impl ExecutionSettings {
    pub fn resolve(
        batch_size: Option<u64>,
        rate: Option<f64>,
        connection_string: Option<String>,
        dialect: Option<SqlDialect>,
        file: &JobConfig,
    ) -> Result<Self> {
        let batch_size = batch_size
            .or(file.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            anyhow::bail!("Batch size must be at least 1");
        }

        Ok(Self {
            batch_size,
            rate: rate.or(file.rate).filter(|r| *r > 0.0),
            connection_string: connection_string.or_else(|| file.connection_string.clone()),
            dialect: dialect.or(file.dialect),
        })
    }
}
