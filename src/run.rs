//! Generate-and-execute loop.
//!
//! Generates a job in batches with the [`ParallelCoordinator`], hands every
//! statement to a [`StatementExecutor`], paces itself to an optional target
//! rate and logs progress after each batch.

use crate::executor::StatementExecutor;
use anyhow::{Context, Result};
use datagen_core::TableDefinition;
use datagen_parallel::{ExecutionMetrics, GenerationJob, Pacer, ParallelCoordinator, SeedPolicy};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How a job is executed.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub job: GenerationJob,
    pub batch_size: u64,
    /// Target statements per second; `None` runs unpaced
    pub rate: Option<f64>,
    /// Create the target table before the first batch
    pub create_table: bool,
}

/// Totals for a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub metrics: ExecutionMetrics,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn statements_per_second(&self) -> f64 {
        self.metrics.statements_per_second(self.elapsed)
    }
}

/// Job for batch number `index`: same shape, `count` statements, and a seed
/// that does not overlap any other batch's worker seeds.
pub fn batch_job(job: &GenerationJob, index: u64, count: u64) -> GenerationJob {
    let mut batch = job.clone();
    batch.total_count = count;
    if let SeedPolicy::Derived(seed) = job.seed {
        let stride = job.workers as u64;
        batch.seed = SeedPolicy::Derived(seed.wrapping_add(index.wrapping_mul(stride)));
    }
    batch
}

/// Run `options.job` against `executor`.
///
/// Statement failures are counted in the returned metrics and never stop the
/// run. Generation errors and table-creation errors do.
pub async fn run_job<E>(
    executor: &mut E,
    coordinator: &ParallelCoordinator,
    options: &RunOptions,
) -> Result<RunReport>
where
    E: StatementExecutor + ?Sized,
{
    if options.batch_size == 0 {
        anyhow::bail!("Batch size must be at least 1");
    }

    let job = &options.job;
    let started = Instant::now();
    let pacer = options.rate.map(Pacer::new).unwrap_or_else(Pacer::unlimited);
    let mut metrics = ExecutionMetrics::default();

    info!(
        "Running {} {} statements ({}) against {} (batch size: {}, rate: {})",
        job.total_count,
        job.kind,
        job.operation,
        executor.name(),
        options.batch_size,
        options
            .rate
            .map(|r| format!("{r}/s"))
            .unwrap_or_else(|| "unlimited".to_string())
    );

    let executed =
        execute_batches(executor, coordinator, options, &pacer, &mut metrics, started).await;
    let closed = executor
        .close()
        .await
        .with_context(|| format!("Failed to close {} executor", executor.name()));

    match (executed, closed) {
        (Err(e), Err(close_error)) => {
            warn!("{:#}", close_error);
            return Err(e);
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => return Err(e),
        (Ok(()), Ok(())) => {}
    }

    let report = RunReport {
        metrics,
        elapsed: started.elapsed(),
    };

    info!(
        "Finished: {} executed, {} succeeded, {} failed in {:?}",
        report.metrics.executed, report.metrics.succeeded, report.metrics.failed, report.elapsed
    );

    Ok(report)
}

/// Table creation and the batch loop. The caller closes the executor whether
/// or not this succeeds.
async fn execute_batches<E>(
    executor: &mut E,
    coordinator: &ParallelCoordinator,
    options: &RunOptions,
    pacer: &Pacer,
    metrics: &mut ExecutionMetrics,
    started: Instant,
) -> Result<()>
where
    E: StatementExecutor + ?Sized,
{
    let job = &options.job;

    if options.create_table {
        let definition = TableDefinition::for_kind(job.kind).renamed(job.table_name());
        executor
            .create_table(&definition)
            .await
            .with_context(|| format!("Failed to create table '{}'", definition.name))?;
    }

    let mut remaining = job.total_count;
    let mut batch_index = 0u64;

    while remaining > 0 {
        let count = remaining.min(options.batch_size);
        let batch = batch_job(job, batch_index, count);

        let worker = coordinator.clone();
        let result = tokio::task::spawn_blocking(move || worker.generate_parallel(&batch))
            .await
            .context("Generation task failed")??;
        metrics.record_generation(&result);

        for statement in &result.statements {
            pacer.pace(metrics.executed).await;
            let outcome = executor.execute(statement.as_str()).await;
            if let Some(error) = &outcome.error {
                warn!("Statement failed: {}", error);
            }
            metrics.record(&outcome);
        }

        remaining -= count;
        batch_index += 1;

        let elapsed = started.elapsed();
        info!(
            "Progress: {}/{} ({:.1}%) at {:.1} statements/sec, {} failed",
            metrics.executed,
            job.total_count,
            metrics.progress_percent(job.total_count),
            metrics.statements_per_second(elapsed),
            metrics.failed
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagen_core::{EntityKind, OperationKind};

    #[test]
    fn test_batch_job_derived_seeds_do_not_overlap() {
        let job = GenerationJob::new(EntityKind::User, 1000, OperationKind::Insert, 4)
            .with_seed(SeedPolicy::Derived(100));

        let first = batch_job(&job, 0, 250);
        let second = batch_job(&job, 1, 250);

        assert_eq!(first.total_count, 250);
        assert_eq!(first.seed, SeedPolicy::Derived(100));
        assert_eq!(second.seed, SeedPolicy::Derived(104));
        assert_eq!(second.kind, EntityKind::User);
    }

    #[test]
    fn test_batch_job_fresh_stays_fresh() {
        let job = GenerationJob::new(EntityKind::Order, 10, OperationKind::Delete, 2);
        assert_eq!(batch_job(&job, 3, 5).seed, SeedPolicy::Fresh);
    }
}
