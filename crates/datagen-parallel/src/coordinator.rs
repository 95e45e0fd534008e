//! Parallel statement generation.
//!
//! The coordinator splits a job into per-worker chunks, runs one
//! [`BatchGenerator`] per chunk on its own OS thread, waits for all of them,
//! and merges their output into a single [`ParallelResult`].
//!
//! Workers share nothing: each owns its generator, its seeded stream and its
//! output vector from start to finish, so no locking is involved.

use crate::metrics::{ParallelResult, WorkerReport};
use crate::partitioner::{describe_plan, plan_workers, WorkerAssignment};
use chrono::NaiveDateTime;
use datagen_core::{EntityKind, GenerationError, OperationKind, Statement};
use datagen_generator::generators::timestamp::anchor_now;
use datagen_generator::{BatchGenerator, RecordGenerator};
use rand::Rng;
use std::any::Any;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Upper bound of the random base drawn for [`SeedPolicy::Fresh`].
const FRESH_SEED_MAX: u64 = 1_000_000;

/// How worker seeds are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Draw a fresh random base at dispatch time and offset it by worker
    /// index. Each chunk is reproducible from its reported seed, but a whole
    /// run is not.
    #[default]
    Fresh,
    /// Offset a caller-supplied seed by worker index, so the same seed,
    /// anchor and worker count reproduce the whole run.
    Derived(u64),
}

impl SeedPolicy {
    /// Resolve the seed of worker 0.
    pub fn base_seed(&self) -> u64 {
        match self {
            SeedPolicy::Fresh => rand::rng().random_range(1..=FRESH_SEED_MAX),
            SeedPolicy::Derived(seed) => *seed,
        }
    }
}

impl From<Option<u64>> for SeedPolicy {
    fn from(seed: Option<u64>) -> Self {
        seed.map(SeedPolicy::Derived).unwrap_or_default()
    }
}

/// Descriptor for one parallel generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    pub kind: EntityKind,
    pub total_count: u64,
    pub operation: OperationKind,
    pub workers: usize,
    pub seed: SeedPolicy,
    /// Target table; `None` uses the entity kind's default
    pub table: Option<String>,
}

impl GenerationJob {
    pub fn new(kind: EntityKind, total_count: u64, operation: OperationKind, workers: usize) -> Self {
        Self {
            kind,
            total_count,
            operation,
            workers,
            seed: SeedPolicy::Fresh,
            table: None,
        }
    }

    /// Build a job from string-keyed kind and operation names.
    pub fn from_names(
        kind: &str,
        total_count: u64,
        operation: &str,
        workers: usize,
    ) -> Result<Self, GenerationError> {
        Ok(Self::new(
            kind.parse()?,
            total_count,
            operation.parse()?,
            workers,
        ))
    }

    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Table statements are rendered against.
    pub fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or_else(|| self.kind.table_name())
    }

    fn validate(&self) -> Result<(), GenerationError> {
        if self.workers == 0 {
            return Err(GenerationError::InvalidJob(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Runs generation jobs across a fixed-size pool of worker threads.
#[derive(Debug, Clone, Default)]
pub struct ParallelCoordinator {
    anchor: Option<NaiveDateTime>,
}

struct WorkerOutput {
    report: WorkerReport,
    statements: Vec<Statement>,
}

impl ParallelCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the end of the timestamp window for every worker.
    ///
    /// Without an anchor, the current time is captured once per job and
    /// shared by all of its workers.
    pub fn with_anchor(mut self, anchor: NaiveDateTime) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Generate `job.total_count` statements across `job.workers` threads.
    ///
    /// Blocks until every launched worker has finished. If any worker fails
    /// to start or panics, the whole call fails and no statements are
    /// returned.
    pub fn generate_parallel(&self, job: &GenerationJob) -> Result<ParallelResult, GenerationError> {
        job.validate()?;

        let started = Instant::now();
        let anchor = self.anchor.unwrap_or_else(anchor_now);
        let plan = plan_workers(job.total_count, job.workers, job.seed.base_seed());

        info!(
            "Generating {} {} statements ({}) across {} of {} workers",
            job.total_count,
            job.kind,
            job.operation,
            plan.len(),
            job.workers
        );
        debug!("{}", describe_plan(&plan));

        let result = execute_plan(job, &plan, anchor, started, run_worker)?;

        info!(
            "Generated {} statements in {:.3}s ({:.1} records/sec)",
            result.total_count,
            result.duration.as_secs_f64(),
            result.throughput()
        );

        Ok(result)
    }
}

/// Run every assignment in `plan` on its own named thread and merge the
/// output. Any worker that fails to spawn or panics fails the whole plan.
fn execute_plan<F>(
    job: &GenerationJob,
    plan: &[WorkerAssignment],
    anchor: NaiveDateTime,
    started: Instant,
    worker: F,
) -> Result<ParallelResult, GenerationError>
where
    F: Fn(&GenerationJob, &WorkerAssignment, NaiveDateTime) -> WorkerOutput + Sync,
{
    let worker = &worker;
    let outputs: Vec<Result<WorkerOutput, GenerationError>> = thread::scope(|scope| {
        let handles: Vec<_> = plan
            .iter()
            .map(|assignment| {
                let handle = thread::Builder::new()
                    .name(format!("datagen-worker-{}", assignment.index))
                    .spawn_scoped(scope, move || worker(job, assignment, anchor));
                (assignment.index, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(index, handle)| match handle {
                Ok(handle) => handle.join().map_err(|panic| GenerationError::WorkerFailure {
                    worker: index,
                    reason: panic_message(panic.as_ref()),
                }),
                Err(e) => Err(GenerationError::WorkerFailure {
                    worker: index,
                    reason: format!("failed to spawn worker thread: {e}"),
                }),
            })
            .collect()
    });

    let mut statements = Vec::with_capacity(job.total_count as usize);
    let mut workers = Vec::with_capacity(outputs.len());
    let mut duration = Duration::ZERO;

    for output in outputs {
        let output = output?;
        duration = duration.max(output.report.duration);
        statements.extend(output.statements);
        workers.push(output.report);
    }

    let total_count: u64 = workers.iter().map(|w| w.count).sum();
    debug_assert_eq!(total_count, job.total_count);

    Ok(ParallelResult {
        kind: job.kind,
        operation: job.operation,
        statements,
        total_count,
        duration,
        elapsed: started.elapsed(),
        workers,
    })
}

fn run_worker(
    job: &GenerationJob,
    assignment: &WorkerAssignment,
    anchor: NaiveDateTime,
) -> WorkerOutput {
    let start = Instant::now();

    let generator = RecordGenerator::new(assignment.seed).with_anchor(anchor);
    let mut batch = BatchGenerator::from_generator(generator).with_table(job.table_name());
    let statements = batch.generate_batch(job.kind, assignment.count, job.operation);

    let duration = start.elapsed();
    debug!(
        "worker-{} generated {} statements in {:?}",
        assignment.index,
        statements.len(),
        duration
    );

    WorkerOutput {
        report: WorkerReport {
            index: assignment.index,
            seed: assignment.seed,
            count: statements.len() as u64,
            duration,
        },
        statements,
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("worker panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("worker panicked: {message}")
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn coordinator() -> ParallelCoordinator {
        let anchor = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        ParallelCoordinator::new().with_anchor(anchor)
    }

    #[test]
    fn test_generate_parallel_end_to_end() {
        let job = GenerationJob::new(EntityKind::User, 103, OperationKind::Insert, 4);
        let result = coordinator().generate_parallel(&job).unwrap();

        assert_eq!(result.total_count, 103);
        assert_eq!(result.statements.len(), 103);
        assert!(result.duration > Duration::ZERO);
        assert_eq!(result.throughput(), 103.0 / result.duration.as_secs_f64());

        let mut counts: Vec<u64> = result.workers.iter().map(|w| w.count).collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![25, 26, 26, 26]);

        let max_worker = result.workers.iter().map(|w| w.duration).max().unwrap();
        assert_eq!(result.duration, max_worker);
        assert!(result
            .statements
            .iter()
            .all(|s| s.as_str().starts_with("INSERT INTO users (")));
    }

    #[test]
    fn test_zero_total() {
        let job = GenerationJob::new(EntityKind::Order, 0, OperationKind::Delete, 4);
        let result = coordinator().generate_parallel(&job).unwrap();

        assert_eq!(result.total_count, 0);
        assert!(result.statements.is_empty());
        assert!(result.workers.is_empty());
        assert_eq!(result.duration, Duration::ZERO);
        assert_eq!(result.throughput(), 0.0);
    }

    #[test]
    fn test_more_workers_than_records() {
        let job = GenerationJob::new(EntityKind::Product, 3, OperationKind::Insert, 16);
        let result = coordinator().generate_parallel(&job).unwrap();

        assert_eq!(result.total_count, 3);
        assert_eq!(result.workers.len(), 3);
        assert!(result.workers.iter().all(|w| w.count == 1));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let job = GenerationJob::new(EntityKind::User, 10, OperationKind::Insert, 0);
        let result = coordinator().generate_parallel(&job);
        assert!(matches!(result, Err(GenerationError::InvalidJob(_))));
    }

    #[test]
    fn test_from_names_errors() {
        assert!(matches!(
            GenerationJob::from_names("invalid", 5, "insert", 2),
            Err(GenerationError::UnknownKind(_))
        ));
        assert!(matches!(
            GenerationJob::from_names("user", 5, "invalid", 2),
            Err(GenerationError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_derived_seed_is_reproducible() {
        let job = GenerationJob::new(EntityKind::Order, 57, OperationKind::RandomMix, 3)
            .with_seed(SeedPolicy::Derived(1234));

        let first = coordinator().generate_parallel(&job).unwrap();
        let second = coordinator().generate_parallel(&job).unwrap();

        assert_eq!(first.statements, second.statements);
        assert_eq!(
            first.workers.iter().map(|w| w.seed).collect::<Vec<_>>(),
            vec![1234, 1235, 1236]
        );
    }

    #[test]
    fn test_worker_chunk_matches_standalone_batch() {
        let anchor = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let job = GenerationJob::new(EntityKind::User, 10, OperationKind::Update, 2)
            .with_seed(SeedPolicy::Derived(77));
        let result = coordinator().generate_parallel(&job).unwrap();

        let worker = result.workers.iter().find(|w| w.index == 1).unwrap();
        let mut batch =
            BatchGenerator::from_generator(RecordGenerator::new(worker.seed).with_anchor(anchor));
        let expected = batch.generate_batch(EntityKind::User, worker.count, OperationKind::Update);

        for statement in &expected {
            assert!(result.statements.contains(statement));
        }
    }

    #[test]
    fn test_fresh_seeds_are_distinct_per_worker() {
        let job = GenerationJob::new(EntityKind::User, 40, OperationKind::Insert, 4);
        let result = coordinator().generate_parallel(&job).unwrap();

        let mut seeds: Vec<u64> = result.workers.iter().map(|w| w.seed).collect();
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), 4);
    }

    #[test]
    fn test_custom_table() {
        let job = GenerationJob::new(EntityKind::Order, 5, OperationKind::Delete, 2)
            .with_table("archive_orders");
        let result = coordinator().generate_parallel(&job).unwrap();

        assert!(result
            .statements
            .iter()
            .all(|s| s.as_str().starts_with("DELETE FROM archive_orders WHERE id='")));
    }

    #[test]
    fn test_seed_policy_from_option() {
        assert_eq!(SeedPolicy::from(Some(9)), SeedPolicy::Derived(9));
        assert_eq!(SeedPolicy::from(None), SeedPolicy::Fresh);

        let seed = SeedPolicy::Fresh.base_seed();
        assert!((1..=FRESH_SEED_MAX).contains(&seed));
    }

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_panicking_worker_fails_whole_plan() {
        let job = GenerationJob::new(EntityKind::User, 40, OperationKind::Insert, 4)
            .with_seed(SeedPolicy::Derived(1));
        let plan = plan_workers(job.total_count, job.workers, 1);

        let result = execute_plan(&job, &plan, anchor(), Instant::now(), |job, assignment, anchor| {
            if assignment.index == 2 {
                panic!("chunk {} exploded", assignment.index);
            }
            run_worker(job, assignment, anchor)
        });

        match result {
            Err(GenerationError::WorkerFailure { worker, reason }) => {
                assert_eq!(worker, 2);
                assert_eq!(reason, "worker panicked: chunk 2 exploded");
            }
            other => panic!("expected WorkerFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_first_failing_worker_is_reported() {
        let job = GenerationJob::new(EntityKind::Product, 9, OperationKind::Delete, 3);
        let plan = plan_workers(job.total_count, job.workers, 10);

        let result = execute_plan(&job, &plan, anchor(), Instant::now(), |job, assignment, anchor| {
            if assignment.index > 0 {
                panic!("worker down");
            }
            run_worker(job, assignment, anchor)
        });

        assert!(matches!(
            result,
            Err(GenerationError::WorkerFailure { worker: 1, .. })
        ));
    }

    #[test]
    fn test_execute_plan_with_healthy_workers() {
        let job = GenerationJob::new(EntityKind::Order, 10, OperationKind::Insert, 3);
        let plan = plan_workers(job.total_count, job.workers, 5);

        let result = execute_plan(&job, &plan, anchor(), Instant::now(), run_worker).unwrap();
        assert_eq!(result.total_count, 10);
        assert_eq!(result.statements.len(), 10);
        assert_eq!(result.workers.len(), 3);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("bad chunk");
        assert_eq!(panic_message(payload.as_ref()), "worker panicked: bad chunk");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "worker panicked: owned");

        let payload: Box<dyn Any + Send> = Box::new(5u8);
        assert_eq!(panic_message(payload.as_ref()), "worker panicked");
    }
}
