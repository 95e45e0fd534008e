//! Metrics types for parallel generation and statement execution.

use chrono::{DateTime, Utc};
use datagen_core::{EntityKind, Operation, OperationKind, Statement};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Records per second, or 0 when no time has elapsed.
pub fn throughput(count: u64, duration: Duration) -> f64 {
    if duration.is_zero() {
        0.0
    } else {
        count as f64 / duration.as_secs_f64()
    }
}

/// What one parallel worker did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerReport {
    /// Zero-based worker index
    pub index: usize,
    /// Seed the worker's generator was built from
    pub seed: u64,
    /// Statements produced
    pub count: u64,
    /// Time spent generating
    pub duration: Duration,
}

impl WorkerReport {
    pub fn throughput(&self) -> f64 {
        throughput(self.count, self.duration)
    }
}

/// Merged output of a parallel generation job.
///
/// Statements are concatenated worker by worker; their order across workers
/// carries no meaning.
#[derive(Debug, Clone)]
pub struct ParallelResult {
    pub kind: EntityKind,
    pub operation: OperationKind,
    pub statements: Vec<Statement>,
    /// Sum of all worker counts
    pub total_count: u64,
    /// Longest worker duration (workers run concurrently)
    pub duration: Duration,
    /// Coordinator wall clock, including thread startup and merge
    pub elapsed: Duration,
    /// One report per launched worker
    pub workers: Vec<WorkerReport>,
}

impl ParallelResult {
    /// `total_count / duration`, or 0 when the duration is zero.
    pub fn throughput(&self) -> f64 {
        throughput(self.total_count, self.duration)
    }

    pub fn operation_tally(&self) -> OperationTally {
        OperationTally::from_statements(&self.statements)
    }

    /// Serializable summary without the statements themselves.
    pub fn summary(&self) -> ParallelSummary {
        ParallelSummary {
            kind: self.kind,
            operation: self.operation,
            total_count: self.total_count,
            workers_launched: self.workers.len(),
            duration_secs: self.duration.as_secs_f64(),
            elapsed_secs: self.elapsed.as_secs_f64(),
            records_per_second: self.throughput(),
            operations: self.operation_tally(),
            workers: self.workers.clone(),
            generated_at: Utc::now(),
        }
    }
}

/// How many statements of each operation a batch contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTally {
    pub insert: u64,
    pub update: u64,
    pub delete: u64,
}

impl OperationTally {
    pub fn from_statements(statements: &[Statement]) -> Self {
        let mut tally = Self::default();
        for statement in statements {
            tally.add(statement.operation());
        }
        tally
    }

    pub fn add(&mut self, operation: Operation) {
        match operation {
            Operation::Insert => self.insert += 1,
            Operation::Update => self.update += 1,
            Operation::Delete => self.delete += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.insert + self.update + self.delete
    }
}

/// JSON-friendly view of a [`ParallelResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelSummary {
    pub kind: EntityKind,
    pub operation: OperationKind,
    pub total_count: u64,
    pub workers_launched: usize,
    pub duration_secs: f64,
    pub elapsed_secs: f64,
    pub records_per_second: f64,
    pub operations: OperationTally,
    pub workers: Vec<WorkerReport>,
    pub generated_at: DateTime<Utc>,
}

/// Result of executing one statement against a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub affected_rows: u64,
    pub duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionOutcome {
    pub fn succeeded(affected_rows: u64, duration: Duration) -> Self {
        Self {
            success: true,
            affected_rows,
            duration,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>, duration: Duration) -> Self {
        Self {
            success: false,
            affected_rows: 0,
            duration,
            error: Some(error.into()),
        }
    }
}

/// Maximum number of distinct error messages kept for the final summary.
pub const MAX_RECORDED_ERRORS: usize = 10;

/// Running totals for a generate-and-execute session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    /// Statements handed to the executor
    pub executed: u64,
    /// Statements that succeeded
    pub succeeded: u64,
    /// Statements that failed
    pub failed: u64,
    /// Rows reported as affected
    pub affected_rows: u64,
    /// Time spent inside the executor
    pub execution_time: Duration,
    /// Time spent generating statements
    pub generation_time: Duration,
    /// Batches generated
    pub batch_count: u64,
    /// First few error messages
    pub errors: Vec<String>,
}

impl ExecutionMetrics {
    pub fn record(&mut self, outcome: &ExecutionOutcome) {
        self.executed += 1;
        self.execution_time += outcome.duration;
        if outcome.success {
            self.succeeded += 1;
            self.affected_rows += outcome.affected_rows;
        } else {
            self.failed += 1;
            if let Some(error) = &outcome.error {
                if self.errors.len() < MAX_RECORDED_ERRORS && !self.errors.contains(error) {
                    self.errors.push(error.clone());
                }
            }
        }
    }

    pub fn record_generation(&mut self, result: &ParallelResult) {
        self.batch_count += 1;
        self.generation_time += result.elapsed;
    }

    /// Share of `target` already executed, in percent (0..=100).
    pub fn progress_percent(&self, target: u64) -> f64 {
        if target == 0 {
            return 100.0;
        }
        (self.executed as f64 / target as f64 * 100.0).min(100.0)
    }

    /// Statements executed per second of `elapsed` wall time.
    pub fn statements_per_second(&self, elapsed: Duration) -> f64 {
        throughput(self.executed, elapsed)
    }

    pub fn average_latency(&self) -> Duration {
        if self.executed == 0 {
            Duration::ZERO
        } else {
            let nanos = self.execution_time.as_nanos() / u128::from(self.executed);
            Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
        }
    }
}
