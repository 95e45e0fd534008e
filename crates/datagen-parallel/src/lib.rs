//! Parallel generation and performance accounting for sql-datagen.
//!
//! The [`ParallelCoordinator`] splits a generation job across OS threads,
//! each running its own seeded [`BatchGenerator`](datagen_generator::BatchGenerator),
//! and merges the output. The remaining modules measure what happened:
//! per-worker and per-session metrics, a [`PerformanceMonitor`] for host
//! load, a [`Pacer`] for rate-limited execution, and table/JSON reports.
//!
//! # Architecture
//!
//! ```text
//!               GenerationJob { kind, total_count, operation, workers, seed }
//!                               │
//!                               ▼
//!                    ┌─────────────────────┐
//!                    │ ParallelCoordinator │  plan_workers(total, workers, base_seed)
//!                    └──────────┬──────────┘
//!            ┌──────────────────┼──────────────────┐
//!            ▼                  ▼                  ▼
//!      worker-0 (seed)    worker-1 (seed+1)   worker-N (seed+N)
//!      BatchGenerator     BatchGenerator      BatchGenerator
//!            │                  │                  │
//!            └──────────────────┼──────────────────┘
//!                               ▼
//!                        ParallelResult
//!          statements, total_count, duration = max(worker durations)
//! ```
//!
//! # Example
//!
//! ```rust
//! use datagen_core::{EntityKind, OperationKind};
//! use datagen_parallel::{GenerationJob, ParallelCoordinator, SeedPolicy};
//!
//! let job = GenerationJob::new(EntityKind::Product, 10, OperationKind::Insert, 3)
//!     .with_seed(SeedPolicy::Derived(42));
//! let result = ParallelCoordinator::new().generate_parallel(&job).unwrap();
//! assert_eq!(result.total_count, 10);
//! assert_eq!(result.workers.len(), 3);
//! ```

pub mod aggregator;
pub mod coordinator;
pub mod environment;
pub mod metrics;
pub mod pacing;
pub mod partitioner;

pub use aggregator::{
    format_duration, format_execution_summary, format_number, format_table, write_summary_json,
};
pub use coordinator::{GenerationJob, ParallelCoordinator, SeedPolicy};
pub use environment::{
    log_runtime_environment, MemoryUsage, PerformanceMonitor, PerformanceSnapshot, SystemInfo,
};
pub use metrics::{
    throughput, ExecutionMetrics, ExecutionOutcome, OperationTally, ParallelResult,
    ParallelSummary, WorkerReport, MAX_RECORDED_ERRORS,
};
pub use pacing::Pacer;
pub use partitioner::{describe_plan, partition_counts, plan_workers, WorkerAssignment};
