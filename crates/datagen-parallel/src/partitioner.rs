//! Work partitioning for parallel generation.
//!
//! Splits a requested total into near-equal chunks, one per worker.

/// One worker's share of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerAssignment {
    /// Zero-based worker index
    pub index: usize,
    /// Records this worker generates
    pub count: u64,
    /// Seed for this worker's record generator
    pub seed: u64,
}

/// Chunk size for every worker, including idle ones.
///
/// `base = total / workers`, `remainder = total % workers`; worker `i` gets
/// `base + 1` if `i < remainder`, else `base`. The sizes always sum to
/// `total` and never differ by more than one.
pub fn partition_counts(total: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }

    let base = total / workers as u64;
    let remainder = total % workers as u64;

    (0..workers as u64)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Build the launch plan: one assignment per worker with a non-empty chunk.
///
/// Worker `i` is seeded with `base_seed + i`. Workers whose chunk is empty
/// are left out of the plan entirely.
pub fn plan_workers(total: u64, workers: usize, base_seed: u64) -> Vec<WorkerAssignment> {
    partition_counts(total, workers)
        .into_iter()
        .enumerate()
        .filter(|(_, count)| *count > 0)
        .map(|(index, count)| WorkerAssignment {
            index,
            count,
            seed: base_seed.wrapping_add(index as u64),
        })
        .collect()
}

/// Describe the partitioning plan for logging.
pub fn describe_plan(plan: &[WorkerAssignment]) -> String {
    let mut lines = Vec::with_capacity(plan.len() + 1);
    lines.push("Work distribution:".to_string());

    for assignment in plan {
        lines.push(format!(
            "  worker-{}: {} records (seed={})",
            assignment.index, assignment.count, assignment.seed
        ));
    }

    lines.join("\n")
}
