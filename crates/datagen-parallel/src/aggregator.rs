//! Human-readable and JSON reports for parallel generation and execution.

use crate::metrics::{ExecutionMetrics, ParallelResult};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Format a parallel generation result as a per-worker table.
pub fn format_table(result: &ParallelResult) -> String {
    let mut output = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Worker", "Seed", "Records", "Duration", "Records/sec"]);

    for worker in &result.workers {
        table.add_row(vec![
            Cell::new(format!("worker-{}", worker.index)),
            Cell::new(worker.seed),
            Cell::new(format_number(worker.count)),
            Cell::new(format_duration(worker.duration)),
            Cell::new(format!("{:.1}", worker.throughput())),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan),
        Cell::new("-"),
        Cell::new(format_number(result.total_count)),
        Cell::new(format!("{}*", format_duration(result.duration))),
        Cell::new(format!("{:.1}", result.throughput())),
    ]);

    output.push_str(&table.to_string());
    output.push_str("\n* Longest worker (workers run in parallel)\n");

    let tally = result.operation_tally();
    output.push_str(&format!(
        "Operations: {} insert, {} update, {} delete\n",
        format_number(tally.insert),
        format_number(tally.update),
        format_number(tally.delete)
    ));

    output
}

/// Format the totals of a generate-and-execute session.
pub fn format_execution_summary(metrics: &ExecutionMetrics, elapsed: Duration) -> String {
    let mut output = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);

    let failed_cell = if metrics.failed > 0 {
        Cell::new(format_number(metrics.failed)).fg(Color::Red)
    } else {
        Cell::new("0").fg(Color::Green)
    };

    table.add_row(vec![Cell::new("Executed"), Cell::new(format_number(metrics.executed))]);
    table.add_row(vec![Cell::new("Succeeded"), Cell::new(format_number(metrics.succeeded))]);
    table.add_row(vec![Cell::new("Failed"), failed_cell]);
    table.add_row(vec![
        Cell::new("Affected rows"),
        Cell::new(format_number(metrics.affected_rows)),
    ]);
    table.add_row(vec![
        Cell::new("Batches"),
        Cell::new(format_number(metrics.batch_count)),
    ]);
    table.add_row(vec![
        Cell::new("Generation time"),
        Cell::new(format_duration(metrics.generation_time)),
    ]);
    table.add_row(vec![
        Cell::new("Execution time"),
        Cell::new(format_duration(metrics.execution_time)),
    ]);
    table.add_row(vec![
        Cell::new("Average latency"),
        Cell::new(format_duration(metrics.average_latency())),
    ]);
    table.add_row(vec![Cell::new("Wall clock"), Cell::new(format_duration(elapsed))]);
    table.add_row(vec![
        Cell::new("Statements/sec"),
        Cell::new(format!("{:.1}", metrics.statements_per_second(elapsed))),
    ]);

    output.push_str(&table.to_string());
    output.push('\n');

    if !metrics.errors.is_empty() {
        output.push_str("\nErrors:\n");
        for error in &metrics.errors {
            output.push_str(&format!("  {error}\n"));
        }
    }

    output
}

/// Write the result's JSON summary to `path`.
pub fn write_summary_json(result: &ParallelResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&result.summary())
        .context("Failed to serialize generation summary")?;
    fs::write(path, json).with_context(|| format!("Failed to write summary: {path:?}"))?;
    Ok(())
}

/// Format a duration: milliseconds below one second, then seconds, minutes
/// and hours.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.1}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else if secs < 3600.0 {
        let whole = secs.floor() as u64;
        format!("{}m {:02}s", whole / 60, whole % 60)
    } else {
        let whole = secs.floor() as u64;
        format!("{}h {:02}m", whole / 3600, (whole % 3600) / 60)
    }
}

/// Format number with thousands separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}
