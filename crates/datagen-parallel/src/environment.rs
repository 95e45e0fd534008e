//! Host performance sampling.
//!
//! [`PerformanceMonitor`] reports CPU load, memory use and static system
//! facts. Every reading is a fresh snapshot; nothing is accumulated.

use serde::{Deserialize, Serialize};
use std::thread;
use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::info;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Memory snapshot in gigabytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub available_gb: f64,
    /// Used share of total, 0..=100
    pub percent: f64,
}

/// Static facts about the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Logical cores, at least 1
    pub cpu_count: usize,
    /// Current frequency of the first core, when the platform reports one
    pub cpu_frequency_mhz: Option<u64>,
    pub total_memory_gb: f64,
}

/// Everything the monitor reports, taken together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub cpu_percent: f64,
    pub cpu_per_core: Vec<f64>,
    pub memory: MemoryUsage,
    pub system: SystemInfo,
}

/// Samples host CPU and memory usage.
pub struct PerformanceMonitor {
    system: System,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    /// Whole-machine CPU utilisation in percent, clamped to 0..=100.
    ///
    /// Blocks for one sampling interval, since sysinfo needs two readings to
    /// compute a delta.
    pub fn cpu_usage(&mut self) -> f64 {
        self.sample_cpu();
        clamp_percent(self.system.global_cpu_usage() as f64)
    }

    /// Per-core CPU utilisation in percent, one entry per logical core.
    pub fn cpu_usage_per_core(&mut self) -> Vec<f64> {
        self.sample_cpu();
        self.system
            .cpus()
            .iter()
            .map(|cpu| clamp_percent(cpu.cpu_usage() as f64))
            .collect()
    }

    pub fn memory_usage(&mut self) -> MemoryUsage {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let available = self.system.available_memory();
        let used = total.saturating_sub(available);
        let percent = if total == 0 {
            0.0
        } else {
            clamp_percent(used as f64 / total as f64 * 100.0)
        };

        MemoryUsage {
            total_gb: to_gb(total),
            used_gb: to_gb(used),
            available_gb: to_gb(available),
            percent,
        }
    }

    pub fn system_info(&mut self) -> SystemInfo {
        self.system.refresh_cpu_all();
        self.system.refresh_memory();

        let cpu_frequency_mhz = self
            .system
            .cpus()
            .first()
            .map(|cpu| cpu.frequency())
            .filter(|mhz| *mhz > 0);

        SystemInfo {
            cpu_count: num_cpus::get().max(1),
            cpu_frequency_mhz,
            total_memory_gb: to_gb(self.system.total_memory()),
        }
    }

    /// Take one reading of every metric.
    pub fn snapshot(&mut self) -> PerformanceSnapshot {
        self.sample_cpu();
        let cpu_percent = clamp_percent(self.system.global_cpu_usage() as f64);
        let cpu_per_core = self
            .system
            .cpus()
            .iter()
            .map(|cpu| clamp_percent(cpu.cpu_usage() as f64))
            .collect();

        PerformanceSnapshot {
            cpu_percent,
            cpu_per_core,
            memory: self.memory_usage(),
            system: self.system_info(),
        }
    }

    fn sample_cpu(&mut self) {
        self.system.refresh_cpu_usage();
        thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        self.system.refresh_cpu_usage();
    }
}

fn to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Log the host's CPU and memory at startup and return the snapshot.
pub fn log_runtime_environment(monitor: &mut PerformanceMonitor) -> SystemInfo {
    info!("=== Runtime Environment ===");

    let system = monitor.system_info();
    info!("CPU cores visible: {}", system.cpu_count);
    match system.cpu_frequency_mhz {
        Some(mhz) => info!("CPU frequency: {} MHz", mhz),
        None => info!("CPU frequency: unknown"),
    }

    let memory = monitor.memory_usage();
    info!("Total memory: {:.2} GB", memory.total_gb);
    info!(
        "Available memory: {:.2} GB ({:.1}% used)",
        memory.available_gb, memory.percent
    );

    info!("===========================");
    system
}
