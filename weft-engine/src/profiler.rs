//! Per-node timing collection and report formatting.

use parking_lot::Mutex;
use std::fmt::Write as _;
use std::time::Duration;

/// One node's measured execution time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    /// Node name.
    pub node: String,
    /// Elapsed execute time.
    pub duration: Duration,
}

/// Thread-safe, append-only collection of [`ProfileRecord`]s.
///
/// Workers append as nodes finish; the report is read only after the run
/// terminates. The report's total is the sum of node durations; across
/// concurrent nodes that exceeds wall-clock runtime, which is why the total
/// row says so.
#[derive(Default)]
pub struct Profiler {
    records: Mutex<Vec<ProfileRecord>>,
}

impl Profiler {
    /// Create an empty profiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one timing record.
    pub fn record(&self, node: &str, duration: Duration) {
        self.records.lock().push(ProfileRecord {
            node: node.to_string(),
            duration,
        });
    }

    /// Snapshot of the collected records, in append order.
    pub fn records(&self) -> Vec<ProfileRecord> {
        self.records.lock().clone()
    }

    /// Render the report: one row per node sorted by duration descending,
    /// with each node's share of the summed duration, then the total row.
    pub fn format_report(&self) -> String {
        let mut records = self.records();
        if records.is_empty() {
            return "\n--- profiling report (no nodes executed) ---\n".to_string();
        }

        records.sort_by(|a, b| b.duration.cmp(&a.duration));
        let total_ms: f64 = records
            .iter()
            .map(|r| r.duration.as_secs_f64() * 1000.0)
            .sum();

        let mut out = String::new();
        out.push_str("\n--- profiling report ---\n");
        let _ = writeln!(
            out,
            "{:<32}{:>15}{:>12}",
            "node", "duration (ms)", "% of total"
        );
        out.push_str(&"-".repeat(59));
        out.push('\n');

        for record in &records {
            let ms = record.duration.as_secs_f64() * 1000.0;
            let percent = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let _ = writeln!(out, "{:<32}{:>15.3}{:>11.1}%", record.node, ms, percent);
        }

        out.push_str(&"-".repeat(59));
        out.push('\n');
        let _ = writeln!(
            out,
            "{:<32}{:>15.3}",
            "total (sum of node durations)", total_ms
        );
        out
    }

    /// Print the report to standard output.
    pub fn print_report(&self) {
        print!("{}", self.format_report());
    }
}
