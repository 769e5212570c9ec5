//! CPU utilization sensor.

use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the kernel's CPU time counters.
const PROC_STAT: &str = "/proc/stat";

/// Aggregate jiffy counters from the `cpu` summary line of /proc/stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CpuTimes {
    idle: u64,
    total: u64,
}

/// CPU utilization sensor.
///
/// Each sample is a zero-duration snapshot: the current counters are
/// compared against the counters captured by the previous call. The first
/// sample after construction has no baseline and reports 0.0.
pub struct CpuSensor {
    path: PathBuf,
    last_times: Option<CpuTimes>,
    last_percent: f64,
}

impl CpuSensor {
    /// Creates a CPU sensor reading the live /proc/stat.
    pub fn new() -> Self {
        Self::with_path(PROC_STAT)
    }

    /// Creates a CPU sensor reading counters from an alternate path.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            last_times: None,
            last_percent: 0.0,
        }
    }

    /// Samples CPU utilization as a percentage in [0, 100].
    ///
    /// On a failed read the last computed value is returned unchanged.
    pub fn sample_percent(&mut self) -> f64 {
        let Some(current) = self.read_times() else {
            return self.last_percent;
        };

        if let Some(last) = self.last_times {
            let idle_delta = current.idle.saturating_sub(last.idle);
            let total_delta = current.total.saturating_sub(last.total);

            if total_delta > 0 {
                let busy = 100.0 * (1.0 - idle_delta as f64 / total_delta as f64);
                self.last_percent = busy.clamp(0.0, 100.0);
            }
        }

        self.last_times = Some(current);
        self.last_percent
    }

    fn read_times(&self) -> Option<CpuTimes> {
        let content = fs::read_to_string(&self.path).ok()?;
        parse_cpu_times(content.lines().next()?)
    }
}

impl Default for CpuSensor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the aggregate `cpu` line of /proc/stat.
///
/// Idle time counts both the `idle` and `iowait` fields; everything else is
/// busy time.
fn parse_cpu_times(line: &str) -> Option<CpuTimes> {
    let mut fields = line.split_whitespace();
    if fields.next() != Some("cpu") {
        return None;
    }

    let values: Vec<u64> = fields.filter_map(|s| s.parse().ok()).collect();
    if values.len() < 5 {
        return None;
    }

    Some(CpuTimes {
        idle: values[3] + values[4],
        total: values.iter().sum(),
    })
}
