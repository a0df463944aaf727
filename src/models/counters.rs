// Raw monotonic counters and the rates derived from them

use std::time::Duration;

/// Cumulative byte counters for one network interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetCounters {
    pub received_bytes: u64,
    pub transmitted_bytes: u64,
}

/// Aggregate CPU time counters (clock ticks since boot) from the `cpu ` line of /proc/stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
}

impl CpuTicks {
    pub fn total(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
            .saturating_add(self.idle)
            .saturating_add(self.iowait)
            .saturating_add(self.irq)
            .saturating_add(self.softirq)
    }

    /// Idle time including I/O wait.
    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }
}

/// One reading of every counter the sampler differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSample {
    pub net: NetCounters,
    pub cpu: CpuTicks,
}

/// Time between two consecutive samples. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval(Duration);

impl Interval {
    /// Returns `None` for a zero duration; rates over an empty interval are undefined.
    pub fn new(duration: Duration) -> Option<Self> {
        if duration.is_zero() {
            None
        } else {
            Some(Self(duration))
        }
    }

    pub fn from_millis(ms: u64) -> Option<Self> {
        Self::new(Duration::from_millis(ms))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

/// Rates derived from two samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateResult {
    pub receive_rate_kbps: f64,
    pub transmit_rate_kbps: f64,
    pub cpu_usage_percent: f64,
}
