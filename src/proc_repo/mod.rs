// Host metrics read from /proc text sources and the disk-usage tool.
// Every read degrades to zeros (or None) instead of failing.

mod kv;
mod parse;

pub use parse::is_excluded_filesystem;

use crate::config::SourcesConfig;
use crate::models::{CpuTicks, DiskInfo, LoadAverage, MemoryInfo, NetCounters, SwapInfo};
use kv::KeyValues;
use std::process::Command;
use tracing::instrument;

pub struct ProcRepo {
    sources: SourcesConfig,
}

/// Read a whole text source, logging (not propagating) failures.
fn read_source(path: &str, operation: &'static str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::debug!(error = %e, path, operation, "metric source unavailable");
            None
        }
    }
}

impl ProcRepo {
    pub fn new(sources: SourcesConfig) -> Self {
        Self { sources }
    }

    /// Interface names in /proc/net/dev order, loopback excluded. Empty when unreadable.
    #[instrument(level = "debug", skip(self), fields(repo = "proc", operation = "list_interfaces"))]
    pub fn list_interfaces(&self) -> Vec<String> {
        read_source(&self.sources.net_dev, "list_interfaces")
            .map(|s| parse::parse_interfaces(&s))
            .unwrap_or_default()
    }

    /// Byte counters for `interface`; zeros when the interface or source is missing.
    pub fn read_network_counters(&self, interface: &str) -> NetCounters {
        self.try_read_network_counters(interface).unwrap_or_default()
    }

    /// Like `read_network_counters`, but `None` when the interface or source is missing.
    #[instrument(level = "debug", skip(self), fields(repo = "proc", operation = "read_network_counters"))]
    pub fn try_read_network_counters(&self, interface: &str) -> Option<NetCounters> {
        let text = read_source(&self.sources.net_dev, "read_network_counters")?;
        let counters = parse::parse_net_counters(&text, interface, &self.sources.columns);
        if counters.is_none() {
            tracing::debug!(interface, "interface has no usable row in net_dev");
        }
        counters
    }

    pub fn read_cpu_ticks(&self) -> CpuTicks {
        self.try_read_cpu_ticks().unwrap_or_default()
    }

    /// `None` when the source is unreadable or has no aggregate `cpu` line.
    #[instrument(level = "debug", skip(self), fields(repo = "proc", operation = "read_cpu_ticks"))]
    pub fn try_read_cpu_ticks(&self) -> Option<CpuTicks> {
        read_source(&self.sources.cpu_stat, "read_cpu_ticks")
            .and_then(|s| parse::parse_cpu_ticks(&s))
    }

    /// Seconds since boot; 0 when unreadable.
    #[instrument(level = "debug", skip(self), fields(repo = "proc", operation = "read_uptime"))]
    pub fn read_uptime_secs(&self) -> u64 {
        read_source(&self.sources.uptime, "read_uptime")
            .and_then(|s| parse::parse_uptime(&s))
            .unwrap_or(0)
    }

    #[instrument(level = "debug", skip(self), fields(repo = "proc", operation = "read_load_average"))]
    pub fn read_load_average(&self) -> LoadAverage {
        read_source(&self.sources.loadavg, "read_load_average")
            .map(|s| parse::parse_loadavg(&s))
            .unwrap_or_default()
    }

    /// CPU temperature in °C, `None` when the sensor is absent or unreadable.
    #[instrument(level = "debug", skip(self), fields(repo = "proc", operation = "read_cpu_temperature"))]
    pub fn read_cpu_temperature(&self) -> Option<f64> {
        read_source(&self.sources.thermal, "read_cpu_temperature")
            .and_then(|s| parse::parse_temperature(&s))
    }

    /// Memory and swap from one read of /proc/meminfo.
    #[instrument(level = "debug", skip(self), fields(repo = "proc", operation = "read_meminfo"))]
    pub fn read_meminfo(&self) -> (MemoryInfo, SwapInfo) {
        let kv = read_source(&self.sources.meminfo, "read_meminfo")
            .map(|s| KeyValues::parse(&s))
            .unwrap_or_default();
        if kv.is_empty() {
            tracing::debug!(path = %self.sources.meminfo, "meminfo had no readable fields");
        }
        (parse::memory_from(&kv), parse::swap_from(&kv))
    }

    /// Disk totals across real filesystems. Spawns the disk command and waits for it, so
    /// call only from the sampling context.
    #[instrument(level = "debug", skip(self), fields(repo = "proc", operation = "read_disk_usage"))]
    pub fn read_disk_usage(&self) -> DiskInfo {
        let Some((program, args)) = self.sources.disk_command.split_first() else {
            return DiskInfo::default();
        };
        let output = match Command::new(program).args(args).output() {
            Ok(o) => o,
            Err(e) => {
                tracing::debug!(error = %e, program = %program, "disk command failed to run");
                return DiskInfo::default();
            }
        };
        // df exits non-zero when any single mount is unreadable but still prints the rest.
        if !output.status.success() {
            tracing::debug!(status = %output.status, program = %program, "disk command exited with failure");
        }
        parse::parse_df(
            &String::from_utf8_lossy(&output.stdout),
            &self.sources.columns,
        )
    }
}
