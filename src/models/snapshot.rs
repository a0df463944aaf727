// Published snapshot and its JSON wire form

use serde::{Deserialize, Serialize};

use super::{DiskInfo, MemoryInfo, NetCounters, RateResult, SwapInfo};

/// Shown in place of the CPU temperature when the sensor can't be read.
pub const TEMPERATURE_UNAVAILABLE: &str = "N/A";

const KB_PER_MB: f64 = 1024.0;
const KB_PER_GB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Everything measured in one tick. Replaced wholesale each tick; never mutated after publish.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub uptime_secs: u64,
    pub load: LoadAverage,
    pub cpu_usage_percent: f64,
    pub cpu_temp_celsius: Option<f64>,
    pub memory: MemoryInfo,
    pub swap: SwapInfo,
    pub disk: DiskInfo,
    pub rates: RateResult,
    /// Raw counters of the selected interface at sample time.
    pub net_totals: NetCounters,
    pub interface: Option<String>,
    /// Local wall-clock time of the sample, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
}

impl Snapshot {
    /// Uptime as `"{days}d {hours}h {minutes}m"`.
    pub fn uptime_display(&self) -> String {
        format_uptime(self.uptime_secs)
    }

    pub fn memory_usage_percent(&self) -> f64 {
        percent(self.memory.used(), self.memory.total)
    }

    pub fn disk_usage_percent(&self) -> f64 {
        percent(self.disk.used, self.disk.total)
    }
}

pub(crate) fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    format!("{}d {}h {}m", days, hours, minutes)
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

fn two_places(v: f64) -> String {
    format!("{:.2}", v)
}

/// JSON body of GET /api/stats. Field names are a fixed contract with the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsPayload {
    pub run_time: String,
    pub last1: String,
    pub last5: String,
    pub last15: String,
    pub cpu_usage: String,
    pub cpu_temp: String,
    pub mem_total_space: String,
    pub mem_used_space: String,
    pub mem_free_space: String,
    pub mem_usage: String,
    pub swap_total_space: String,
    pub swap_used_space: String,
    pub swap_free_space: String,
    pub disk_total_space: String,
    pub disk_used_space: String,
    pub disk_available_space: String,
    pub disk_usage: String,
    pub receive_speed: String,
    pub transmit_speed: String,
    pub receive_total: String,
    pub transmit_total: String,
    #[serde(rename = "lastest_time")]
    pub latest_time: String,
}

impl From<&Snapshot> for StatsPayload {
    fn from(s: &Snapshot) -> Self {
        let cpu_temp = match s.cpu_temp_celsius {
            Some(t) => format!("{:.1}°C", t),
            None => TEMPERATURE_UNAVAILABLE.to_string(),
        };
        Self {
            run_time: s.uptime_display(),
            last1: two_places(s.load.one),
            last5: two_places(s.load.five),
            last15: two_places(s.load.fifteen),
            cpu_usage: two_places(s.cpu_usage_percent),
            cpu_temp,
            mem_total_space: two_places(s.memory.total as f64 / KB_PER_MB),
            mem_used_space: two_places(s.memory.used() as f64 / KB_PER_MB),
            mem_free_space: two_places(s.memory.available() as f64 / KB_PER_MB),
            mem_usage: two_places(s.memory_usage_percent()),
            swap_total_space: two_places(s.swap.total as f64 / KB_PER_MB),
            swap_used_space: two_places(s.swap.used() as f64 / KB_PER_MB),
            swap_free_space: two_places(s.swap.free as f64 / KB_PER_MB),
            disk_total_space: two_places(s.disk.total as f64 / KB_PER_GB),
            disk_used_space: two_places(s.disk.used as f64 / KB_PER_GB),
            disk_available_space: two_places(s.disk.available as f64 / KB_PER_GB),
            disk_usage: two_places(s.disk_usage_percent()),
            receive_speed: two_places(s.rates.receive_rate_kbps),
            transmit_speed: two_places(s.rates.transmit_rate_kbps),
            receive_total: two_places(s.net_totals.received_bytes as f64 / BYTES_PER_GB),
            transmit_total: two_places(s.net_totals.transmitted_bytes as f64 / BYTES_PER_GB),
            latest_time: s.timestamp.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_splits_into_days_hours_minutes() {
        assert_eq!(format_uptime(0), "0d 0h 0m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
        assert_eq!(format_uptime(3 * 86_400 + 59), "3d 0h 0m");
    }

    #[test]
    fn zero_totals_give_zero_percentages() {
        let s = Snapshot::default();
        assert_eq!(s.memory_usage_percent(), 0.0);
        assert_eq!(s.disk_usage_percent(), 0.0);
        let p = StatsPayload::from(&s);
        assert_eq!(p.mem_usage, "0.00");
        assert_eq!(p.disk_usage, "0.00");
        assert_eq!(p.cpu_temp, TEMPERATURE_UNAVAILABLE);
    }
}
