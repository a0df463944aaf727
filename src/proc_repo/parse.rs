// Pure parsers for the /proc text tables and `df` output. Malformed input yields zeros or `None`.

use super::kv::KeyValues;
use crate::config::ColumnsConfig;
use crate::models::{CpuTicks, DiskInfo, LoadAverage, MemoryInfo, NetCounters, SwapInfo};

const LOOPBACK: &str = "lo";
/// /proc/net/dev starts with two header lines.
const NET_DEV_HEADER_LINES: usize = 2;
/// `df` rows shorter than this are wrapped or truncated and are skipped.
const DF_MIN_FIELDS: usize = 6;

fn net_dev_rows(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines()
        .skip(NET_DEV_HEADER_LINES)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, rest)| (name.trim(), rest))
        .filter(|(name, _)| !name.is_empty())
}

/// Interface names in table order, loopback excluded.
pub(crate) fn parse_interfaces(text: &str) -> Vec<String> {
    net_dev_rows(text)
        .filter(|(name, _)| *name != LOOPBACK)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Byte counters of `interface`; `None` when it is absent or its row is short.
pub(crate) fn parse_net_counters(
    text: &str,
    interface: &str,
    cols: &ColumnsConfig,
) -> Option<NetCounters> {
    let (_, rest) = net_dev_rows(text).find(|(name, _)| *name == interface)?;
    // Column indices count the `name:` token as field 0.
    let fields: Vec<&str> = rest.split_whitespace().collect();
    let field = |col: usize| col.checked_sub(1).and_then(|i| fields.get(i));
    let (rx, tx) = (field(cols.net_rx_bytes)?, field(cols.net_tx_bytes)?);
    Some(NetCounters {
        received_bytes: rx.parse().unwrap_or(0),
        transmitted_bytes: tx.parse().unwrap_or(0),
    })
}

/// The aggregate `cpu ` line of /proc/stat; `None` when missing or short.
pub(crate) fn parse_cpu_ticks(text: &str) -> Option<CpuTicks> {
    let line = text.lines().find(|l| l.starts_with("cpu "))?;
    let v: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(7)
        .map(|f| f.parse().unwrap_or(0))
        .collect();
    let [user, nice, system, idle, iowait, irq, softirq] = v[..] else {
        return None;
    };
    Some(CpuTicks {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
    })
}

/// Whole seconds since boot from /proc/uptime.
pub(crate) fn parse_uptime(text: &str) -> Option<u64> {
    let secs: f64 = text.split_whitespace().next()?.parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then_some(secs as u64)
}

pub(crate) fn parse_loadavg(text: &str) -> LoadAverage {
    let fields: Vec<&str> = text.split_whitespace().take(3).collect();
    if fields.len() < 3 {
        return LoadAverage::default();
    }
    let load = |s: &str| s.parse::<f64>().unwrap_or(0.0);
    LoadAverage {
        one: load(fields[0]),
        five: load(fields[1]),
        fifteen: load(fields[2]),
    }
}

/// Thermal zone reading in millidegrees → degrees Celsius.
pub(crate) fn parse_temperature(text: &str) -> Option<f64> {
    let milli: i64 = text.trim().parse().ok()?;
    Some(milli as f64 / 1000.0)
}

pub(crate) fn memory_from(kv: &KeyValues) -> MemoryInfo {
    MemoryInfo {
        total: kv.get("MemTotal"),
        free: kv.get("MemFree"),
        buffers: kv.get("Buffers"),
        cached: kv.get("Cached"),
        reclaimable: kv.get("SReclaimable"),
    }
}

pub(crate) fn swap_from(kv: &KeyValues) -> SwapInfo {
    SwapInfo {
        total: kv.get("SwapTotal"),
        free: kv.get("SwapFree"),
    }
}

/// Pseudo, temporary and container-backing filesystems that would double count real disks.
pub fn is_excluded_filesystem(fs: &str) -> bool {
    fs.contains('-')
        || fs == "none"
        || fs.starts_with("tmpfs")
        || fs.starts_with("devtmpfs")
        || fs.starts_with("udev")
        || fs.contains("by-uuid")
        || fs.contains("chroot")
        || fs.contains("docker")
        || fs.contains("storage")
}

/// Sum of total/used/available over real filesystems in a `df` table (header skipped).
pub(crate) fn parse_df(text: &str, cols: &ColumnsConfig) -> DiskInfo {
    let mut sum = DiskInfo::default();
    for line in text.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < DF_MIN_FIELDS || is_excluded_filesystem(fields[0]) {
            continue;
        }
        let num = |i: usize| fields.get(i).and_then(|s| s.parse::<u64>().ok());
        if let (Some(total), Some(used), Some(available)) = (
            num(cols.disk_total),
            num(cols.disk_used),
            num(cols.disk_available),
        ) {
            sum += DiskInfo {
                total,
                used,
                available,
            };
        }
    }
    sum
}
