// One sampling tick: counters → rates, plus point-in-time readings, into a Snapshot.

use crate::models::{CounterSample, CpuTicks, Interval, NetCounters, RateResult, Snapshot};
use crate::proc_repo::ProcRepo;
use crate::registry::InterfaceRegistry;
use crate::sampler;
use chrono::FixedOffset;
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counters from the last tick that could read them. `None` until a read succeeds; a
/// failed read leaves the previous value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Baseline {
    pub net: Option<NetCounters>,
    pub cpu: Option<CpuTicks>,
}

/// Owns the counter baseline; the only writer of it. Never fails: any source that can't be
/// read shows up as zeros or placeholders in the snapshot.
pub struct StatsCollector {
    repo: Arc<ProcRepo>,
    registry: Arc<InterfaceRegistry>,
    interval: Interval,
    utc_offset: Option<FixedOffset>,
    baseline: Baseline,
}

impl StatsCollector {
    /// Reads the initial baseline so the first `collect` already has something to difference.
    pub fn new(
        repo: Arc<ProcRepo>,
        registry: Arc<InterfaceRegistry>,
        interval: Interval,
        utc_offset_minutes: Option<i32>,
    ) -> Self {
        let selection = registry.begin_tick();
        let net = selection
            .rebaseline
            .or_else(|| try_read_net(&repo, selection.interface.as_deref()));
        let baseline = Baseline {
            net,
            cpu: repo.try_read_cpu_ticks(),
        };
        let utc_offset = utc_offset_minutes.and_then(|m| FixedOffset::east_opt(m * 60));
        Self {
            repo,
            registry,
            interval,
            utc_offset,
            baseline,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn collect(&mut self) -> Snapshot {
        let selection = self.registry.begin_tick();
        if selection.switched {
            tracing::debug!(
                interface = selection.interface.as_deref().unwrap_or(""),
                baseline_read = selection.rebaseline.is_some(),
                "network baseline reset after interface switch"
            );
            self.baseline.net = selection.rebaseline;
        }

        let net = try_read_net(&self.repo, selection.interface.as_deref());
        let cpu = self.repo.try_read_cpu_ticks();
        let rates = self.rates(net, cpu);
        // A failed read keeps the last good counters so the next good tick doesn't
        // difference against zero.
        if net.is_some() {
            self.baseline.net = net;
        }
        if cpu.is_some() {
            self.baseline.cpu = cpu;
        }

        let (memory, swap) = self.repo.read_meminfo();
        Snapshot {
            uptime_secs: self.repo.read_uptime_secs(),
            load: self.repo.read_load_average(),
            cpu_usage_percent: rates.cpu_usage_percent,
            cpu_temp_celsius: self.repo.read_cpu_temperature(),
            memory,
            swap,
            disk: self.repo.read_disk_usage(),
            rates,
            net_totals: net.unwrap_or_default(),
            interface: selection.interface,
            timestamp: self.timestamp(),
        }
    }

    /// Rates against the baseline; 0 for whichever side lacks a reading on either end.
    fn rates(&self, net: Option<NetCounters>, cpu: Option<CpuTicks>) -> RateResult {
        let net_pair = self.baseline.net.zip(net);
        let cpu_pair = self.baseline.cpu.zip(cpu);
        let prev = CounterSample {
            net: net_pair.map(|(p, _)| p).unwrap_or_default(),
            cpu: cpu_pair.map(|(p, _)| p).unwrap_or_default(),
        };
        let curr = CounterSample {
            net: net_pair.map(|(_, c)| c).unwrap_or_default(),
            cpu: cpu_pair.map(|(_, c)| c).unwrap_or_default(),
        };
        sampler::sample(&prev, &curr, self.interval)
    }

    fn timestamp(&self) -> String {
        match self.utc_offset {
            Some(offset) => chrono::Utc::now()
                .with_timezone(&offset)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            None => chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

fn try_read_net(repo: &ProcRepo, interface: Option<&str>) -> Option<NetCounters> {
    interface.and_then(|i| repo.try_read_network_counters(i))
}
