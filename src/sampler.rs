// Rate and percentage derivation between two counter samples. Pure; the caller owns the baseline.

use crate::models::{CounterSample, CpuTicks, Interval, RateResult};

const BYTES_PER_KB: f64 = 1024.0;

/// Rates from `prev` to `curr` over `interval`.
pub fn sample(prev: &CounterSample, curr: &CounterSample, interval: Interval) -> RateResult {
    RateResult {
        receive_rate_kbps: rate_kbps(
            prev.net.received_bytes,
            curr.net.received_bytes,
            interval,
        ),
        transmit_rate_kbps: rate_kbps(
            prev.net.transmitted_bytes,
            curr.net.transmitted_bytes,
            interval,
        ),
        cpu_usage_percent: cpu_usage_percent(&prev.cpu, &curr.cpu),
    }
}

/// kB/s between two byte counter readings. A counter that went backwards (reset, wrap,
/// interface switch) yields 0 for this tick.
pub fn rate_kbps(prev: u64, curr: u64, interval: Interval) -> f64 {
    match curr.checked_sub(prev) {
        Some(delta) => delta as f64 / BYTES_PER_KB / interval.as_secs_f64(),
        None => 0.0,
    }
}

/// Busy share of the ticks elapsed between two readings, in [0, 100]. 0 when no ticks elapsed.
pub fn cpu_usage_percent(prev: &CpuTicks, curr: &CpuTicks) -> f64 {
    let total = curr.total().saturating_sub(prev.total());
    if total == 0 {
        return 0.0;
    }
    let idle = curr.idle_total().saturating_sub(prev.idle_total()).min(total);
    ((total - idle) as f64 * 100.0 / total as f64).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NetCounters;

    fn secs(n: u64) -> Interval {
        Interval::from_millis(n * 1000).unwrap()
    }

    #[test]
    fn rate_is_delta_over_kib_and_seconds() {
        assert_eq!(rate_kbps(0, 10_240, secs(1)), 10.0);
        assert_eq!(rate_kbps(1_000, 21_480, secs(2)), 10.0);
        assert_eq!(rate_kbps(5, 5, secs(1)), 0.0);
    }

    #[test]
    fn regression_clamps_to_zero() {
        assert_eq!(rate_kbps(u64::MAX, 0, secs(1)), 0.0);
        assert_eq!(rate_kbps(2_048, 1_024, secs(1)), 0.0);
    }

    #[test]
    fn cpu_usage_counts_iowait_as_idle() {
        let prev = CpuTicks::default();
        let curr = CpuTicks {
            user: 30,
            system: 20,
            idle: 40,
            iowait: 10,
            ..Default::default()
        };
        assert_eq!(cpu_usage_percent(&prev, &curr), 50.0);
    }

    #[test]
    fn cpu_usage_is_zero_without_elapsed_ticks() {
        let t = CpuTicks {
            user: 7,
            idle: 9,
            ..Default::default()
        };
        assert_eq!(cpu_usage_percent(&t, &t), 0.0);
    }

    #[test]
    fn cpu_usage_stays_in_range_when_idle_runs_ahead() {
        // iowait may go backwards on some kernels while idle jumps forward.
        let prev = CpuTicks {
            idle: 100,
            iowait: 50,
            user: 10,
            ..Default::default()
        };
        let curr = CpuTicks {
            idle: 200,
            iowait: 0,
            user: 10,
            ..Default::default()
        };
        let usage = cpu_usage_percent(&prev, &curr);
        assert!((0.0..=100.0).contains(&usage), "usage {usage}");
    }

    #[test]
    fn sample_combines_both_directions_and_cpu() {
        let prev = CounterSample {
            net: NetCounters {
                received_bytes: 0,
                transmitted_bytes: 4_096,
            },
            cpu: CpuTicks::default(),
        };
        let curr = CounterSample {
            net: NetCounters {
                received_bytes: 2_048,
                transmitted_bytes: 0,
            },
            cpu: CpuTicks {
                user: 1,
                idle: 3,
                ..Default::default()
            },
        };
        let r = sample(&prev, &curr, secs(1));
        assert_eq!(r.receive_rate_kbps, 2.0);
        assert_eq!(r.transmit_rate_kbps, 0.0);
        assert_eq!(r.cpu_usage_percent, 25.0);
    }
}
