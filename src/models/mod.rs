// Domain models: raw counters, capacity readings, published snapshot

mod capacity;
mod counters;
mod snapshot;

pub use capacity::{DiskInfo, MemoryInfo, SwapInfo};
pub use counters::{CounterSample, CpuTicks, Interval, NetCounters, RateResult};
pub use snapshot::{LoadAverage, Snapshot, StatsPayload, TEMPERATURE_UNAVAILABLE};
