// Background sampling worker: one collect per interval, result published through a watch channel.
// Collection runs on the blocking pool so the df subprocess never stalls request handlers.

use crate::collector::StatsCollector;
use crate::models::Snapshot;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{oneshot, watch};
use tokio::time::{Duration, Instant, interval};
use tracing::Instrument;

/// Collector, publish channel, and shutdown for the worker.
pub struct WorkerDeps {
    pub collector: StatsCollector,
    pub snapshot_tx: watch::Sender<Arc<Snapshot>>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Worker logging config. The sampling interval comes from the collector.
pub struct WorkerConfig {
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Channel holding the latest snapshot; starts with an all-zero placeholder.
pub fn snapshot_channel() -> (watch::Sender<Arc<Snapshot>>, watch::Receiver<Arc<Snapshot>>) {
    watch::channel(Arc::new(Snapshot::default()))
}

async fn collect_once(collector: &Arc<Mutex<StatsCollector>>) -> anyhow::Result<Snapshot> {
    let collector = collector.clone();
    tokio::task::spawn_blocking(move || {
        // A panic mid-collect leaves the baseline either old or new, both usable.
        let mut collector = collector.lock().unwrap_or_else(PoisonError::into_inner);
        collector.collect()
    })
    .await
    .map_err(|e| anyhow::anyhow!("collector task join: {}", e))
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        collector,
        snapshot_tx,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        stats_log_interval_secs,
    } = config;

    let sample_interval = collector.interval().as_duration();
    let stats_log_interval = Duration::from_secs(stats_log_interval_secs);
    let collector = Arc::new(Mutex::new(collector));

    let sample_interval_ms = sample_interval.as_millis() as u64;
    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", sample_interval_ms);

    tokio::spawn(
        async move {
            let mut tick = interval(sample_interval);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut stats_log_tick = interval(stats_log_interval);
            stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick of a tokio interval fires immediately; skip it for the stats log.
            stats_log_tick.reset();

            let mut ticks_total: u64 = 0;
            let mut failed_ticks_total: u64 = 0;
            let mut last_collect = Duration::ZERO;

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        let started = Instant::now();
                        match collect_once(&collector).await {
                            Ok(snapshot) => {
                                snapshot_tx.send_replace(Arc::new(snapshot));
                                ticks_total += 1;
                            }
                            Err(e) => {
                                failed_ticks_total += 1;
                                tracing::warn!(error = %e, operation = "collect", "sampling tick failed");
                            }
                        }
                        last_collect = started.elapsed();
                        if last_collect > sample_interval {
                            tracing::debug!(
                                elapsed_ms = last_collect.as_millis() as u64,
                                "collect took longer than the sample interval"
                            );
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Worker shutting down");
                        break;
                    }
                    _ = stats_log_tick.tick() => {
                        let interface = snapshot_tx.borrow().interface.clone();
                        tracing::info!(
                            ticks_total,
                            failed_ticks_total,
                            last_collect_ms = last_collect.as_millis() as u64,
                            interface = interface.as_deref().unwrap_or(""),
                            "app stats"
                        );
                    }
                }
            }
        }
        .instrument(worker_span),
    )
}
