// Worker integration test: spawn, publish snapshots, shutdown

mod common;

use common::FakeProc;
use std::sync::Arc;
use sysmon::collector::StatsCollector;
use sysmon::models::Interval;
use sysmon::registry::InterfaceRegistry;
use sysmon::worker::{WorkerConfig, WorkerDeps, snapshot_channel, spawn};
use tokio::time::{Duration, timeout};

#[tokio::test]
async fn worker_publishes_snapshots_and_stops_on_shutdown() {
    let fake = FakeProc::new();
    let repo = Arc::new(fake.repo());
    let registry = Arc::new(InterfaceRegistry::new(repo.clone()));
    registry.auto_select();
    let collector = StatsCollector::new(
        repo,
        registry.clone(),
        Interval::from_millis(25).unwrap(),
        None,
    );

    let (snapshot_tx, mut snapshot_rx) = snapshot_channel();
    assert!(snapshot_rx.borrow().timestamp.is_empty());
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            collector,
            snapshot_tx,
            shutdown_rx,
        },
        WorkerConfig {
            stats_log_interval_secs: 3600,
        },
    );

    // First tick fires immediately, then every 25 ms.
    for _ in 0..3 {
        timeout(Duration::from_secs(5), snapshot_rx.changed())
            .await
            .expect("snapshot within timeout")
            .expect("worker alive");
    }
    let latest = snapshot_rx.borrow_and_update().clone();
    assert!(!latest.timestamp.is_empty());
    assert_eq!(latest.interface.as_deref(), Some("eth0"));
    assert_eq!(latest.memory.used(), 4_200_000);

    shutdown_tx.send(()).unwrap();
    timeout(Duration::from_secs(5), handle)
        .await
        .expect("worker stops")
        .unwrap();
}

#[tokio::test]
async fn worker_picks_up_interface_switch() {
    let fake = FakeProc::new();
    fake.set_net_dev(&[("eth0", 0, 0), ("wlan0", 500_000_000, 0)]);
    let repo = Arc::new(fake.repo());
    let registry = Arc::new(InterfaceRegistry::new(repo.clone()));
    registry.auto_select();
    let collector = StatsCollector::new(
        repo,
        registry.clone(),
        Interval::from_millis(20).unwrap(),
        None,
    );
    let (snapshot_tx, mut snapshot_rx) = snapshot_channel();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let handle = spawn(
        WorkerDeps {
            collector,
            snapshot_tx,
            shutdown_rx,
        },
        WorkerConfig {
            stats_log_interval_secs: 3600,
        },
    );

    registry.select("wlan0").unwrap();
    let snapshot = timeout(
        Duration::from_secs(5),
        snapshot_rx.wait_for(|s| s.interface.as_deref() == Some("wlan0")),
    )
    .await
    .expect("switch observed")
    .expect("worker alive")
    .clone();
    // wlan0's counters are far above eth0's; without a new baseline this would spike.
    assert_eq!(snapshot.rates.receive_rate_kbps, 0.0);
    assert_eq!(snapshot.net_totals.received_bytes, 500_000_000);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}
