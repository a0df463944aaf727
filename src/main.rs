use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use sysmon::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Host resource monitor with a web dashboard and JSON API.
#[derive(Debug, Parser)]
#[command(name = "sysmon", version, about)]
struct Cli {
    /// Port to listen on (overrides server.port; default 8080)
    #[arg(short, long)]
    port: Option<u16>,

    /// Config file (default: $CONFIG_FILE, then ./config.toml if present)
    #[arg(short, long)]
    config: Option<String>,
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let mut app_config = config::AppConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        app_config = app_config.with_port(port)?;
    }
    let interval = models::Interval::from_millis(app_config.monitoring.sample_interval_ms)
        .ok_or_else(|| anyhow::anyhow!("monitoring.sample_interval_ms must be > 0"))?;

    let proc_repo = Arc::new(proc_repo::ProcRepo::new(app_config.sources.clone()));
    let registry = Arc::new(registry::InterfaceRegistry::new(proc_repo.clone()));
    registry.auto_select();

    let collector = collector::StatsCollector::new(
        proc_repo,
        registry.clone(),
        interval,
        app_config.monitoring.utc_offset_minutes,
    );
    let (snapshot_tx, snapshot_rx) = worker::snapshot_channel();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            collector,
            snapshot_tx,
            shutdown_rx,
        },
        worker::WorkerConfig {
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    let app = routes::app(
        snapshot_rx,
        registry,
        app_config.monitoring.sample_interval_ms,
    );
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped; shutting down worker");
    let _ = shutdown_tx.send(());
    let _ = worker_handle.await;

    Ok(())
}
