// HTTP routes: dashboard page and JSON API

mod api;
mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};

use crate::models::Snapshot;
use crate::registry::InterfaceRegistry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) snapshot_rx: watch::Receiver<Arc<Snapshot>>,
    pub(crate) registry: Arc<InterfaceRegistry>,
    pub(crate) sample_interval_ms: u64,
}

impl AppState {
    /// The last fully published snapshot. Never blocks on a collect in progress.
    pub(crate) fn latest(&self) -> Arc<Snapshot> {
        self.snapshot_rx.borrow().clone()
    }
}

pub fn app(
    snapshot_rx: watch::Receiver<Arc<Snapshot>>,
    registry: Arc<InterfaceRegistry>,
    sample_interval_ms: u64,
) -> Router {
    let state = AppState {
        snapshot_rx,
        registry,
        sample_interval_ms,
    };
    Router::new()
        .route("/", get(http::dashboard_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/stats", get(api::stats_handler)) // GET /api/stats
        .route("/api/interfaces", get(api::interfaces_handler)) // GET /api/interfaces
        .route("/api/switch-interface", post(api::switch_interface_handler)) // POST /api/switch-interface
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
