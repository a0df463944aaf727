// GET handlers: dashboard page, version

use axum::{extract::State, response::Html, response::IntoResponse};

use super::AppState;
use crate::models::StatsPayload;

const DASHBOARD_TEMPLATE: &str = include_str!("dashboard.html");

/// Fill the dashboard template with the poll interval and the snapshot to show before the
/// first poll returns.
pub(super) fn render_dashboard(stats: &StatsPayload, interval_ms: u64) -> String {
    // `<` is escaped so the embedded JSON can't close the surrounding <script>.
    let initial = serde_json::to_string(stats)
        .unwrap_or_else(|_| "null".into())
        .replace('<', "\\u003c");
    DASHBOARD_TEMPLATE
        .replace("{{INTERVAL_MS}}", &interval_ms.to_string())
        .replace("{{INITIAL_STATS}}", &initial)
}

/// GET / — HTML dashboard.
pub(super) async fn dashboard_handler(State(state): State<AppState>) -> Html<String> {
    let stats = StatsPayload::from(state.latest().as_ref());
    Html(render_dashboard(&stats, state.sample_interval_ms))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
