//! Scrape, health and landing page handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;

use crate::http::render::{render_service_up, PROMETHEUS_CONTENT_TYPE};
use crate::http::server::AppState;
use crate::poller::PollerState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub version: &'static str,
    pub poller: PollerState,
    /// Number of monitored services.
    pub services: usize,
    /// Services with at least one successful probe.
    pub reporting: usize,
}

/// Render the registry, followed by the exporter's own metrics.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.registry.snapshot();
    let mut body = render_service_up(&snapshot);

    if let Some(handle) = &state.self_metrics {
        handle.run_upkeep();
        body.push_str(&handle.render());
    }

    tracing::trace!(series = snapshot.len(), "Scrape served");

    ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body)
}

/// Report whether the poll loop is still feeding the registry.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let poller = *state.poller_state.borrow();
    let report = HealthReport {
        version: env!("CARGO_PKG_VERSION"),
        poller,
        services: state.services.len(),
        reporting: state.registry.len(),
    };

    let status = if poller.is_running() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}

/// Small HTML page pointing at the metrics path.
pub async fn landing_handler(State(state): State<AppState>) -> Html<String> {
    let path = escape_html(&state.metrics_path);
    Html(format!(
        "<html>\n\
         <head><title>Prometheus Service Exporter</title></head>\n\
         <body>\n\
         <h1>Prometheus Service Exporter</h1>\n\
         <p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n"
    ))
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
