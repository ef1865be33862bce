//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the scrape, health and landing handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a bound listener until shutdown

use axum::{body::Body, http::Request, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ExporterConfig;
use crate::http::handlers::{health_handler, landing_handler, metrics_handler};
use crate::http::request::{request_id_of, UuidRequestId};
use crate::poller::PollerState;
use crate::registry::ServiceRegistry;

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/healthz";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: ServiceRegistry,
    pub poller_state: watch::Receiver<PollerState>,
    pub self_metrics: Option<PrometheusHandle>,
    pub metrics_path: Arc<str>,
    pub services: Arc<[String]>,
}

impl AppState {
    pub fn new(
        registry: ServiceRegistry,
        poller_state: watch::Receiver<PollerState>,
        config: &ExporterConfig,
    ) -> Self {
        Self {
            registry,
            poller_state,
            self_metrics: None,
            metrics_path: config.metrics.path.as_str().into(),
            services: config.services.clone().into(),
        }
    }

    /// Append the given recorder's output to every scrape.
    pub fn with_self_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.self_metrics = Some(handle);
        self
    }
}

/// HTTP server exposing the service registry.
pub struct ExporterServer {
    router: Router,
}

impl ExporterServer {
    /// Create a new HTTP server with the given state and configuration.
    pub fn new(state: AppState, config: &ExporterConfig) -> Self {
        let router = Self::build_router(
            state,
            Duration::from_secs(config.listener.request_timeout_secs),
        );
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        let metrics_path = state.metrics_path.to_string();

        let mut router = Router::new()
            .route(&metrics_path, get(metrics_handler))
            .route(HEALTH_PATH, get(health_handler));

        // Unmatched paths get the landing page, or the metrics themselves
        // when they live at the root.
        router = if metrics_path == "/" {
            router.fallback(metrics_handler)
        } else {
            router
                .route("/", get(landing_handler))
                .fallback(landing_handler)
        };

        router.with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::debug_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id_of(request),
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout)),
        )
    }

    /// The configured router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
