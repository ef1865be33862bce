//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Start the supervised poll loop
//! - Bind the listener and begin serving scrapes
//!
//! # Design Decisions
//! - Fail fast on startup errors: a listener that cannot bind is fatal
//! - The registry is created here and handed to both the poll loop and the
//!   HTTP state, nothing is global
//! - A poll loop fault degrades silently unless `exit_on_fault` is set

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;

use crate::config::ExporterConfig;
use crate::error::ExporterError;
use crate::http::{AppState, ExporterServer};
use crate::lifecycle::signals::spawn_signal_listener;
use crate::lifecycle::Shutdown;
use crate::net;
use crate::observability::metrics;
use crate::poller::{spawn_supervised, Poller, PollerState};
use crate::probe::{CommandProbe, StatusProbe};
use crate::registry::ServiceRegistry;

/// A fully wired exporter waiting for a listener.
pub struct Exporter<P> {
    config: ExporterConfig,
    probe: P,
    self_metrics: Option<PrometheusHandle>,
}

impl<P: StatusProbe> Exporter<P> {
    pub fn new(config: ExporterConfig, probe: P) -> Self {
        Self {
            config,
            probe,
            self_metrics: None,
        }
    }

    /// Append the exporter's own metrics to scrapes.
    pub fn with_self_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.self_metrics = Some(handle);
        self
    }

    /// Run the poll loop and serve scrapes on `listener` until `shutdown`
    /// fires, or until the poll loop faults when `exit_on_fault` is set.
    pub async fn serve(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), ExporterError> {
        let Exporter {
            config,
            probe,
            self_metrics,
        } = self;

        if config.services.is_empty() {
            tracing::warn!("No services defined to monitor, serving an empty registry");
        }

        let registry = ServiceRegistry::new();
        let poller = Poller::from_config(probe, config.services.clone(), registry.clone(), &config.poller);
        let mut poller_handle = spawn_supervised(poller, shutdown.subscribe());

        let mut state = AppState::new(registry, poller_handle.subscribe(), &config);
        if let Some(handle) = self_metrics {
            state = state.with_self_metrics(handle);
        }
        let server = ExporterServer::new(state, &config);
        let server_task = server.run(listener, shutdown.subscribe());
        tokio::pin!(server_task);

        let result = if config.poller.exit_on_fault {
            tokio::select! {
                served = &mut server_task => served.map_err(ExporterError::from),
                ended = poller_handle.wait_until_done() => {
                    if ended == PollerState::Faulted {
                        tracing::error!("Poll loop faulted and exit_on_fault is set, shutting down");
                        shutdown.trigger();
                        if let Err(e) = (&mut server_task).await {
                            tracing::warn!(error = %e, "HTTP server error during shutdown");
                        }
                        Err(ExporterError::PollerFaulted)
                    } else {
                        (&mut server_task).await.map_err(ExporterError::from)
                    }
                }
            }
        } else {
            (&mut server_task).await.map_err(ExporterError::from)
        };

        // The server may stop on its own; make sure the poll loop follows.
        shutdown.trigger();
        poller_handle.join().await;

        if let Err(e) = &result {
            tracing::error!(error = %e, "Exporter stopped with error");
        }
        result
    }
}

/// Start the exporter with the external command probe and OS signal handling.
pub async fn run(config: ExporterConfig) -> Result<(), ExporterError> {
    tracing::info!(
        listen_address = %config.listener.listen_address,
        metrics_path = %config.metrics.path,
        services = ?config.services,
        probe_command = %config.probe.command,
        probe_timeout_ms = config.probe.timeout_ms,
        interval_ms = config.poller.interval_ms,
        "Configuration loaded"
    );

    let probe = CommandProbe::from_config(&config.probe);

    let self_metrics = if config.metrics.self_metrics {
        match metrics::init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install metrics recorder, self metrics disabled");
                None
            }
        }
    } else {
        None
    };

    let listener = match net::bind(&config.listener.listen_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start HTTP listener");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let mut exporter = Exporter::new(config, probe);
    if let Some(handle) = self_metrics {
        exporter = exporter.with_self_metrics(handle);
    }
    exporter.serve(listener, shutdown).await
}
