//! The poll loop.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::time;

use crate::config::PollerConfig;
use crate::observability::metrics;
use crate::probe::StatusProbe;
use crate::registry::ServiceRegistry;

/// Outcome of one pass over the monitored services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Services whose status was written to the registry.
    pub updated: usize,
    /// Services whose probe failed.
    pub failed: usize,
}

/// Periodically probes every monitored service and publishes the results.
pub struct Poller<P> {
    probe: P,
    services: Arc<[String]>,
    registry: ServiceRegistry,
    interval: Duration,
}

impl<P: StatusProbe> Poller<P> {
    pub fn new(probe: P, services: Vec<String>, registry: ServiceRegistry, interval: Duration) -> Self {
        Self {
            probe,
            services: services.into(),
            registry,
            interval,
        }
    }

    pub fn from_config(
        probe: P,
        services: Vec<String>,
        registry: ServiceRegistry,
        config: &PollerConfig,
    ) -> Self {
        Self::new(probe, services, registry, Duration::from_millis(config.interval_ms))
    }

    /// Probe every service once, in order.
    pub async fn poll_once(&self) -> CycleReport {
        let mut report = CycleReport::default();

        for service in self.services.iter() {
            let started = Instant::now();
            match self.probe.probe(service).await {
                Ok(status) => {
                    metrics::record_probe(service, started, None);
                    let previous = self.registry.set(service, status);
                    if previous != Some(status) {
                        tracing::debug!(
                            service = %service,
                            status = %status,
                            previous = ?previous,
                            "Service status changed"
                        );
                    }
                    report.updated += 1;
                }
                Err(e) => {
                    metrics::record_probe(service, started, Some(e.reason()));
                    tracing::warn!(service = %service, error = %e, "Service probe failed");
                    report.failed += 1;
                }
            }
        }

        metrics::record_poll_cycle();
        report
    }

    /// Run until a shutdown signal arrives.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            services = self.services.len(),
            interval_ms = self.interval.as_millis() as u64,
            "Poll loop starting"
        );

        loop {
            let report = self.poll_once().await;
            tracing::trace!(updated = report.updated, failed = report.failed, "Poll cycle complete");

            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Poll loop received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
