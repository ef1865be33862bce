//! Metrics about the exporter itself.
//!
//! # Metrics
//! - `service_exporter_probe_errors_total` (counter): failed probes by service, reason
//! - `service_exporter_probe_duration_seconds` (histogram): probe latency by service
//! - `service_exporter_poll_cycles_total` (counter): completed poll cycles
//! - `service_exporter_poller_up` (gauge): 1 while the poll loop runs
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op, which keeps tests free of global state
//! - The Prometheus recorder is installed without its own HTTP listener; its
//!   output is appended to the scrape body by the HTTP layer

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

pub const PROBE_ERRORS: &str = "service_exporter_probe_errors_total";
pub const PROBE_DURATION: &str = "service_exporter_probe_duration_seconds";
pub const POLL_CYCLES: &str = "service_exporter_poll_cycles_total";
pub const POLLER_UP: &str = "service_exporter_poller_up";

/// Install the global Prometheus recorder and describe the exporter metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            metrics_exporter_prometheus::Matcher::Full(PROBE_DURATION.to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        )?
        .install_recorder()?;

    describe_counter!(PROBE_ERRORS, "Probes that did not produce a status");
    describe_histogram!(PROBE_DURATION, metrics::Unit::Seconds, "Time spent running one probe");
    describe_counter!(POLL_CYCLES, "Completed passes over the monitored services");
    describe_gauge!(POLLER_UP, "Whether the poll loop is running");

    Ok(handle)
}

/// Record the outcome of a single probe.
pub fn record_probe(service: &str, started: Instant, error_reason: Option<&'static str>) {
    histogram!(PROBE_DURATION, "service" => service.to_string())
        .record(started.elapsed().as_secs_f64());

    if let Some(reason) = error_reason {
        counter!(PROBE_ERRORS, "service" => service.to_string(), "reason" => reason).increment(1);
    }
}

pub fn record_poll_cycle() {
    counter!(POLL_CYCLES).increment(1);
}

pub fn record_poller_up(up: bool) {
    gauge!(POLLER_UP).set(if up { 1.0 } else { 0.0 });
}
