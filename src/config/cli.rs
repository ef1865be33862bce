//! Command line and environment overrides.

use clap::Parser;
use std::path::PathBuf;

use crate::config::schema::{parse_service_list, ExporterConfig};

/// Prometheus exporter for systemd service activation state.
#[derive(Parser, Debug, Default)]
#[command(name = "service-exporter", version, about, long_about = None)]
pub struct Cli {
    /// A comma separated list of services you want to monitor
    #[arg(short = 's', long = "services", env = "SERVICES")]
    pub services: Option<String>,

    /// Address to listen on, e.g. ":9199" or "127.0.0.1:9199"
    #[arg(long, env = "LISTEN_ADDRESS")]
    pub listen_address: Option<String>,

    /// URL path serving the metrics
    #[arg(long, env = "METRICS_PATH")]
    pub metrics_path: Option<String>,

    /// Enable debug logging
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// Probe timeout in milliseconds
    #[arg(long)]
    pub probe_timeout_ms: Option<u64>,

    /// Pause between poll cycles in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Exit when the poll loop faults instead of serving frozen values
    #[arg(long)]
    pub exit_on_poller_fault: bool,

    /// Optional TOML configuration file
    #[arg(short = 'c', long = "config", env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Fill address and path from `LISTENADDRESS` / `METRICSPATH`, the
    /// unseparated names used by envconfig-style deployments, when neither
    /// a flag nor the separated variable set them.
    pub fn fill_unseparated_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.listen_address.is_none() {
            self.listen_address = lookup("LISTENADDRESS");
        }
        if self.metrics_path.is_none() {
            self.metrics_path = lookup("METRICSPATH");
        }
    }

    /// Overlay every value given on the command line or in the environment.
    pub fn apply(&self, config: &mut ExporterConfig) {
        if let Some(services) = &self.services {
            config.services = parse_service_list(services);
        }
        if let Some(address) = &self.listen_address {
            config.listener.listen_address = address.clone();
        }
        if let Some(path) = &self.metrics_path {
            config.metrics.path = path.clone();
        }
        if self.debug {
            config.observability.debug = true;
        }
        if let Some(timeout) = self.probe_timeout_ms {
            config.probe.timeout_ms = timeout;
        }
        if let Some(interval) = self.interval_ms {
            config.poller.interval_ms = interval;
        }
        if self.exit_on_poller_fault {
            config.poller.exit_on_fault = true;
        }
    }
}
