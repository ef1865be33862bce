//! Service Exporter
//!
//! Exposes the activation state of host services to Prometheus.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                      SERVICE EXPORTER                        │
//!   │                                                              │
//!   │  ┌────────────┐   probe(name)   ┌──────────────┐             │
//!   │  │ poll loop  │────────────────▶│ command probe│──▶ systemctl│
//!   │  │ (poller)   │◀────────────────│              │   is-active │
//!   │  └─────┬──────┘  ServiceStatus  └──────────────┘             │
//!   │        │ set                                                 │
//!   │        ▼                                                     │
//!   │  ┌────────────┐   snapshot   ┌──────────┐                    │
//!   │  │  registry  │◀─────────────│   http   │◀──────────── scrape│
//!   │  └────────────┘              │  server  │                    │
//!   │                              └──────────┘                    │
//!   │  config · observability · lifecycle (startup / shutdown)     │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;

use service_exporter::config::{resolve_config, Cli, ObservabilityConfig};
use service_exporter::lifecycle;
use service_exporter::observability::logging::init_logging;
use service_exporter::ExporterError;

#[tokio::main]
async fn main() -> Result<(), ExporterError> {
    let cli = Cli::parse();

    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_logging(&config.observability);
    tracing::info!("service-exporter v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
