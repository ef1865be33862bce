//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the exporter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the service exporter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExporterConfig {
    /// Services to monitor, in probe order.
    pub services: Vec<String>,

    /// HTTP listener settings.
    pub listener: ListenerConfig,

    /// Scrape endpoint settings.
    pub metrics: MetricsConfig,

    /// External status query settings.
    pub probe: ProbeConfig,

    /// Poll loop settings.
    pub poller: PollerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Listen address. `:9199` binds every interface.
    pub listen_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            listen_address: ":9199".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Scrape endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// URL path serving the metrics.
    pub path: String,

    /// Append the exporter's own metrics (probe errors, durations) to scrapes.
    pub self_metrics: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: "/metrics".to_string(),
            self_metrics: true,
        }
    }
}

/// External status query configuration.
///
/// The service name is appended after `args`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Query executable.
    pub command: String,

    /// Arguments placed before the service name.
    pub args: Vec<String>,

    /// Probe timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command: "/bin/systemctl".to_string(),
            args: vec!["is-active".to_string()],
            timeout_ms: 5_000,
        }
    }
}

/// Poll loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Pause between poll cycles in milliseconds.
    pub interval_ms: u64,

    /// Shut the exporter down when the poll loop faults instead of serving
    /// frozen values.
    pub exit_on_fault: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            exit_on_fault: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Shorthand for `log_level = "debug"`.
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ObservabilityConfig {
    /// Level applied to this crate when `RUST_LOG` is unset.
    pub fn effective_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }
}

/// Split a comma separated service list into an ordered, distinct set.
///
/// Blank entries are dropped, so an empty string yields no services.
pub fn parse_service_list(raw: &str) -> Vec<String> {
    dedup_services(raw.split(',').map(str::to_string))
}

/// Trim names, drop blanks and keep only the first occurrence of each name.
pub fn dedup_services<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut services: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if services.iter().any(|s| s == name) {
            tracing::warn!(service = %name, "Duplicate service ignored");
            continue;
        }
        services.push(name.to_string());
    }
    services
}
