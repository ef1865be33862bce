//! Configuration loading from disk and the command line.

use std::fs;
use std::path::Path;

use crate::config::cli::Cli;
use crate::config::schema::{dedup_services, ExporterConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Parse configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<ExporterConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Read configuration from a TOML file without validating it.
pub fn load_config(path: &Path) -> Result<ExporterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Build the runtime configuration: defaults, then the optional file, then
/// environment and flags.
pub fn resolve_config(cli: Cli) -> Result<ExporterConfig, ConfigError> {
    resolve_config_with_env(cli, |name| std::env::var(name).ok())
}

fn resolve_config_with_env<F>(mut cli: Cli, lookup: F) -> Result<ExporterConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ExporterConfig::default(),
    };

    cli.fill_unseparated_env(lookup);
    cli.apply(&mut config);
    config.services = dedup_services(std::mem::take(&mut config.services));

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;

    #[test]
    fn test_parse_full_file() {
        let config = parse_config(
            r#"
            services = ["sshd", "nginx"]

            [listener]
            listen_address = "127.0.0.1:9200"

            [metrics]
            path = "/scrape"
            self_metrics = false

            [probe]
            command = "/usr/bin/systemctl"
            args = ["--user", "is-active"]
            timeout_ms = 250

            [poller]
            interval_ms = 5000
            exit_on_fault = true

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.services, vec!["sshd", "nginx"]);
        assert_eq!(config.listener.listen_address, "127.0.0.1:9200");
        assert_eq!(config.metrics.path, "/scrape");
        assert!(!config.metrics.self_metrics);
        assert_eq!(config.probe.args, vec!["--user", "is-active"]);
        assert_eq!(config.probe.timeout_ms, 250);
        assert_eq!(config.poller.interval_ms, 5000);
        assert!(config.poller.exit_on_fault);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config("services = [\"cron\"]\n").unwrap();

        assert_eq!(config.services, vec!["cron"]);
        assert_eq!(config.listener.listen_address, ":9199");
        assert_eq!(config.metrics.path, "/metrics");
        assert_eq!(config.probe.command, "/bin/systemctl");
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("services = \"sshd\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/service-exporter.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("service-exporter-{}-{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config("load", "services = [\"sshd\", \"cron\"]\n[metrics]\npath = \"/m\"\n");

        let config = load_config(&path).unwrap();
        assert_eq!(config.services, vec!["sshd", "cron"]);
        assert_eq!(config.metrics.path, "/m");

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_resolve_file_then_flags() {
        let path = temp_config("resolve", "services = [\"sshd\", \"sshd\", \"cron\"]\n[metrics]\npath = \"/m\"\n");
        let cli = Cli {
            config: Some(path.clone()),
            metrics_path: Some("/scrape".into()),
            ..Cli::default()
        };

        let config = resolve_config_with_env(cli, |_| None).unwrap();
        assert_eq!(config.services, vec!["sshd", "cron"]);
        assert_eq!(config.metrics.path, "/scrape");

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_resolve_reads_unseparated_env_names() {
        let env = |name: &str| match name {
            "LISTENADDRESS" => Some("127.0.0.1:9300".to_string()),
            "METRICSPATH" => Some("/scrape".to_string()),
            _ => None,
        };

        let config = resolve_config_with_env(Cli::default(), env).unwrap();
        assert_eq!(config.listener.listen_address, "127.0.0.1:9300");
        assert_eq!(config.metrics.path, "/scrape");
    }

    #[test]
    fn test_resolve_rejects_invalid_result() {
        let cli = Cli {
            metrics_path: Some("/*".into()),
            ..Cli::default()
        };

        let err = resolve_config_with_env(cli, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroInterval,
            ValidationError::EmptyProbeCommand,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: poller interval must be greater than zero, probe command must not be empty"
        );
    }
}
