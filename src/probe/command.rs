//! External command probe.
//!
//! Runs `<command> <args..> <service>` and reads the state from stdout, the
//! way `systemctl is-active <unit>` reports it.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time;

use crate::config::ProbeConfig;
use crate::probe::{ServiceStatus, StatusProbe};

/// Errors that prevent a probe from producing a status.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The query command could not be started or awaited.
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The query command did not finish within the probe timeout.
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    /// The query command finished but printed something other than a known state.
    #[error("unrecognized output {output:?} ({status})")]
    UnrecognizedOutput { output: String, status: ExitStatus },
}

impl ProbeError {
    /// Short label used for the error counter.
    pub fn reason(&self) -> &'static str {
        match self {
            ProbeError::Spawn { .. } => "spawn",
            ProbeError::Timeout(_) => "timeout",
            ProbeError::UnrecognizedOutput { .. } => "unrecognized_output",
        }
    }
}

/// Probe backed by an external process-state query.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandProbe {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.args.clone(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    /// The command line used for `service`, for logging.
    pub fn command_line(&self, service: &str) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        parts.push(self.command.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(service);
        parts.join(" ")
    }

    async fn run(&self, service: &str) -> Result<ServiceStatus, ProbeError> {
        // kill_on_drop reaps the child when the timeout drops this future.
        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(service)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ProbeError::Spawn {
                    command: self.command.clone(),
                    source,
                })
            }
            Err(_) => return Err(ProbeError::Timeout(self.timeout)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);

        // `systemctl is-active` exits non-zero for inactive and unknown units,
        // so a recognized answer takes precedence over the exit status.
        ServiceStatus::from_output(&stdout).ok_or_else(|| ProbeError::UnrecognizedOutput {
            output: stdout.trim().to_string(),
            status: output.status,
        })
    }
}

impl StatusProbe for CommandProbe {
    async fn probe(&self, service: &str) -> Result<ServiceStatus, ProbeError> {
        tracing::trace!(command = %self.command_line(service), "Running probe");
        self.run(service).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str, timeout: Duration) -> CommandProbe {
        CommandProbe::new("/bin/sh", vec!["-c".into(), script.into()], timeout)
    }

    #[tokio::test]
    async fn test_maps_each_state() {
        // The service name lands in $0.
        let probe = sh("echo \"$0\"", Duration::from_secs(5));

        assert_eq!(probe.probe("inactive").await.unwrap(), ServiceStatus::Inactive);
        assert_eq!(probe.probe("active").await.unwrap(), ServiceStatus::Active);
        assert_eq!(probe.probe("unknown").await.unwrap(), ServiceStatus::Unknown);
    }

    #[tokio::test]
    async fn test_recognized_output_wins_over_exit_status() {
        let probe = sh("echo inactive; exit 3", Duration::from_secs(5));
        assert_eq!(probe.probe("nginx").await.unwrap(), ServiceStatus::Inactive);
    }

    #[tokio::test]
    async fn test_unrecognized_output_is_an_error() {
        let probe = sh("echo failed; exit 3", Duration::from_secs(5));

        match probe.probe("nginx").await {
            Err(ProbeError::UnrecognizedOutput { output, status }) => {
                assert_eq!(output, "failed");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected unrecognized output, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_output_is_an_error() {
        let probe = sh("exit 0", Duration::from_secs(5));
        let err = probe.probe("sshd").await.unwrap_err();
        assert_eq!(err.reason(), "unrecognized_output");
    }

    #[tokio::test]
    async fn test_missing_command_is_spawn_error() {
        let probe = CommandProbe::new("/nonexistent/service-query", Vec::new(), Duration::from_secs(5));
        let err = probe.probe("sshd").await.unwrap_err();

        assert!(matches!(err, ProbeError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/service-query"));
    }

    #[tokio::test]
    async fn test_hung_command_times_out() {
        let probe = sh("sleep 5; echo active", Duration::from_millis(100));
        let started = std::time::Instant::now();

        let err = probe.probe("sshd").await.unwrap_err();

        assert!(matches!(err, ProbeError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_command_line() {
        let probe = CommandProbe::new("/bin/systemctl", vec!["is-active".into()], Duration::from_secs(1));
        assert_eq!(probe.command_line("sshd"), "/bin/systemctl is-active sshd");
    }
}
