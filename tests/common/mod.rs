//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::PrometheusHandle;
use service_exporter::observability::metrics::init_metrics;
use service_exporter::probe::{CommandProbe, ProbeError, ServiceStatus, StatusProbe};

/// Probe running a `/bin/sh -c` script; the service name is `$0`.
pub fn shell_probe(script: &str) -> CommandProbe {
    CommandProbe::new("/bin/sh", vec!["-c".into(), script.into()], Duration::from_secs(5))
}

/// Probe reporting `active` for the first `healthy_calls` probes, then panicking.
#[derive(Clone)]
pub struct PanickingProbe {
    calls: Arc<AtomicUsize>,
    healthy_calls: usize,
}

impl PanickingProbe {
    pub fn after(healthy_calls: usize) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            healthy_calls,
        }
    }
}

impl StatusProbe for PanickingProbe {
    async fn probe(&self, _service: &str) -> Result<ServiceStatus, ProbeError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.healthy_calls {
            panic!("injected probe fault");
        }
        Ok(ServiceStatus::Active)
    }
}

/// Handle to the process-wide recorder, installed on first use.
///
/// Every exporter in this test binary records into the same recorder, so
/// assertions on its output must match on labels, not on absence of a family.
#[allow(dead_code)]
pub fn self_metrics() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| init_metrics().expect("install prometheus recorder"))
        .clone()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// GET `path` until `ready` accepts the body or the deadline passes.
#[allow(dead_code)]
pub async fn get_until<F>(addr: SocketAddr, path: &str, deadline: Duration, ready: F) -> (u16, String)
where
    F: Fn(u16, &str) -> bool,
{
    let client = client();
    let started = Instant::now();
    let mut last = (0, String::new());

    while started.elapsed() < deadline {
        if let Ok(res) = client.get(format!("http://{}{}", addr, path)).send().await {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            if ready(status, &body) {
                return (status, body);
            }
            last = (status, body);
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }

    panic!("condition not met within {:?}, last response: {:?}", deadline, last);
}
