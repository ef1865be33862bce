//! Concurrent last-known-status store.

use dashmap::DashMap;
use std::sync::Arc;

use crate::probe::ServiceStatus;

/// Shared mapping from service name to its last successfully probed status.
#[derive(Clone, Default, Debug)]
pub struct ServiceRegistry {
    inner: Arc<DashMap<String, ServiceStatus>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest status for a service, replacing any previous one.
    ///
    /// Returns the status that was replaced, if any.
    pub fn set(&self, service: &str, status: ServiceStatus) -> Option<ServiceStatus> {
        if let Some(mut entry) = self.inner.get_mut(service) {
            return Some(std::mem::replace(entry.value_mut(), status));
        }
        self.inner.insert(service.to_string(), status)
    }

    /// Last known status of a single service.
    pub fn get(&self, service: &str) -> Option<ServiceStatus> {
        self.inner.get(service).map(|r| *r.value())
    }

    /// Copy of every entry, sorted by service name.
    pub fn snapshot(&self) -> Vec<(String, ServiceStatus)> {
        let mut entries: Vec<_> = self
            .inner
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
