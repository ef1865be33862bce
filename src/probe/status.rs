//! Service activation state.

use serde::Serialize;

/// Activation state reported by the external query tool.
///
/// The discriminants are the values published on the `service_up` gauge.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Inactive = 0,
    Active = 1,
    Unknown = 2,
}

impl ServiceStatus {
    /// Map the raw output of the query tool to a status.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for anything outside
    /// the `active` / `inactive` / `unknown` vocabulary.
    pub fn from_output(output: &str) -> Option<Self> {
        match output.trim() {
            "inactive" => Some(ServiceStatus::Inactive),
            "active" => Some(ServiceStatus::Active),
            "unknown" => Some(ServiceStatus::Unknown),
            _ => None,
        }
    }

    /// Numeric gauge value.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceStatus::Inactive => "inactive",
            ServiceStatus::Active => "active",
            ServiceStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_outputs() {
        assert_eq!(ServiceStatus::from_output("inactive"), Some(ServiceStatus::Inactive));
        assert_eq!(ServiceStatus::from_output("active"), Some(ServiceStatus::Active));
        assert_eq!(ServiceStatus::from_output("unknown"), Some(ServiceStatus::Unknown));
    }

    #[test]
    fn test_output_is_trimmed() {
        assert_eq!(ServiceStatus::from_output("active\n"), Some(ServiceStatus::Active));
        assert_eq!(ServiceStatus::from_output("  inactive \r\n"), Some(ServiceStatus::Inactive));
    }

    #[test]
    fn test_unrecognized_outputs() {
        for output in ["", "failed", "activating", "Active", "active active", "1"] {
            assert_eq!(ServiceStatus::from_output(output), None, "output {:?}", output);
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(ServiceStatus::Inactive.code(), 0);
        assert_eq!(ServiceStatus::Active.code(), 1);
        assert_eq!(ServiceStatus::Unknown.code(), 2);
    }
}
