//! Prometheus text exposition of the service registry.

use crate::probe::ServiceStatus;

/// Gauge family carrying the service status codes.
pub const SERVICE_UP: &str = "service_up";

/// Content type of the Prometheus text format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render one `service_up` sample per entry.
///
/// An empty registry renders nothing at all, not even the HELP/TYPE header.
pub fn render_service_up(entries: &[(String, ServiceStatus)]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(64 + entries.len() * 40);
    out.push_str(&format!("# HELP {} Is the service active\n", SERVICE_UP));
    out.push_str(&format!("# TYPE {} gauge\n", SERVICE_UP));
    for (service, status) in entries {
        out.push_str(&format!(
            "{}{{service=\"{}\"}} {}\n",
            SERVICE_UP,
            escape_label_value(service),
            status.code()
        ));
    }
    out
}

/// Escape a label value per the text exposition format.
fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_entries() {
        let body = render_service_up(&[
            ("nginx".into(), ServiceStatus::Inactive),
            ("sshd".into(), ServiceStatus::Active),
            ("cups".into(), ServiceStatus::Unknown),
        ]);

        assert_eq!(
            body,
            "# HELP service_up Is the service active\n\
             # TYPE service_up gauge\n\
             service_up{service=\"nginx\"} 0\n\
             service_up{service=\"sshd\"} 1\n\
             service_up{service=\"cups\"} 2\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_service_up(&[]), "");
    }

    #[test]
    fn test_label_escaping() {
        let body = render_service_up(&[("we\"ird\\name\n".into(), ServiceStatus::Active)]);
        assert!(body.contains(r#"service_up{service="we\"ird\\name\n"} 1"#));
    }
}
