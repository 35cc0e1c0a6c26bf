use crate::Properties;
use kubeprobe_core::{HealthCheckConfig, ProbeConfig};
use tracing::debug;

const DEFAULT_SERVER_PORT: u16 = 8080;
const HEALTH_ENDPOINT: &str = "/health";

/// Derives actuator health probes from Spring Boot application properties
#[derive(Debug, Clone)]
pub struct SpringBootHealthCheck {
    pub readiness_initial_delay_seconds: i32,
    pub liveness_initial_delay_seconds: i32,
    pub timeout_seconds: Option<i32>,
}

impl Default for SpringBootHealthCheck {
    fn default() -> Self {
        Self {
            readiness_initial_delay_seconds: 10,
            liveness_initial_delay_seconds: 180,
            timeout_seconds: None,
        }
    }
}

impl SpringBootHealthCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the actuator health endpoint, with an empty host so the
    /// kubelet probes the pod IP
    pub fn health_url(&self, props: &Properties) -> String {
        let management_port = props.get_any(&["management.server.port", "management.port"]);

        let (port, ssl, path) = match management_port {
            Some(port) => {
                let ssl = props
                    .get_any(&["management.server.ssl.key-store", "management.ssl.key-store"])
                    .is_some();
                let path = context_path(props.get_any(&[
                    "management.server.servlet.context-path",
                    "management.context-path",
                ]));
                (port.to_string(), ssl, path)
            }
            None => {
                let port = props
                    .get("server.port")
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_SERVER_PORT.to_string());
                let ssl = props.get("server.ssl.key-store").is_some();
                let path = [
                    context_path(
                        props.get_any(&["server.servlet.context-path", "server.context-path"]),
                    ),
                    context_path(props.get_any(&["server.servlet.path", "server.servlet-path"])),
                    context_path(props.get("management.context-path")),
                ]
                .concat();
                (port, ssl, path)
            }
        };

        let scheme = if ssl { "https" } else { "http" };
        let url = format!("{}://:{}{}{}", scheme, port, path, HEALTH_ENDPOINT);
        debug!(%url, "Derived Spring Boot health endpoint");
        url
    }

    /// Readiness and liveness probes against the health endpoint
    pub fn health_checks(&self, props: &Properties) -> HealthCheckConfig {
        let url = self.health_url(props);
        let probe = |initial_delay_seconds: i32| ProbeConfig {
            initial_delay_seconds: Some(initial_delay_seconds),
            timeout_seconds: self.timeout_seconds,
            ..ProbeConfig::get_url(url.clone())
        };

        HealthCheckConfig {
            readiness: Some(probe(self.readiness_initial_delay_seconds)),
            liveness: Some(probe(self.liveness_initial_delay_seconds)),
            startup: None,
        }
    }
}

/// Normalise a context path to either "" or "/segment" without a trailing slash
fn context_path(raw: Option<&str>) -> String {
    let trimmed = raw.unwrap_or_default().trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
