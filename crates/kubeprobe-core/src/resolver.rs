use crate::port::parse_port;
use crate::url::{is_http_like, scheme_of, ProbeUrl};
use crate::{CheckKind, KubeprobeError, ProbeConfig, Result};
use k8s_openapi::api::core::v1::{ExecAction, HTTPGetAction, Probe, TCPSocketAction};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use tracing::debug;

/// The action a resolved probe performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeAction {
    HttpGet {
        host: String,
        path: String,
        port: i32,
        scheme: String,
    },
    TcpSocket {
        host: Option<String>,
        port: IntOrString,
    },
    Exec {
        command: Vec<String>,
    },
}

/// A probe action plus the timing settings copied from its config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProbe {
    pub action: ProbeAction,
    pub initial_delay_seconds: Option<i32>,
    pub timeout_seconds: Option<i32>,
    pub period_seconds: Option<i32>,
    pub success_threshold: Option<i32>,
    pub failure_threshold: Option<i32>,
}

impl ResolvedProbe {
    fn new(action: ProbeAction, config: &ProbeConfig) -> Self {
        Self {
            action,
            initial_delay_seconds: config.initial_delay_seconds,
            timeout_seconds: config.timeout_seconds,
            period_seconds: config.period_seconds,
            success_threshold: config.success_threshold,
            failure_threshold: config.failure_threshold,
        }
    }
}

/// Builds the Kubernetes object. The scheme is written upper-case
/// (`HTTP`/`HTTPS`) here, unlike the lower-case scheme kept in
/// [`ProbeAction::HttpGet`], since the API server rejects anything else.
impl From<ResolvedProbe> for Probe {
    fn from(resolved: ResolvedProbe) -> Self {
        let mut probe = Probe {
            initial_delay_seconds: resolved.initial_delay_seconds,
            timeout_seconds: resolved.timeout_seconds,
            period_seconds: resolved.period_seconds,
            success_threshold: resolved.success_threshold,
            failure_threshold: resolved.failure_threshold,
            ..Default::default()
        };

        match resolved.action {
            ProbeAction::HttpGet {
                host,
                path,
                port,
                scheme,
            } => {
                probe.http_get = Some(HTTPGetAction {
                    // An empty host makes the kubelet target the pod IP
                    host: Some(host).filter(|h| !h.is_empty()),
                    http_headers: None,
                    path: Some(if path.is_empty() { "/".to_string() } else { path }),
                    port: IntOrString::Int(port),
                    // Kubernetes only accepts the upper-case enum values
                    scheme: Some(scheme.to_ascii_uppercase()),
                });
            }
            ProbeAction::TcpSocket { host, port } => {
                probe.tcp_socket = Some(TCPSocketAction { host, port });
            }
            ProbeAction::Exec { command } => {
                probe.exec = Some(ExecAction {
                    command: Some(command),
                });
            }
        }

        probe
    }
}

/// Turns a [`ProbeConfig`] into at most one probe action.
///
/// Precedence is fixed: a URL decides the probe on its own (HTTP GET, or
/// TCP when the URL uses `tcp://`), then a bare TCP port, then an exec
/// command. Exactly one action is ever produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeResolver;

impl ProbeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `config`, returning `Ok(None)` when no probe should be generated
    pub fn resolve(&self, config: Option<&ProbeConfig>) -> Result<Option<ResolvedProbe>> {
        let Some(config) = config else {
            return Ok(None);
        };

        let tcp_port = non_blank(config.tcp_port.as_deref());

        let action = if let Some(url) = non_blank(config.get_url.as_deref()) {
            resolve_url(url, tcp_port)?
        } else if let Some(port) = tcp_port {
            Some(ProbeAction::TcpSocket {
                host: None,
                port: parse_port(port),
            })
        } else {
            exec_action(config.exec.as_deref())
        };

        Ok(action.map(|action| ResolvedProbe::new(action, config)))
    }

    /// Resolve `config` straight into a Kubernetes [`Probe`]
    pub fn resolve_probe(&self, config: Option<&ProbeConfig>) -> Result<Option<Probe>> {
        Ok(self.resolve(config)?.map(Probe::from))
    }
}

/// Shorthand for `ProbeResolver::new().resolve(config)`
pub fn resolve(config: Option<&ProbeConfig>) -> Result<Option<ResolvedProbe>> {
    ProbeResolver::new().resolve(config)
}

fn resolve_url(raw: &str, tcp_port: Option<&str>) -> Result<Option<ProbeAction>> {
    if is_http_like(raw) {
        return http_get_action(raw).map(Some);
    }

    // Anything that is not HTTP needs an explicit port to become a TCP check
    let Some(port) = tcp_port else {
        debug!(url = %raw, "Probe URL is not HTTP and no tcpPort is set, skipping probe");
        return Ok(None);
    };

    match scheme_of(raw) {
        Some(scheme) if scheme.eq_ignore_ascii_case("tcp") => {
            let url = ProbeUrl::parse(raw)
                .ok_or_else(|| KubeprobeError::invalid_probe_url(raw, CheckKind::Tcp))?;
            Ok(Some(ProbeAction::TcpSocket {
                host: Some(url.host).filter(|h| !h.is_empty()),
                port: parse_port(port),
            }))
        }
        Some(scheme) => {
            debug!(url = %raw, scheme, "Unsupported probe URL scheme, skipping probe");
            Ok(None)
        }
        None => Err(KubeprobeError::invalid_probe_url(raw, CheckKind::Tcp)),
    }
}

fn http_get_action(raw: &str) -> Result<ProbeAction> {
    let invalid = || KubeprobeError::invalid_probe_url(raw, CheckKind::Http);

    let url = ProbeUrl::parse(raw)
        .filter(ProbeUrl::is_http)
        .ok_or_else(invalid)?;
    let port = url.port.ok_or_else(invalid)?;

    Ok(ProbeAction::HttpGet {
        host: url.host,
        path: url.path,
        port: i32::from(port),
        scheme: url.scheme,
    })
}

fn exec_action(exec: Option<&str>) -> Option<ProbeAction> {
    let command: Vec<String> = non_blank(exec)?
        .split_whitespace()
        .map(str::to_string)
        .collect();
    Some(ProbeAction::Exec { command })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
