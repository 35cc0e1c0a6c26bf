//! Kubeprobe Core - Derive Kubernetes container probes from health check settings
//!
//! This crate provides:
//! - The `ProbeConfig` input model and its YAML/JSON loading
//! - A resolver turning a config into exactly one HTTP GET, TCP or exec probe
//! - Wiring of resolved probes into `k8s-openapi` containers
//! - Error types with miette diagnostics
//! - Serialization helpers

pub mod config;
pub mod error;
pub mod health;
pub mod port;
pub mod resolver;
pub mod url;

// Re-export commonly used types
pub use config::ProbeConfig;
pub use error::{CheckKind, KubeprobeError, Result};
pub use health::{HealthCheckConfig, ProbeKind, ResolvedHealthChecks};
pub use resolver::{resolve, ProbeAction, ProbeResolver, ResolvedProbe};

// Re-export k8s-openapi types for convenience
pub use k8s_openapi;
pub use k8s_openapi::api::core::v1::{Container, Probe};
pub use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Serialize a value to JSON
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(serialization_failure("serialize to JSON"))
}

/// Serialize a value to pretty JSON
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(serialization_failure("serialize to JSON"))
}

/// Deserialize a value from JSON
pub fn from_json<T: for<'de> serde::Deserialize<'de>>(data: &str) -> Result<T> {
    serde_json::from_str(data).map_err(serialization_failure("deserialize from JSON"))
}

/// Serialize a value to YAML
pub fn to_yaml<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(serialization_failure("serialize to YAML"))
}

/// Deserialize a value from YAML
pub fn from_yaml<T: for<'de> serde::Deserialize<'de>>(data: &str) -> Result<T> {
    serde_yaml::from_str(data).map_err(serialization_failure("deserialize from YAML"))
}

fn serialization_failure<E>(action: &'static str) -> impl FnOnce(E) -> KubeprobeError
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |e| {
        let message = format!("Failed to {}: {}", action, e);
        KubeprobeError::serialization_error(message, Some(Box::new(e)))
    }
}
