// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The kind of check a probe URL was being evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Http,
    Tcp,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Http => write!(f, "HTTP GET"),
            CheckKind::Tcp => write!(f, "TCP"),
        }
    }
}

/// Core error type for kubeprobe operations
#[derive(Error, Debug, Diagnostic)]
pub enum KubeprobeError {
    /// The configured probe URL could not be used for the intended check
    #[error("Invalid URL {url} given for {check} readiness check")]
    #[diagnostic(
        code(kubeprobe::invalid_probe_url),
        help("HTTP checks need a URL like 'http://host:8080/healthz'; TCP checks need 'tcp://host' together with a tcpPort")
    )]
    InvalidProbeUrl {
        #[allow(unused)]
        url: String,
        #[allow(unused)]
        check: CheckKind,
    },

    /// Configuration file could not be read
    #[error("Failed to read configuration from {}", .path.display())]
    #[diagnostic(
        code(kubeprobe::config_read_failed),
        help("Check that the file exists and is readable")
    )]
    ConfigRead {
        #[allow(unused)]
        path: PathBuf,
        #[source]
        #[allow(unused)]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(
        code(kubeprobe::serialization_error),
        help("Ensure the document is valid JSON or YAML and uses camelCase probe fields")
    )]
    SerializationError {
        #[allow(unused)]
        message: String,
        #[source]
        #[allow(unused)]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for kubeprobe operations
pub type Result<T> = std::result::Result<T, KubeprobeError>;

impl KubeprobeError {
    /// Create an InvalidProbeUrl error
    pub fn invalid_probe_url(url: impl Into<String>, check: CheckKind) -> Self {
        Self::InvalidProbeUrl {
            url: url.into(),
            check,
        }
    }

    /// Create a ConfigRead error
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create a SerializationError
    pub fn serialization_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_messages() {
        let err = KubeprobeError::invalid_probe_url(
            "httphealthcheck.com:8080/healthz",
            CheckKind::Http,
        );
        assert_eq!(
            err.to_string(),
            "Invalid URL httphealthcheck.com:8080/healthz given for HTTP GET readiness check"
        );

        let err = KubeprobeError::invalid_probe_url("healthcheck.com:8080/healthz", CheckKind::Tcp);
        assert_eq!(
            err.to_string(),
            "Invalid URL healthcheck.com:8080/healthz given for TCP readiness check"
        );
    }

    #[test]
    fn test_error_creation() {
        let err = KubeprobeError::config_read(
            "probe.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, KubeprobeError::ConfigRead { .. }));
        assert!(err.to_string().contains("probe.yaml"));
    }
}
