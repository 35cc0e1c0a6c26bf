use crate::{KubeprobeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-supplied health check configuration.
///
/// No cross-field validation happens here; conflicting or malformed
/// settings are only detected when the config is resolved into a probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_threshold: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<i32>,
    /// URL for an HTTP GET check, or `tcp://host` for a TCP check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_url: Option<String>,
    /// Command line for an exec check, split on whitespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,
    /// Port for a TCP check, numeric or named
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_port: Option<String>,
}

impl ProbeConfig {
    /// Config for an HTTP GET (or `tcp://`) URL
    pub fn get_url(url: impl Into<String>) -> Self {
        Self {
            get_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Config for an exec command line
    pub fn exec(command: impl Into<String>) -> Self {
        Self {
            exec: Some(command.into()),
            ..Default::default()
        }
    }

    /// Config for a TCP port
    pub fn tcp_port(port: impl Into<String>) -> Self {
        Self {
            tcp_port: Some(port.into()),
            ..Default::default()
        }
    }

    /// Set initial delay and timeout in one go
    pub fn with_timing(mut self, initial_delay_seconds: i32, timeout_seconds: i32) -> Self {
        self.initial_delay_seconds = Some(initial_delay_seconds);
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Overlay every field set in `other` on top of this config
    pub fn merge(mut self, other: ProbeConfig) -> Self {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        overlay!(
            initial_delay_seconds,
            timeout_seconds,
            period_seconds,
            success_threshold,
            failure_threshold,
            get_url,
            exec,
            tcp_port
        );
        self
    }

    /// Load a config from a YAML or JSON file (chosen by extension, YAML by default)
    pub fn load(path: &Path) -> Result<Self> {
        load_document(path)
    }
}

/// Read and deserialize a YAML/JSON document from disk
pub(crate) fn load_document<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data =
        std::fs::read_to_string(path).map_err(|e| KubeprobeError::config_read(path, e))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => crate::from_json(&data),
        _ => crate::from_yaml(&data),
    }
}
