use crate::config::load_document;
use crate::{ProbeConfig, ProbeResolver, Result};
use k8s_openapi::api::core::v1::{Container, Probe};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Which container probe slot a config targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    Startup,
    Liveness,
    Readiness,
}

impl ProbeKind {
    /// Name used in logs and diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeKind::Startup => "startup",
            ProbeKind::Liveness => "liveness",
            ProbeKind::Readiness => "readiness",
        }
    }
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe configs for every slot of a container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness: Option<ProbeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness: Option<ProbeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup: Option<ProbeConfig>,
}

/// Kubernetes probes resolved from a [`HealthCheckConfig`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedHealthChecks {
    pub liveness: Option<Probe>,
    pub readiness: Option<Probe>,
    pub startup: Option<Probe>,
}

impl HealthCheckConfig {
    /// Load from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        load_document(path)
    }

    /// The config for `kind`, if any
    pub fn get(&self, kind: ProbeKind) -> Option<&ProbeConfig> {
        match kind {
            ProbeKind::Startup => self.startup.as_ref(),
            ProbeKind::Liveness => self.liveness.as_ref(),
            ProbeKind::Readiness => self.readiness.as_ref(),
        }
    }

    /// Resolve every configured probe. The first invalid one aborts.
    pub fn resolve(&self) -> Result<ResolvedHealthChecks> {
        let resolver = ProbeResolver::new();
        let mut resolved = ResolvedHealthChecks::default();

        for kind in [ProbeKind::Startup, ProbeKind::Liveness, ProbeKind::Readiness] {
            let probe = resolver.resolve_probe(self.get(kind))?;
            match &probe {
                Some(_) => debug!(%kind, "Resolved probe"),
                None if self.get(kind).is_some() => {
                    info!(%kind, "Probe configured but no check could be derived, skipping")
                }
                None => {}
            }
            *resolved.slot_mut(kind) = probe;
        }

        Ok(resolved)
    }

    /// Resolve and install the probes on `container`
    pub fn apply_to(&self, container: &mut Container) -> Result<()> {
        self.resolve()?.apply_to(container);
        Ok(())
    }
}

impl ResolvedHealthChecks {
    fn slot_mut(&mut self, kind: ProbeKind) -> &mut Option<Probe> {
        match kind {
            ProbeKind::Startup => &mut self.startup,
            ProbeKind::Liveness => &mut self.liveness,
            ProbeKind::Readiness => &mut self.readiness,
        }
    }

    /// Whether no probe was produced at all
    pub fn is_empty(&self) -> bool {
        self.liveness.is_none() && self.readiness.is_none() && self.startup.is_none()
    }

    /// Set the container's probe fields; slots without a probe are left untouched
    pub fn apply_to(self, container: &mut Container) {
        if let Some(probe) = self.liveness {
            container.liveness_probe = Some(probe);
        }
        if let Some(probe) = self.readiness {
            container.readiness_probe = Some(probe);
        }
        if let Some(probe) = self.startup {
            container.startup_probe = Some(probe);
        }
    }
}
