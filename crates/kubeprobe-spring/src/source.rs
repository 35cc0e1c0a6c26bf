use crate::yaml::properties_from_yaml;
use crate::{Properties, Result, SpringError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APPLICATION_YML: &str = "application.yml";
pub const APPLICATION_PROPERTIES: &str = "application.properties";

/// Reads the Spring Boot application configuration from resource directories.
///
/// Directories are searched in order and the first one containing a file
/// wins, mirroring a classpath lookup.
#[derive(Debug, Clone, Default)]
pub struct SpringBootConfigSource {
    resource_dirs: Vec<PathBuf>,
}

impl SpringBootConfigSource {
    pub fn new(resource_dirs: Vec<PathBuf>) -> Self {
        Self { resource_dirs }
    }

    /// Locate a resource by name
    pub fn find_resource(&self, name: &str) -> Option<PathBuf> {
        self.resource_dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Load `application.yml` and `application.properties`, the latter
    /// taking precedence. Missing files contribute nothing.
    pub fn application_properties(&self, active_profile: Option<&str>) -> Result<Properties> {
        let mut props = match self.find_resource(APPLICATION_YML) {
            Some(path) => load_yaml(&path, active_profile)?,
            None => Properties::new(),
        };

        if let Some(path) = self.find_resource(APPLICATION_PROPERTIES) {
            props.merge(load_properties(&path)?);
        }

        info!(
            entries = props.len(),
            profile = active_profile.unwrap_or("default"),
            "Loaded Spring Boot application properties"
        );
        Ok(props)
    }
}

/// Load a flattened `application.yml`
pub fn load_yaml(path: &Path, active_profile: Option<&str>) -> Result<Properties> {
    debug!(path = %path.display(), "Reading YAML configuration");
    let content = read(path)?;
    properties_from_yaml(&content, active_profile).map_err(|e| SpringError::InvalidYaml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a `.properties` file
pub fn load_properties(path: &Path) -> Result<Properties> {
    debug!(path = %path.display(), "Reading properties configuration");
    let content = read(path)?;
    Properties::parse(&content).map_err(|e| SpringError::InvalidProperties {
        path: path.to_path_buf(),
        line: e.line,
        message: e.message,
    })
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SpringError::ResourceRead {
        path: path.to_path_buf(),
        source,
    })
}
