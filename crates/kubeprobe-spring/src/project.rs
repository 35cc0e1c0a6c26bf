use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const SPRING_BOOT_GROUP_ID: &str = "org.springframework.boot";
pub const SPRING_BOOT_ARTIFACT_ID: &str = "spring-boot";
pub const SPRING_PROFILES_ACTIVE: &str = "spring.profiles.active";

/// Read access to the build's project metadata
pub trait ProjectModel {
    /// A project property
    fn property(&self, key: &str) -> Option<&str>;

    /// The declared version of a dependency
    fn dependency_version(&self, group_id: &str, artifact_id: &str) -> Option<&str>;
}

/// A dependency coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Project metadata loaded from a YAML or JSON descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl ProjectDescriptor {
    pub fn load(path: &Path) -> crate::Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| {
            crate::SpringError::ResourceRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let descriptor = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => kubeprobe_core::from_json(&data)?,
            _ => kubeprobe_core::from_yaml(&data)?,
        };
        Ok(descriptor)
    }
}

impl ProjectModel for ProjectDescriptor {
    fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    fn dependency_version(&self, group_id: &str, artifact_id: &str) -> Option<&str> {
        self.dependencies
            .iter()
            .find(|dep| dep.group_id == group_id && dep.artifact_id == artifact_id)
            .and_then(|dep| dep.version.as_deref())
    }
}

/// The Spring Boot version the project depends on
pub fn spring_boot_version(project: &impl ProjectModel) -> Option<&str> {
    project.dependency_version(SPRING_BOOT_GROUP_ID, SPRING_BOOT_ARTIFACT_ID)
}

/// The devtools version, which always tracks the Spring Boot version
pub fn spring_boot_devtools_version(project: &impl ProjectModel) -> Option<&str> {
    spring_boot_version(project)
}

/// The profile set through the `spring.profiles.active` project property
pub fn spring_boot_active_profile(project: Option<&impl ProjectModel>) -> Option<&str> {
    project?.property(SPRING_PROFILES_ACTIVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectDescriptor {
        ProjectDescriptor {
            properties: BTreeMap::from([(
                SPRING_PROFILES_ACTIVE.to_string(),
                "prod".to_string(),
            )]),
            dependencies: vec![
                Dependency {
                    group_id: "org.springframework.boot".to_string(),
                    artifact_id: "spring-boot-starter-web".to_string(),
                    version: Some("3.2.0".to_string()),
                },
                Dependency {
                    group_id: SPRING_BOOT_GROUP_ID.to_string(),
                    artifact_id: SPRING_BOOT_ARTIFACT_ID.to_string(),
                    version: Some("3.2.1".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_spring_boot_version() {
        let project = project();
        assert_eq!(spring_boot_version(&project), Some("3.2.1"));
        assert_eq!(spring_boot_devtools_version(&project), Some("3.2.1"));
        assert_eq!(spring_boot_version(&ProjectDescriptor::default()), None);
    }

    #[test]
    fn test_active_profile() {
        let project = project();
        assert_eq!(spring_boot_active_profile(Some(&project)), Some("prod"));
        assert_eq!(
            spring_boot_active_profile(Some(&ProjectDescriptor::default())),
            None
        );
        assert_eq!(spring_boot_active_profile(None::<&ProjectDescriptor>), None);
    }

    #[test]
    fn test_load_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.yaml");
        std::fs::write(
            &path,
            "properties:\n  spring.profiles.active: dev\ndependencies:\n  - groupId: org.springframework.boot\n    artifactId: spring-boot\n    version: 2.7.18\n",
        )
        .unwrap();

        let project = ProjectDescriptor::load(&path).unwrap();
        assert_eq!(spring_boot_version(&project), Some("2.7.18"));
        assert_eq!(spring_boot_active_profile(Some(&project)), Some("dev"));
    }

    #[test]
    fn test_load_invalid_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        std::fs::write(&path, "{\"dependencies\": 3}").unwrap();
        assert!(matches!(
            ProjectDescriptor::load(&path).unwrap_err(),
            crate::SpringError::CoreError(_)
        ));
    }
}
