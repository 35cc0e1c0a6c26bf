//! Kubeprobe Spring - Spring Boot configuration as a source of probe settings
//!
//! Reads `application.yml` / `application.properties` from resource
//! directories, looks up Spring Boot metadata in the project model and
//! derives actuator health probes.

// Allow unused assignments for diagnostic fields - they're used by the thiserror/miette macros
#![allow(unused_assignments)]

pub mod error;
pub mod health;
pub mod project;
pub mod properties;
pub mod source;
pub mod yaml;

pub use error::{Result, SpringError};
pub use health::SpringBootHealthCheck;
pub use project::{
    spring_boot_active_profile, spring_boot_devtools_version, spring_boot_version, Dependency,
    ProjectDescriptor, ProjectModel,
};
pub use properties::{ParseError, Properties};
pub use source::SpringBootConfigSource;
