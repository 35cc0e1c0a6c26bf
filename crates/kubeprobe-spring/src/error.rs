use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading Spring Boot configuration
#[derive(Error, Debug, Diagnostic)]
pub enum SpringError {
    /// A resource file exists but could not be read
    #[error("Error while reading resource {}", .path.display())]
    #[diagnostic(
        code(kubeprobe::spring::resource_read),
        help("Check the file permissions of the resource directory")
    )]
    ResourceRead {
        #[allow(unused)]
        path: PathBuf,
        #[source]
        #[allow(unused)]
        source: std::io::Error,
    },

    /// application.yml is not valid YAML
    #[error("Invalid YAML in {}: {message}", .path.display())]
    #[diagnostic(
        code(kubeprobe::spring::invalid_yaml),
        help("Validate the file with a YAML linter; multiple documents must be separated by '---'")
    )]
    InvalidYaml {
        #[allow(unused)]
        path: PathBuf,
        #[allow(unused)]
        message: String,
    },

    /// application.properties contains a malformed escape
    #[error("Invalid properties in {} at line {line}: {message}", .path.display())]
    #[diagnostic(
        code(kubeprobe::spring::invalid_properties),
        help("Unicode escapes must have the form \\uXXXX with four hex digits")
    )]
    InvalidProperties {
        #[allow(unused)]
        path: PathBuf,
        #[allow(unused)]
        line: usize,
        #[allow(unused)]
        message: String,
    },

    /// Core library error
    #[error(transparent)]
    #[diagnostic(transparent)]
    CoreError(#[from] kubeprobe_core::KubeprobeError),
}

/// Result type alias for Spring Boot configuration operations
pub type Result<T> = std::result::Result<T, SpringError>;
