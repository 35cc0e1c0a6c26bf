use clap::{Parser, Subcommand, ValueEnum};
use kubeprobe_core::{Container, Probe, ProbeConfig, ProbeResolver};
use kubeprobe_spring::{
    spring_boot_active_profile, spring_boot_version, ProjectDescriptor, SpringBootConfigSource,
    SpringBootHealthCheck,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "kubeprobe", about = "Generate Kubernetes probes from health check settings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single probe configuration
    Resolve {
        /// YAML or JSON file holding a probe configuration
        #[arg(long, env = "KUBEPROBE_CONFIG")]
        config: Option<PathBuf>,
        /// URL for an HTTP GET check, or tcp://host for a TCP check
        #[arg(long, env = "KUBEPROBE_GET_URL")]
        get_url: Option<String>,
        /// Port for a TCP check, numeric or named
        #[arg(long, env = "KUBEPROBE_TCP_PORT")]
        tcp_port: Option<String>,
        /// Command line for an exec check
        #[arg(long, env = "KUBEPROBE_EXEC")]
        exec: Option<String>,
        /// Seconds before the first check
        #[arg(long, allow_hyphen_values = true)]
        initial_delay_seconds: Option<i32>,
        /// Seconds after which a check times out
        #[arg(long, allow_hyphen_values = true)]
        timeout_seconds: Option<i32>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Derive liveness and readiness probes from a Spring Boot application
    SpringBoot {
        /// Resource directories searched for application.yml/properties, in order
        #[arg(long = "resources", required = true)]
        resource_dirs: Vec<PathBuf>,
        /// Active Spring profile (defaults to the project's spring.profiles.active)
        #[arg(long, env = "SPRING_PROFILES_ACTIVE")]
        profile: Option<String>,
        /// YAML or JSON project descriptor
        #[arg(long)]
        project: Option<PathBuf>,
        /// Name of the generated container fragment
        #[arg(long, default_value = "app")]
        container_name: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let rendered = match cli.command {
        Commands::Resolve {
            config,
            get_url,
            tcp_port,
            exec,
            initial_delay_seconds,
            timeout_seconds,
            format,
        } => {
            let flags = ProbeConfig {
                initial_delay_seconds,
                timeout_seconds,
                get_url,
                exec,
                tcp_port,
                ..Default::default()
            };
            match resolve_command(config, flags)? {
                Some(probe) => Some(render(&probe, format)?),
                None => {
                    info!("No probe generated for the given configuration");
                    None
                }
            }
        }
        Commands::SpringBoot {
            resource_dirs,
            profile,
            project,
            container_name,
            format,
        } => {
            let container = spring_boot_container(resource_dirs, profile, project, container_name)?;
            Some(render(&container, format)?)
        }
    };

    if let Some(rendered) = rendered {
        println!("{}", rendered.trim_end());
    }
    Ok(())
}

/// Resolve one probe; flags override values from the config file
fn resolve_command(config: Option<PathBuf>, flags: ProbeConfig) -> miette::Result<Option<Probe>> {
    let base = match config {
        Some(path) => {
            info!("Loading probe configuration from {}", path.display());
            ProbeConfig::load(&path)?
        }
        None => ProbeConfig::default(),
    };
    let config = base.merge(flags);

    Ok(ProbeResolver::new().resolve_probe(Some(&config))?)
}

/// Derive actuator probes from Spring Boot configuration
fn spring_boot_container(
    resource_dirs: Vec<PathBuf>,
    profile: Option<String>,
    project: Option<PathBuf>,
    container_name: String,
) -> miette::Result<Container> {
    let project = project
        .map(|path| ProjectDescriptor::load(&path))
        .transpose()?;

    if let Some(version) = project.as_ref().and_then(|p| spring_boot_version(p)) {
        info!("Detected Spring Boot {}", version);
    }

    let profile = profile.or_else(|| spring_boot_active_profile(project.as_ref()).map(str::to_string));

    let source = SpringBootConfigSource::new(resource_dirs);
    let props = source.application_properties(profile.as_deref())?;

    let health = SpringBootHealthCheck::new().health_checks(&props);
    let mut container = Container {
        name: container_name,
        ..Default::default()
    };
    health.apply_to(&mut container)?;

    Ok(container)
}

fn render<T: Serialize>(value: &T, format: Format) -> miette::Result<String> {
    let rendered = match format {
        Format::Yaml => kubeprobe_core::to_yaml(value)?,
        Format::Json => kubeprobe_core::to_json_pretty(value)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use kubeprobe_core::IntOrString;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_flags() {
        let cli = Cli::try_parse_from([
            "kubeprobe",
            "resolve",
            "--get-url",
            "tcp://db:5432",
            "--tcp-port",
            "5432",
            "--timeout-seconds",
            "3",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve {
                get_url,
                tcp_port,
                timeout_seconds,
                format,
                ..
            } => {
                assert_eq!(get_url.as_deref(), Some("tcp://db:5432"));
                assert_eq!(tcp_port.as_deref(), Some("5432"));
                assert_eq!(timeout_seconds, Some(3));
                assert!(matches!(format, Format::Json));
            }
            _ => panic!("expected resolve command"),
        }
    }

    #[test]
    fn test_resolve_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.yaml");
        std::fs::write(
            &path,
            "exec: cat /tmp/probe\ninitialDelaySeconds: 5\ntimeoutSeconds: 7\n",
        )
        .unwrap();

        let flags = ProbeConfig {
            timeout_seconds: Some(2),
            ..Default::default()
        };
        let probe = resolve_command(Some(path), flags).unwrap().unwrap();
        assert_eq!(probe.timeout_seconds, Some(2));
        assert_eq!(probe.initial_delay_seconds, Some(5));
        assert_eq!(
            probe.exec.unwrap().command,
            Some(vec!["cat".to_string(), "/tmp/probe".to_string()])
        );
    }

    #[test]
    fn test_resolve_without_settings_yields_nothing() {
        assert_eq!(resolve_command(None, ProbeConfig::default()).unwrap(), None);
    }

    #[test]
    fn test_resolve_invalid_url_fails() {
        let flags = ProbeConfig::get_url("httphealthcheck.com:8080/healthz");
        let err = resolve_command(None, flags).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid URL httphealthcheck.com:8080/healthz given for HTTP GET readiness check"
        );
    }

    #[test]
    fn test_render_json() {
        let probe = resolve_command(None, ProbeConfig::tcp_port("5432"))
            .unwrap()
            .unwrap();
        let rendered = render(&probe, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["tcpSocket"]["port"], 5432);
    }

    #[test]
    fn test_spring_boot_requires_resources() {
        assert!(Cli::try_parse_from(["kubeprobe", "spring-boot"]).is_err());
    }

    #[test]
    fn test_spring_boot_container() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("application.properties"), "server.port=8081\n").unwrap();

        let container =
            spring_boot_container(vec![dir.path().to_path_buf()], None, None, "web".to_string())
                .unwrap();
        assert_eq!(container.name, "web");

        let liveness = container.liveness_probe.as_ref().unwrap().http_get.as_ref().unwrap();
        assert_eq!(liveness.port, IntOrString::Int(8081));
        assert!(liveness.host.is_none());

        let readiness = container.readiness_probe.as_ref().unwrap();
        assert_eq!(
            readiness.http_get.as_ref().unwrap().path.as_deref(),
            Some("/health")
        );
        assert_eq!(readiness.initial_delay_seconds, Some(10));
        assert!(container.startup_probe.is_none());

        let yaml = render(&container, Format::Yaml).unwrap();
        assert!(yaml.contains("livenessProbe"));
        assert!(yaml.contains("readinessProbe"));
    }
}
