use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the optional project file read from the Dockerfile's directory.
pub const CONFIG_FILE_NAME: &str = "kubefy.toml";

/// Kubernetes Service exposure type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ServiceType {
    #[default]
    ClusterIP,
    NodePort,
    LoadBalancer,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClusterIP => "ClusterIP",
            Self::NodePort => "NodePort",
            Self::LoadBalancer => "LoadBalancer",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "clusterip" => Ok(Self::ClusterIP),
            "nodeport" => Ok(Self::NodePort),
            "loadbalancer" => Ok(Self::LoadBalancer),
            _ => Err(crate::Error::InvalidServiceType(s.to_owned())),
        }
    }
}

impl TryFrom<String> for ServiceType {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        value.parse()
    }
}

/// Everything the synthesizer needs besides the container description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    pub name: String,
    pub namespace: String,
    pub replicas: u32,
    pub service_type: ServiceType,
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

impl RunConfiguration {
    /// A configuration with the built-in defaults for everything but the name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: default_namespace(),
            replicas: default_replicas(),
            service_type: ServiceType::default(),
            output_dir: default_output_dir(),
            dry_run: false,
        }
    }

    /// Checks every field; see [`crate::validate`].
    pub fn validate(&self) -> crate::Result<()> {
        crate::validate::validate_name(&self.name)?;
        crate::validate::validate_namespace(&self.namespace)?;
        crate::validate::validate_replicas(self.replicas)?;
        crate::validate::validate_output_dir(&self.output_dir, !self.dry_run)?;
        Ok(())
    }
}

/// kubefy.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KubefyConfig {
    #[serde(default)]
    pub deployment: DeploymentSettings,
}

/// Per-run settings that may come from flags or from kubefy.toml.
///
/// Every field is optional so that the two sources can be layered with
/// [`DeploymentSettings::or`] before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentSettings {
    /// Resource name (DNS-1123 label)
    pub name: Option<String>,
    /// Target namespace (defaults to "default")
    pub namespace: Option<String>,
    /// Replica count (defaults to 1)
    pub replicas: Option<u32>,
    /// Service type (defaults to ClusterIP)
    pub service_type: Option<ServiceType>,
    /// Output directory (defaults to ".")
    pub output: Option<PathBuf>,
}

impl DeploymentSettings {
    /// Field-wise precedence: values in `self` win over `fallback`.
    pub fn or(self, fallback: DeploymentSettings) -> DeploymentSettings {
        DeploymentSettings {
            name: self.name.or(fallback.name),
            namespace: self.namespace.or(fallback.namespace),
            replicas: self.replicas.or(fallback.replicas),
            service_type: self.service_type.or(fallback.service_type),
            output: self.output.or(fallback.output),
        }
    }

    /// Applies built-in defaults. Fails only when no name was given anywhere;
    /// the remaining checks happen in [`RunConfiguration::validate`].
    pub fn into_run_configuration(self, dry_run: bool) -> crate::Result<RunConfiguration> {
        let name = self.name.ok_or(crate::Error::MissingName)?;
        Ok(RunConfiguration {
            name,
            namespace: self.namespace.unwrap_or_else(default_namespace),
            replicas: self.replicas.unwrap_or_else(default_replicas),
            service_type: self.service_type.unwrap_or_default(),
            output_dir: self.output.unwrap_or_else(default_output_dir),
            dry_run,
        })
    }
}

impl KubefyConfig {
    /// Load from kubefy.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &Path) -> crate::Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %config_path.display(), "loading project config");
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_namespace() -> String {
    "default".to_owned()
}

fn default_replicas() -> u32 {
    1
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
