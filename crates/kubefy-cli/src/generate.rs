use std::path::{Path, PathBuf};

use kubefy_core::{DeploymentSettings, KubefyConfig, ServiceType};
use kubefy_dockerfile::{ContainerDescription, Dockerfile};
use kubefy_manifest::{synthesize, write_manifests};

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to the Dockerfile
    #[arg(default_value = "Dockerfile")]
    dockerfile: PathBuf,

    /// Application name (required; lowercase DNS label)
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Kubernetes namespace [default: default]
    #[arg(long)]
    namespace: Option<String>,

    /// Number of replicas [default: 1]
    #[arg(long, short = 'r')]
    replicas: Option<u32>,

    /// Output directory [default: .]
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Service type: ClusterIP, NodePort, or LoadBalancer [default: ClusterIP]
    #[arg(long)]
    service_type: Option<String>,

    /// Preview without writing: print manifests to stdout
    #[arg(long)]
    dry_run: bool,
}

/// Run the whole pipeline: config → parse → normalize → synthesize → output.
///
/// Every check happens before the first byte is written.
pub fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let project_dir = args
        .dockerfile
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_config = KubefyConfig::load(project_dir)?;

    let service_type = args
        .service_type
        .as_deref()
        .map(str::parse::<ServiceType>)
        .transpose()?;

    let flags = DeploymentSettings {
        name: args.name,
        namespace: args.namespace,
        replicas: args.replicas,
        service_type,
        output: args.output,
    };
    let config = flags
        .or(file_config.deployment)
        .into_run_configuration(args.dry_run)?;
    config.validate()?;

    let dockerfile = Dockerfile::from_file(&args.dockerfile)?;
    let container = ContainerDescription::from_dockerfile(&dockerfile);
    let manifests = synthesize(&container, &config)?;

    if config.dry_run {
        print!("{}", manifests.to_documents()?);
        return Ok(());
    }

    for path in write_manifests(&manifests, &config.output_dir)? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
