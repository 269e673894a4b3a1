mod generate;

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "kubefy",
    about = "Generate Kubernetes Deployment and Service manifests from a Dockerfile"
)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    generate: generate::GenerateArgs,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match generate::generate(cli.generate) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Logs go to stderr so that dry-run output on stdout stays pure YAML.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

/// 1 parse/unsupported, 2 validation, 3 filesystem.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<kubefy_core::Error>() {
        return e.exit_code();
    }
    if let Some(e) = err.downcast_ref::<kubefy_manifest::ManifestError>() {
        return e.exit_code();
    }
    1
}
