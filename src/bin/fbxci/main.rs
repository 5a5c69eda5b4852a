//! fbxci - one-shot CI build of fbx-gltf-conv

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fbxci::{pipeline, PipelineError, PlatformDescriptor, RunConfig};

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        let status = e
            .downcast_ref::<PipelineError>()
            .map(PipelineError::exit_status)
            .unwrap_or(1);
        std::process::exit(status);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("fbxci=debug")
    } else {
        EnvFilter::new("fbxci=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let platform = PlatformDescriptor::probe();
    let config = RunConfig::new(cli.artifact_path, cli.include_debug, cli.version);

    pipeline::run(&platform, &config)
}
