//! The pipeline orchestrator.
//!
//! Strictly linear control flow: select platform ops, acquire the SDK,
//! install the toolchain, resolve dependencies, build each configuration,
//! verify, package. No stage starts before its predecessor finishes, no
//! stage is retried, and the first unrecoverable failure aborts the run.

use std::path::Path;

use anyhow::Result;

use crate::config::RunConfig;
use crate::platform::PlatformDescriptor;
use crate::stages::build::BuildRunner;
use crate::stages::{package, platform_ops, toolchain};

/// vcpkg manifest location in the project root.
const MANIFEST_PATH: &str = "vcpkg.json";

/// Run the whole pipeline for one invocation.
pub fn run(platform: &PlatformDescriptor, config: &RunConfig) -> Result<()> {
    log_environment(platform, config);

    let ops = platform_ops(platform)?;

    let sdk_home = ops.acquire_sdk()?;
    tracing::info!("FBX SDK home: {}", sdk_home.display());

    let toolchain = toolchain::clone_vcpkg()?;
    ops.install_toolchain(&toolchain)?;

    ops.resolve_dependencies(&toolchain, Path::new(MANIFEST_PATH))?;

    BuildRunner::new(platform, config, &toolchain, &sdk_home)?.run_all()?;

    package::package(config)
}

fn log_environment(platform: &PlatformDescriptor, config: &RunConfig) {
    let cwd = std::env::current_dir().unwrap_or_default();
    tracing::info!(
        os = %platform.os,
        is_64bit = platform.is_64bit,
        cwd = %cwd.display(),
        artifact_path = ?config.artifact_path,
        include_debug = config.include_debug,
        version = ?config.version,
        "starting build pipeline"
    );
}
