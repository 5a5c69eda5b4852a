//! Pipeline stages and the per-platform capability seam.
//!
//! The three stages whose procedure differs by platform family (toolchain
//! bootstrap, SDK acquisition, dependency resolution) sit behind one trait
//! with an implementation per recognized family. The implementation is
//! selected exactly once from the `PlatformDescriptor`; that selection is
//! the single place an unrecognized platform becomes a fatal error, so no
//! stage re-branches or re-detects.

pub mod build;
pub mod deps;
pub mod package;
pub mod sdk;
pub mod toolchain;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::PipelineError;
use crate::platform::{OsFamily, PlatformDescriptor};
use crate::stages::toolchain::Toolchain;

/// Platform-conditional stage procedures.
pub trait PlatformOps: std::fmt::Debug {
    /// Bootstrap the cloned vcpkg checkout into a runnable toolchain.
    fn install_toolchain(&self, toolchain: &Toolchain) -> Result<()>;

    /// Download and install the FBX SDK, returning its home path.
    fn acquire_sdk(&self) -> Result<PathBuf>;

    /// Install all native dependencies declared in `manifest_path`.
    fn resolve_dependencies(&self, toolchain: &Toolchain, manifest_path: &Path) -> Result<()>;
}

/// Select the capability implementation for the probed platform. The only
/// `UnsupportedPlatform` site in the pipeline.
pub fn platform_ops(platform: &PlatformDescriptor) -> Result<Box<dyn PlatformOps>> {
    match &platform.os {
        OsFamily::Windows => Ok(Box::new(WindowsOps)),
        OsFamily::MacOs => Ok(Box::new(MacOsOps)),
        OsFamily::Linux => Ok(Box::new(LinuxOps)),
        OsFamily::Other(name) => Err(PipelineError::UnsupportedPlatform {
            os: name.clone(),
        }
        .into()),
    }
}

#[derive(Debug)]
struct WindowsOps;

impl PlatformOps for WindowsOps {
    fn install_toolchain(&self, toolchain: &Toolchain) -> Result<()> {
        toolchain::bootstrap_windows(toolchain)
    }

    fn acquire_sdk(&self) -> Result<PathBuf> {
        sdk::install_windows()
    }

    fn resolve_dependencies(&self, toolchain: &Toolchain, _manifest_path: &Path) -> Result<()> {
        deps::install_all(toolchain)
    }
}

#[derive(Debug)]
struct MacOsOps;

impl PlatformOps for MacOsOps {
    fn install_toolchain(&self, toolchain: &Toolchain) -> Result<()> {
        toolchain::bootstrap_posix(toolchain)?;
        toolchain::install_developer_tools();
        Ok(())
    }

    fn acquire_sdk(&self) -> Result<PathBuf> {
        sdk::install_macos()
    }

    fn resolve_dependencies(&self, toolchain: &Toolchain, manifest_path: &Path) -> Result<()> {
        let manifest = deps::VcpkgManifest::load(manifest_path)?;
        deps::install_universal(toolchain, &manifest)
    }
}

#[derive(Debug)]
struct LinuxOps;

impl PlatformOps for LinuxOps {
    fn install_toolchain(&self, toolchain: &Toolchain) -> Result<()> {
        toolchain::bootstrap_posix(toolchain)
    }

    fn acquire_sdk(&self) -> Result<PathBuf> {
        sdk::install_linux()
    }

    fn resolve_dependencies(&self, toolchain: &Toolchain, _manifest_path: &Path) -> Result<()> {
        deps::install_all(toolchain)
    }
}
