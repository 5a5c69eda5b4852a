//! vcpkg toolchain acquisition and bootstrap.
//!
//! Clones the vcpkg repository into the working directory and runs the
//! platform's bootstrap script. The resulting `Toolchain` handle is the
//! only way later stages reach the vcpkg binary and its CMake integration
//! script; it lives for the whole run and is never cleaned up.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::process::CommandLine;

/// Upstream vcpkg repository.
pub const VCPKG_GIT_URL: &str = "https://github.com/microsoft/vcpkg.git";

/// Handle to a bootstrapped vcpkg installation rooted in the working
/// directory.
#[derive(Debug, Clone)]
pub struct Toolchain {
    root: PathBuf,
}

impl Toolchain {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Toolchain { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the vcpkg binary.
    pub fn vcpkg_binary(&self) -> PathBuf {
        let exe = if cfg!(windows) { "vcpkg.exe" } else { "vcpkg" };
        self.root.join(exe)
    }

    /// The CMake toolchain integration script shipped with vcpkg.
    pub fn cmake_toolchain_file(&self) -> PathBuf {
        self.root
            .join("scripts")
            .join("buildsystems")
            .join("vcpkg.cmake")
    }

    fn bootstrap_script(&self, windows: bool) -> PathBuf {
        let script = if windows {
            "bootstrap-vcpkg.bat"
        } else {
            "bootstrap-vcpkg.sh"
        };
        self.root.join(script)
    }
}

/// Clone vcpkg into the working directory.
pub fn clone_vcpkg() -> Result<Toolchain> {
    tracing::info!("cloning vcpkg from {}", VCPKG_GIT_URL);
    CommandLine::new("git").args(["clone", VCPKG_GIT_URL]).run()?;
    Ok(Toolchain::new("vcpkg"))
}

/// Run the Windows bootstrap script variant.
pub fn bootstrap_windows(toolchain: &Toolchain) -> Result<()> {
    CommandLine::new(toolchain.bootstrap_script(true)).run()
}

/// Run the POSIX bootstrap script variant.
pub fn bootstrap_posix(toolchain: &Toolchain) -> Result<()> {
    CommandLine::new(toolchain.bootstrap_script(false)).run()
}

/// Install the Xcode command-line developer tools.
///
/// `xcode-select --install` exits non-zero when the tools are already
/// present; that outcome signals prior success, so the failure is discarded
/// rather than propagated. This is the one swallowed error in the pipeline.
pub fn install_developer_tools() {
    run_and_discard(CommandLine::new("xcode-select").arg("--install"));
}

fn run_and_discard(cmd: CommandLine) {
    if let Err(e) = cmd.run() {
        tracing::debug!("`{}` failed (likely already installed): {:#}", cmd.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolchain_paths() {
        let toolchain = Toolchain::new("vcpkg");

        let binary = toolchain.vcpkg_binary();
        assert!(binary.starts_with("vcpkg"));
        assert!(binary
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("vcpkg"));

        assert_eq!(
            toolchain.cmake_toolchain_file(),
            Path::new("vcpkg/scripts/buildsystems/vcpkg.cmake")
        );
    }

    #[test]
    fn test_bootstrap_script_variants() {
        let toolchain = Toolchain::new("vcpkg");
        assert_eq!(
            toolchain.bootstrap_script(true),
            Path::new("vcpkg/bootstrap-vcpkg.bat")
        );
        assert_eq!(
            toolchain.bootstrap_script(false),
            Path::new("vcpkg/bootstrap-vcpkg.sh")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_already_installed_failure_is_swallowed() {
        // A non-zero exit from the developer-tools install is discarded,
        // not propagated.
        run_and_discard(CommandLine::new("false"));
    }
}
