//! Native dependency resolution via vcpkg.
//!
//! On Windows and Linux a single manifest-mode `vcpkg install` resolves
//! everything. macOS needs universal binaries, which vcpkg cannot produce
//! natively: every manifest dependency is installed once per architecture
//! triplet and the two trees are merged library-by-library with the
//! external `lipo-dir-merge` utility. The macOS invocations are
//! materialized as a plan before anything runs, then executed strictly in
//! order; the first non-zero exit aborts the resolver with no cleanup of
//! the architectures already installed.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::UNIVERSAL_TRIPLET;
use crate::stages::toolchain::Toolchain;
use crate::util::process::CommandLine;

/// x86-64 and arm64 vcpkg triplets resolved independently on macOS.
pub const X64_TRIPLET: &str = "x64-osx";
pub const ARM64_TRIPLET: &str = "arm64-osx";

/// The vcpkg manifest declaring this project's native dependencies.
#[derive(Debug, Clone, Deserialize)]
pub struct VcpkgManifest {
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl VcpkgManifest {
    /// Load `vcpkg.json` from the project root.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }
}

/// Install all declared dependencies with one manifest-mode invocation.
/// Used everywhere except macOS.
pub fn install_all(toolchain: &Toolchain) -> Result<()> {
    tracing::info!("installing native dependencies");
    CommandLine::new(toolchain.vcpkg_binary()).arg("install").run()
}

/// Install each dependency once per architecture triplet and merge the two
/// trees into the universal directory.
pub fn install_universal(toolchain: &Toolchain, manifest: &VcpkgManifest) -> Result<()> {
    tracing::info!(
        "installing {} native dependencies for x86-64 and arm64",
        manifest.dependencies.len()
    );
    for cmd in universal_plan(toolchain, manifest) {
        cmd.run()?;
    }
    Ok(())
}

/// The ordered macOS invocation sequence: for each of the N manifest
/// dependencies one install per triplet (2N total), then exactly one merge.
pub fn universal_plan(toolchain: &Toolchain, manifest: &VcpkgManifest) -> Vec<CommandLine> {
    let vcpkg = toolchain.vcpkg_binary();
    let mut plan = Vec::with_capacity(manifest.dependencies.len() * 2 + 1);

    for library in &manifest.dependencies {
        for triplet in [X64_TRIPLET, ARM64_TRIPLET] {
            plan.push(
                CommandLine::new(&vcpkg)
                    .arg("install")
                    .arg(format!("--triplet={}", triplet))
                    .arg(library),
            );
        }
    }

    plan.push(
        CommandLine::new("python3")
            .arg("./lipo-dir-merge.py")
            .args([ARM64_TRIPLET, X64_TRIPLET, UNIVERSAL_TRIPLET]),
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(libraries: &[&str]) -> VcpkgManifest {
        VcpkgManifest {
            dependencies: libraries.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_plan_is_two_installs_per_library_plus_one_merge() {
        let toolchain = Toolchain::new("vcpkg");

        for n in [0usize, 1, 3, 7] {
            let libraries: Vec<String> = (0..n).map(|i| format!("lib{i}")).collect();
            let refs: Vec<&str> = libraries.iter().map(String::as_str).collect();
            let plan = universal_plan(&toolchain, &manifest(&refs));
            assert_eq!(plan.len(), 2 * n + 1, "plan size for {n} libraries");

            let merges = plan
                .iter()
                .filter(|cmd| cmd.get_program() == Path::new("python3"))
                .count();
            assert_eq!(merges, 1);
        }
    }

    #[test]
    fn test_plan_installs_both_triplets_per_library() {
        let toolchain = Toolchain::new("vcpkg");
        let plan = universal_plan(&toolchain, &manifest(&["fmt"]));

        assert_eq!(plan[0].get_args(), ["install", "--triplet=x64-osx", "fmt"]);
        assert_eq!(plan[1].get_args(), ["install", "--triplet=arm64-osx", "fmt"]);
    }

    #[test]
    fn test_merge_is_last_and_targets_universal_dir() {
        let toolchain = Toolchain::new("vcpkg");
        let plan = universal_plan(&toolchain, &manifest(&["fmt", "zlib"]));

        let merge = plan.last().unwrap();
        assert_eq!(merge.get_program(), Path::new("python3"));
        assert_eq!(
            merge.get_args(),
            ["./lipo-dir-merge.py", "arm64-osx", "x64-osx", "uni-osx"]
        );
    }

    #[test]
    fn test_manifest_parses_vcpkg_json() {
        let parsed: VcpkgManifest =
            serde_json::from_str(r#"{ "name": "fbx-gltf-conv", "dependencies": ["fmt", "nlohmann-json"] }"#)
                .unwrap();
        assert_eq!(parsed.dependencies, ["fmt", "nlohmann-json"]);
    }

    #[test]
    fn test_manifest_without_dependencies_is_empty() {
        let parsed: VcpkgManifest = serde_json::from_str("{}").unwrap();
        assert!(parsed.dependencies.is_empty());
    }
}
