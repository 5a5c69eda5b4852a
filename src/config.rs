//! Run configuration and fixed output layout.
//!
//! One `RunConfig` is built at process start from the parsed CLI arguments
//! and never mutated; stages read it and nothing else. The fixed locations
//! (`out/install`, the universal vcpkg library directory) live here too so
//! no stage hardcodes a path the others also need.

use std::path::{Path, PathBuf};

/// Name of the merged universal-binary triplet directory on macOS.
pub const UNIVERSAL_TRIPLET: &str = "uni-osx";

/// A named CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildConfiguration {
    Release,
    Debug,
}

impl BuildConfiguration {
    /// The string CMake expects in `-DCMAKE_BUILD_TYPE` and `--config`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildConfiguration::Release => "Release",
            BuildConfiguration::Debug => "Debug",
        }
    }
}

/// Immutable invocation parameters plus fixed layout, read by every stage.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Where to place `archive.zip`; `None` disables packaging entirely.
    pub artifact_path: Option<PathBuf>,
    /// Build Debug in addition to Release.
    pub include_debug: bool,
    /// Version string injected into the CMake configure step; `None` means
    /// no version definition is passed at all.
    pub version: Option<String>,
    /// Root under which each configuration's install tree is placed.
    pub install_prefix: PathBuf,
    /// Merged universal dependency tree consumed by CMake on macOS.
    pub universal_lib_dir: PathBuf,
}

impl RunConfig {
    pub fn new(
        artifact_path: Option<PathBuf>,
        include_debug: bool,
        version: Option<String>,
    ) -> Self {
        RunConfig {
            artifact_path,
            include_debug,
            version,
            install_prefix: PathBuf::from("out/install"),
            universal_lib_dir: PathBuf::from("vcpkg_installed").join(UNIVERSAL_TRIPLET),
        }
    }

    /// The set of configurations to build, Release always first.
    pub fn configurations(&self) -> Vec<BuildConfiguration> {
        let mut configs = vec![BuildConfiguration::Release];
        if self.include_debug {
            configs.push(BuildConfiguration::Debug);
        }
        configs
    }

    /// CMake working directory for one configuration.
    pub fn build_dir(&self, config: BuildConfiguration) -> PathBuf {
        Path::new("out/build").join(config.as_str())
    }

    /// Install destination for one configuration.
    pub fn install_dir(&self, config: BuildConfiguration) -> PathBuf {
        self.install_prefix.join(config.as_str())
    }
}
