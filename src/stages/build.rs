//! CMake configure, compile, and install per build configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::config::{BuildConfiguration, RunConfig, UNIVERSAL_TRIPLET};
use crate::platform::PlatformDescriptor;
use crate::stages::toolchain::Toolchain;
use crate::util::process::{find_cmake, CommandLine};

/// Drives the native build system once per requested configuration.
pub struct BuildRunner<'a> {
    platform: &'a PlatformDescriptor,
    config: &'a RunConfig,
    toolchain: &'a Toolchain,
    sdk_home: &'a Path,
    cmake: PathBuf,
}

impl<'a> BuildRunner<'a> {
    pub fn new(
        platform: &'a PlatformDescriptor,
        config: &'a RunConfig,
        toolchain: &'a Toolchain,
        sdk_home: &'a Path,
    ) -> Result<Self> {
        let Some(cmake) = find_cmake() else {
            bail!(
                "CMake not found\n\
                 \n\
                 CMake is required to build fbx-gltf-conv.\n\
                 Install CMake and ensure it's in your PATH."
            );
        };

        Ok(BuildRunner {
            platform,
            config,
            toolchain,
            sdk_home,
            cmake,
        })
    }

    /// Build every configuration in the run's set, Release first. A failure
    /// in one configuration aborts without attempting the next.
    pub fn run_all(&self) -> Result<()> {
        for build_type in self.config.configurations() {
            self.run(build_type)?;
        }
        Ok(())
    }

    /// Configure, compile, and install one configuration.
    pub fn run(&self, build_type: BuildConfiguration) -> Result<()> {
        tracing::info!("building {}", build_type.as_str());
        self.configure(build_type)?;
        self.compile(build_type)?;
        self.install(build_type)
    }

    /// The full generator argument vector for one configuration. Pure, so
    /// the flag policy is testable without invoking CMake.
    pub fn configure_args(&self, build_type: BuildConfiguration) -> Vec<String> {
        let mut args = vec![format!(
            "-DCMAKE_TOOLCHAIN_FILE={}",
            self.toolchain.cmake_toolchain_file().display()
        )];

        if self.platform.is_macos() {
            args.push(format!(
                "-DCMAKE_PREFIX_PATH={}",
                self.config.universal_lib_dir.display()
            ));
            args.push(format!("-DVCPKG_TARGET_TRIPLET={}", UNIVERSAL_TRIPLET));
            args.push("-DCMAKE_OSX_ARCHITECTURES=x86_64;arm64".to_string());
        }

        args.push(format!("-DCMAKE_BUILD_TYPE={}", build_type.as_str()));
        args.push(format!(
            "-DCMAKE_INSTALL_PREFIX={}",
            self.config.install_dir(build_type).display()
        ));
        args.push(format!("-DFbxSdkHome:STRING={}", self.sdk_home.display()));

        // Windows's native runtime ships the std::filesystem facilities the
        // project needs; every other platform polyfills them.
        let polyfill = if self.platform.is_windows() { "OFF" } else { "ON" };
        args.push(format!("-DPOLYFILLS_STD_FILESYSTEM={}", polyfill));

        if let Some(version) = &self.config.version {
            args.push(format!("-DFBX_GLTF_CONV_CLI_VERSION={}", version));
        }

        args.push("-S".to_string());
        args.push(".".to_string());
        args.push(format!("-B{}", self.config.build_dir(build_type).display()));
        args
    }

    fn configure(&self, build_type: BuildConfiguration) -> Result<()> {
        CommandLine::new(&self.cmake)
            .args(self.configure_args(build_type))
            .run()
    }

    fn compile(&self, build_type: BuildConfiguration) -> Result<()> {
        CommandLine::new(&self.cmake)
            .arg("--build")
            .arg(self.config.build_dir(build_type))
            .args(["--config", build_type.as_str()])
            .run()
    }

    /// Windows's single-configuration generator only exposes install as a
    /// build target; everywhere else the dedicated install subcommand works.
    fn install(&self, build_type: BuildConfiguration) -> Result<()> {
        if self.platform.is_windows() {
            CommandLine::new(&self.cmake)
                .arg("--build")
                .arg(self.config.build_dir(build_type))
                .args(["--config", build_type.as_str()])
                .args(["--target", "install"])
                .run()
        } else {
            CommandLine::new(&self.cmake)
                .arg("--install")
                .arg(self.config.build_dir(build_type))
                .run()
        }
    }
}
