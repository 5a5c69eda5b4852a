//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// fbxci - build and package fbx-gltf-conv for the current platform
///
/// clap's automatic version flag is disabled so `--version` can carry the
/// version string injected into the native build instead.
#[derive(Parser)]
#[command(name = "fbxci")]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Directory to place archive.zip in (omit to skip packaging)
    #[arg(long)]
    pub artifact_path: Option<PathBuf>,

    /// Build a Debug configuration in addition to Release
    #[arg(long)]
    pub include_debug: bool,

    /// Version string injected into the native build
    #[arg(long)]
    pub version: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
