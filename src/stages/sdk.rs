//! Autodesk FBX SDK acquisition.
//!
//! Each platform gets the SDK through a different vendor channel: a silent
//! NSIS-style installer on Windows, a `.pkg` inside a tarball on macOS, and
//! a self-extracting interactive installer on Linux. All three funnel into
//! a single `SdkHome` path consumed verbatim by the build stage; the path
//! is not validated here, a broken SDK surfaces as a CMake failure later.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;
use url::Url;

use crate::error::PipelineError;
use crate::platform::OsFamily;
use crate::util::download::download_file;
use crate::util::fs::{ensure_dir, make_executable, symlink};
use crate::util::process::CommandLine;

/// FBX SDK release installed by this pipeline.
pub const SDK_VERSION: &str = "2020.2.1";

/// Working directory for downloads and extraction, relative to the run's
/// working directory.
pub const SDK_DIR: &str = "fbxsdk";

const SDK_URL_BASE: &str =
    "https://www.autodesk.com/content/dam/autodesk/www/adn/fbx/2020-2-1";

/// Name of the installer binary inside the Linux tarball.
const LINUX_INSTALLER_NAME: &str = "fbx202021_fbxsdk_linux";

/// Where the macOS `.pkg` installs the SDK (versioned subdirectory).
const MACOS_INSTALL_LOCATION: &str = "/Applications/Autodesk/FBX SDK";

/// Vendor download URL for the given platform family, if one exists.
pub fn download_url(os: &OsFamily) -> Option<Url> {
    let file = match os {
        OsFamily::Windows => "fbx202021_fbxsdk_vs2019_win.exe",
        OsFamily::MacOs => "fbx202021_fbxsdk_clang_mac.pkg.tgz",
        OsFamily::Linux => "fbx202021_fbxsdk_linux.tar.gz",
        OsFamily::Other(_) => return None,
    };
    Url::parse(&format!("{}/{}", SDK_URL_BASE, file)).ok()
}

/// The stable SDK home under the working directory, used on Windows (as
/// the install destination) and macOS (as a symlink to the versioned
/// vendor location).
fn local_sdk_home() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    Ok(cwd.join(SDK_DIR).join("Home"))
}

/// Windows: download the self-extracting installer and run it silently
/// against an explicit destination.
pub fn install_windows() -> Result<PathBuf> {
    let url = download_url(&OsFamily::Windows).expect("windows SDK URL is static");
    let sdk_home = local_sdk_home()?;
    ensure_dir(Path::new(SDK_DIR))?;

    let installer = Path::new(SDK_DIR).join("fbxsdk.exe");
    download_file(&url, &installer)?;

    // start /wait blocks until the silent install finishes; /S suppresses
    // the UI and /D sets the destination.
    CommandLine::new("cmd")
        .args(["/C", "start", "/wait"])
        .arg(&installer)
        .arg("/S")
        .arg(format!("/D={}", sdk_home.display()))
        .run()?;

    Ok(sdk_home)
}

/// macOS: download the tarball, extract it, run the single `.pkg` it
/// contains with elevated privileges, and symlink the versioned vendor
/// location to a stable local path.
pub fn install_macos() -> Result<PathBuf> {
    let url = download_url(&OsFamily::MacOs).expect("macos SDK URL is static");
    let sdk_home = local_sdk_home()?;
    ensure_dir(Path::new(SDK_DIR))?;

    let tarball = Path::new(SDK_DIR).join("fbxsdk.pkg.tgz");
    download_file(&url, &tarball)?;
    extract_tarball(&tarball, Path::new(SDK_DIR))?;

    let pkg = locate_single(Path::new(SDK_DIR), "*.pkg")?;
    tracing::info!("FBX SDK macOS pkg: {}", pkg.display());

    CommandLine::new("sudo")
        .args(["installer", "-pkg"])
        .arg(&pkg)
        .args(["-target", "/"])
        .run()?;

    let versioned = Path::new(MACOS_INSTALL_LOCATION).join(SDK_VERSION);
    symlink(&versioned, &sdk_home).with_context(|| {
        format!(
            "failed to link {} to {}",
            sdk_home.display(),
            versioned.display()
        )
    })?;

    Ok(sdk_home)
}

/// Linux: download the tarball, extract it, mark the contained installer
/// executable, and run it non-interactively against a home-relative
/// destination, answering every prompt affirmatively.
pub fn install_linux() -> Result<PathBuf> {
    let url = download_url(&OsFamily::Linux).expect("linux SDK URL is static");
    ensure_dir(Path::new(SDK_DIR))?;

    let tarball = Path::new(SDK_DIR).join("fbxsdk.tar.gz");
    download_file(&url, &tarball)?;
    extract_tarball(&tarball, Path::new(SDK_DIR))?;

    let installer = Path::new(SDK_DIR).join(LINUX_INSTALLER_NAME);
    make_executable(&installer)?;

    let user_dirs = directories::UserDirs::new()
        .context("failed to locate the user's home directory")?;
    let sdk_home = user_dirs.home_dir().join(SDK_DIR).join("install");
    ensure_dir(&sdk_home)?;

    tracing::info!("installing FBX SDK to {}", sdk_home.display());
    // The installer walks through license prompts on stdin; feed it more
    // affirmative answers than it will ever ask for.
    CommandLine::new(&installer)
        .arg(&sdk_home)
        .stdin("yes\n".repeat(64))
        .run()?;

    Ok(sdk_home)
}

/// Extract a gzip-compressed tar archive in-process.
fn extract_tarball(tarball: &Path, dest: &Path) -> Result<()> {
    let file = std::fs::File::open(tarball)
        .with_context(|| format!("failed to open archive: {}", tarball.display()))?;
    Archive::new(GzDecoder::new(file))
        .unpack(dest)
        .with_context(|| format!("failed to extract {}", tarball.display()))?;
    Ok(())
}

/// Find exactly one file matching `pattern` directly under `dir`. Zero or
/// multiple matches are an `ExtractionMismatch`.
fn locate_single(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let full_pattern = dir.join(pattern);
    let mut matches: Vec<PathBuf> = glob::glob(&full_pattern.to_string_lossy())
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .collect();
    matches.sort();

    if matches.len() != 1 {
        return Err(PipelineError::ExtractionMismatch {
            pattern: pattern.to_string(),
            dir: dir.to_path_buf(),
            found: matches.len(),
        }
        .into());
    }
    Ok(matches.remove(0))
}
