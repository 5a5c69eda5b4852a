//! Install verification and artifact packaging.

use std::path::Path;

use anyhow::Result;

use crate::config::RunConfig;
use crate::error::PipelineError;
use crate::util::process::CommandLine;

/// Fixed name of the archive placed inside the artifact path.
pub const ARCHIVE_NAME: &str = "archive.zip";

/// Verify the install prefix, then archive it if an artifact path was
/// configured. A failed verification means the pipeline ran to completion
/// but produced no usable output; it carries its own exit status and never
/// reaches the archive step.
pub fn package(config: &RunConfig) -> Result<()> {
    verify_install(&config.install_prefix)?;

    if let Some(artifact_path) = &config.artifact_path {
        let cmd = archive_command(artifact_path, &config.install_prefix);
        tracing::info!("archiving install tree: `{}`", cmd.display());
        cmd.run()?;
    }
    Ok(())
}

/// Check that the install prefix exists and is a directory.
pub fn verify_install(install_prefix: &Path) -> Result<()> {
    if !install_prefix.is_dir() {
        return Err(PipelineError::InstallVerification {
            path: install_prefix.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

/// The external archive invocation: `zip -r <artifact>/archive.zip <prefix>`.
pub fn archive_command(artifact_path: &Path, install_prefix: &Path) -> CommandLine {
    CommandLine::new("zip")
        .arg("-r")
        .arg(artifact_path.join(ARCHIVE_NAME))
        .arg(install_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_verify_rejects_missing_prefix() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("out/install");

        let err = verify_install(&missing).unwrap_err();
        let pipeline_err = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(
            pipeline_err,
            PipelineError::InstallVerification { .. }
        ));
        assert_eq!(pipeline_err.exit_status(), 2);
    }

    #[test]
    fn test_verify_rejects_file_at_prefix() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("out");
        std::fs::write(&file, b"not a directory").unwrap();

        assert!(verify_install(&file).is_err());
    }

    #[test]
    fn test_verify_accepts_directory() {
        let tmp = TempDir::new().unwrap();
        verify_install(tmp.path()).unwrap();
    }

    #[test]
    fn test_package_without_artifact_path_skips_archive() {
        let tmp = TempDir::new().unwrap();
        let mut config = RunConfig::new(None, false, None);
        config.install_prefix = tmp.path().to_path_buf();

        // No artifact path: verification is the whole step. If an archive
        // were attempted, `zip`'s missing output directory would fail this.
        package(&config).unwrap();
    }

    #[test]
    fn test_package_never_archives_after_failed_verification() {
        let tmp = TempDir::new().unwrap();
        let mut config = RunConfig::new(Some(tmp.path().join("artifacts")), false, None);
        config.install_prefix = tmp.path().join("out/install");

        let err = package(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>().unwrap(),
            PipelineError::InstallVerification { .. }
        ));
        // The archive step would have created the zip inside this path.
        assert!(!tmp.path().join("artifacts").join(ARCHIVE_NAME).exists());
    }

    #[test]
    fn test_archive_command_shape() {
        let cmd = archive_command(Path::new("/out"), Path::new("out/install"));
        assert_eq!(cmd.get_program(), Path::new("zip"));
        assert_eq!(
            cmd.get_args(),
            [
                "-r".to_string(),
                PathBuf::from("/out").join("archive.zip").display().to_string(),
                "out/install".to_string(),
            ]
        );
    }
}
