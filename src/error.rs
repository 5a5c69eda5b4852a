//! Pipeline error types.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline failure.
///
/// Every stage propagates one of these kinds through `anyhow::Error`; the
/// binary downcasts the final error to pick the process exit status. There
/// is no retry, rollback, or cleanup of partially-installed state anywhere
/// in the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A download did not complete; the partial file has already been
    /// removed by the time this propagates.
    #[error("download of {url} did not complete: {reason}")]
    Network { url: String, reason: String },

    /// An external tool exited non-zero.
    #[error("`{command}` exited with status {status}", status = display_code(.code))]
    ToolInvocation { command: String, code: Option<i32> },

    /// The OS family is outside the three recognized values.
    #[error("unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    /// An extracted archive did not contain exactly one expected file.
    #[error("expected exactly one `{pattern}` in {dir}, found {found}")]
    ExtractionMismatch {
        pattern: String,
        dir: PathBuf,
        found: usize,
    },

    /// The install prefix is missing or not a directory after the build
    /// stage completed. The pipeline ran, but produced no usable output.
    #[error("installation failed: {path} is missing or not a directory")]
    InstallVerification { path: PathBuf },
}

impl PipelineError {
    /// Process exit status for this failure. Verification failure is
    /// distinct from every other fatal error so CI can tell "a tool broke"
    /// from "the build ran but installed nothing".
    pub fn exit_status(&self) -> i32 {
        match self {
            PipelineError::InstallVerification { .. } => 2,
            _ => 1,
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_exit_status_is_distinct() {
        let verify = PipelineError::InstallVerification {
            path: PathBuf::from("out/install"),
        };
        let tool = PipelineError::ToolInvocation {
            command: "cmake --build out/build/Release".to_string(),
            code: Some(1),
        };
        let network = PipelineError::Network {
            url: "https://example.com/sdk.tar.gz".to_string(),
            reason: "connection reset".to_string(),
        };

        assert_eq!(verify.exit_status(), 2);
        assert_eq!(tool.exit_status(), 1);
        assert_eq!(network.exit_status(), 1);
    }

    #[test]
    fn test_tool_invocation_display() {
        let err = PipelineError::ToolInvocation {
            command: "vcpkg install".to_string(),
            code: Some(127),
        };
        assert_eq!(err.to_string(), "`vcpkg install` exited with status 127");

        let killed = PipelineError::ToolInvocation {
            command: "cmake".to_string(),
            code: None,
        };
        assert!(killed.to_string().contains("signal"));
    }
}
