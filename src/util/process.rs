//! External tool invocation.
//!
//! Every long-running piece of work in the pipeline is delegated to an
//! external process (git, vcpkg, cmake, installers, zip). Output streams
//! straight through to the CI log, so stdout/stderr are inherited rather
//! than captured; a non-zero exit becomes a `PipelineError::ToolInvocation`
//! and aborts the run.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::error::PipelineError;

/// Builder for one external tool invocation.
#[derive(Debug, Clone)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    stdin: Option<Vec<u8>>,
}

impl CommandLine {
    /// Create a new command line for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        CommandLine {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            stdin: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Feed data on stdin. Used for installers that read interactive
    /// prompts from standard input.
    pub fn stdin(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Render the command for logs and error messages.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Run to completion with inherited stdout/stderr, requiring success.
    pub fn run(&self) -> Result<()> {
        tracing::debug!("running `{}`", self.display());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        let status = if let Some(ref stdin_data) = self.stdin {
            cmd.stdin(Stdio::piped());
            let mut child = cmd
                .spawn()
                .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;
            if let Some(mut stdin) = child.stdin.take() {
                // The child may stop reading before we run out of answers.
                let _ = stdin.write_all(stdin_data);
            }
            child
                .wait()
                .with_context(|| format!("failed to wait for `{}`", self.program.display()))?
        } else {
            cmd.status()
                .with_context(|| format!("failed to execute `{}`", self.program.display()))?
        };

        if !status.success() {
            return Err(PipelineError::ToolInvocation {
                command: self.display(),
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake.
pub fn find_cmake() -> Option<PathBuf> {
    find_executable("cmake")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cmd = CommandLine::new("cmake").args(["--build", "out/build/Release", "--config", "Release"]);
        assert_eq!(cmd.display(), "cmake --build out/build/Release --config Release");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_success() {
        CommandLine::new("true").run().unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn test_run_failure_is_tool_invocation() {
        let err = CommandLine::new("false").run().unwrap_err();
        let pipeline_err = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(
            pipeline_err,
            PipelineError::ToolInvocation { code: Some(1), .. }
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_stdin_is_fed_to_child() {
        // `cat` exits 0 after consuming stdin; enough to prove the pipe works.
        CommandLine::new("cat").stdin("yes\nyes\n").run().unwrap();
    }
}
