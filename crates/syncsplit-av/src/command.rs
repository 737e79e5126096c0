//! Builder for executing external tool commands with captured output.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::{Error, Result};

/// Output captured from a tool execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Process exit code, `None` if the process was terminated by a signal.
    pub status_code: Option<i32>,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// A builder for constructing and executing external tool invocations.
///
/// Execution is synchronous: [`ToolCommand::execute`] blocks until the child
/// exits. Stdin is always closed so tools never wait on a prompt.
///
/// # Example
///
/// ```no_run
/// use syncsplit_av::ToolCommand;
///
/// let output = ToolCommand::new("ffprobe")
///     .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
///     .arg("/path/to/video.mp4")
///     .execute()?;
/// println!("{}", output.stdout);
/// # Ok::<(), syncsplit_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(iter.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// The program this command runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, lossily converted for display.
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// The full invocation as a single space-joined line, for logging.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.arg_strings())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Short tool name used in errors (file name of the program).
    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program cannot be spawned because it
    ///   does not exist.
    /// - [`Error::ToolFailed`] if the process exits with a non-zero status;
    ///   the captured output is attached.
    /// - [`Error::Io`] for any other spawn or wait failure.
    pub fn execute(&self) -> Result<ToolOutput> {
        let tool = self.tool_name();

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(tool.clone())
                } else {
                    Error::Io(e)
                }
            })?;

        let tool_output = ToolOutput {
            status_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            return Err(Error::tool_failed(
                tool,
                format!("exited with status {}", output.status),
                Some(tool_output),
            ));
        }

        Ok(tool_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_joins_program_and_args() {
        let mut cmd = ToolCommand::new("ffmpeg");
        cmd.args(["-ss", "00:01:00"]).arg("-i").arg(Path::new("/in/clip.mp4"));
        assert_eq!(cmd.command_line(), "ffmpeg -ss 00:01:00 -i /in/clip.mp4");
        assert_eq!(cmd.program(), Path::new("ffmpeg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_captures_stdout() {
        let output = ToolCommand::new("sh").args(["-c", "echo hello"]).execute();

        match output {
            Ok(out) => {
                assert!(out.success());
                assert_eq!(out.stdout.trim(), "hello");
            }
            Err(_) => {
                // Minimal environments may not ship sh; skip.
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_failure_keeps_output() {
        let result = ToolCommand::new("sh")
            .args(["-c", "echo partial; echo broken >&2; exit 3"])
            .execute();

        if let Err(Error::ToolFailed { tool, output, .. }) = result {
            assert_eq!(tool, "sh");
            let output = output.expect("output captured");
            assert_eq!(output.status_code, Some(3));
            assert_eq!(output.stdout.trim(), "partial");
            assert_eq!(output.stderr.trim(), "broken");
        }
    }

    #[test]
    fn test_execute_nonexistent_tool() {
        let result = ToolCommand::new("nonexistent_tool_xyz_12345").execute();
        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }
}
