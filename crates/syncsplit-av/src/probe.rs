//! FFprobe-based container duration lookup.

use crate::command::{ToolCommand, ToolOutput};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    // ffprobe prints the duration as a JSON string, e.g. "605.120000".
    duration: Option<serde_json::Value>,
}

/// Build the ffprobe invocation that asks only for the container duration.
pub fn duration_command(ffprobe: &Path, input: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffprobe);
    cmd.args([
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "json",
    ])
    .arg(input);
    cmd
}

/// Probe the declared container duration of `input`, in seconds.
///
/// # Errors
///
/// - [`Error::ToolFailed`] / [`Error::ToolNotFound`] if ffprobe fails to run.
/// - [`Error::ParseError`] if the output has no usable `format.duration`;
///   the captured output is attached.
pub fn probe_duration(ffprobe: &Path, input: &Path) -> Result<f64> {
    let cmd = duration_command(ffprobe, input);

    #[cfg(feature = "tracing")]
    tracing::debug!("Probing duration: {}", cmd.command_line());

    let output = cmd.execute()?;
    parse_duration(output)
}

/// Extract `format.duration` from captured ffprobe JSON output.
pub fn parse_duration(output: ToolOutput) -> Result<f64> {
    let parsed = match serde_json::from_str::<FfprobeOutput>(&output.stdout) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Err(Error::parse_error(
                "ffprobe",
                format!("invalid JSON: {}", e),
                Some(output),
            ))
        }
    };

    let seconds = match parsed.format.and_then(|f| f.duration) {
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => Ok(s),
        _ => Err(Error::parse_error(
            "ffprobe",
            "missing or unparsable format.duration",
            Some(output),
        )),
    }
}
