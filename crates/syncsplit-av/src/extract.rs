//! Stream-copy segment extraction with ffmpeg.

use crate::command::ToolCommand;
use std::path::{Path, PathBuf};

/// One fully resolved segment extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentJob {
    /// Source recording.
    pub input: PathBuf,
    /// Seek position in the source, `HH:MM:SS[.mmm]`.
    pub start: String,
    /// Length of output to keep, `HH:MM:SS[.mmm]`.
    pub length: String,
    /// Destination file.
    pub output: PathBuf,
    /// Label of the split-point the segment starts at.
    pub title: String,
}

/// Build the ffmpeg invocation for `job`.
///
/// `-ss` is placed before `-i` so the seek happens on the input and output
/// timestamps restart at zero; `-to` therefore bounds the segment length.
/// `-y` makes re-runs overwrite earlier output instead of prompting.
pub fn extract_command(ffmpeg: &Path, job: &SegmentJob) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.arg("-y")
        .args(["-ss", job.start.as_str()])
        .arg("-i")
        .arg(&job.input)
        .args(["-to", job.length.as_str()])
        .args(["-c", "copy"])
        .arg(&job.output);
    cmd
}
