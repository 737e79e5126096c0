//! The [`MediaTools`] trait and its ffmpeg/ffprobe implementation.

use crate::command::{ToolCommand, ToolOutput};
use crate::extract::{self, SegmentJob};
use crate::{probe, tools, Result};
use std::path::{Path, PathBuf};

/// The two external operations the segmentation driver needs.
///
/// Production code uses [`FfmpegTools`]; tests substitute recorders so the
/// driver can run without any media tools installed.
pub trait MediaTools {
    /// Declared container duration of `input`, in seconds.
    fn probe_duration(&self, input: &Path) -> Result<f64>;

    /// The invocation that [`MediaTools::extract_segment`] would run.
    fn extract_command(&self, job: &SegmentJob) -> ToolCommand;

    /// Write one segment to `job.output`.
    fn extract_segment(&self, job: &SegmentJob) -> Result<ToolOutput> {
        self.extract_command(job).execute()
    }
}

/// [`MediaTools`] backed by the ffmpeg and ffprobe executables.
#[derive(Debug, Clone)]
pub struct FfmpegTools {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegTools {
    /// Use the given executables as-is.
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Resolve executables from configured paths, falling back to `PATH`.
    pub fn discover(ffmpeg: Option<&Path>, ffprobe: Option<&Path>) -> Self {
        Self::new(
            tools::resolve_tool("ffmpeg", ffmpeg),
            tools::resolve_tool("ffprobe", ffprobe),
        )
    }

    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    pub fn ffprobe(&self) -> &Path {
        &self.ffprobe
    }
}

impl MediaTools for FfmpegTools {
    fn probe_duration(&self, input: &Path) -> Result<f64> {
        probe::probe_duration(&self.ffprobe, input)
    }

    fn extract_command(&self, job: &SegmentJob) -> ToolCommand {
        extract::extract_command(&self.ffmpeg, job)
    }
}
