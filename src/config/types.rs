use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::timecode::{self, TimecodeError};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Path of the file whose timeline the split points are expressed
    /// against. Defaults to the first entry of `files`.
    #[serde(default)]
    pub reference: Option<PathBuf>,

    #[serde(default)]
    pub files: Vec<VideoFile>,

    #[serde(default)]
    pub split_points: Vec<SplitPoint>,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// An input recording and the point in its own timeline that coincides
/// with the same real-world moment in every other recording.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoFile {
    pub path: PathBuf,

    #[serde(alias = "sync_timestamp")]
    pub sync: String,
}

/// A labeled cut position on the reference timeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SplitPoint {
    pub time: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

/// Fatal configuration problems, detected before any tool runs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no video files configured")]
    NoFiles,

    #[error("reference file {} is not in the file list", .0.display())]
    ReferenceNotFound(PathBuf),

    #[error("need at least two split points, got {0}")]
    TooFewSplitPoints(usize),

    #[error("invalid timestamp for {context}: {source}")]
    InvalidTimestamp {
        context: String,
        #[source]
        source: TimecodeError,
    },

    #[error("split point {current:?} does not come after {previous:?}")]
    NotIncreasing { previous: String, current: String },
}

impl VideoFile {
    pub fn new(path: impl Into<PathBuf>, sync: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sync: sync.into(),
        }
    }
}

impl SplitPoint {
    pub fn new(time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
        }
    }
}

impl Config {
    /// Path of the reference file, explicit or implied.
    pub fn reference_path(&self) -> Option<&Path> {
        self.reference
            .as_deref()
            .or_else(|| self.files.first().map(|f| f.path.as_path()))
    }

    /// The configured file acting as reference, if it is in the file list.
    pub fn reference_file(&self) -> Option<&VideoFile> {
        let path = self.reference_path()?;
        self.files.iter().find(|f| f.path == path)
    }

    pub fn is_reference(&self, file: &VideoFile) -> bool {
        self.reference_path() == Some(file.path.as_path())
    }

    /// Check every invariant the segmenter relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.files.is_empty() {
            return Err(ConfigError::NoFiles);
        }

        if self.reference_file().is_none() {
            let path = self.reference_path().unwrap_or(Path::new("")).to_path_buf();
            return Err(ConfigError::ReferenceNotFound(path));
        }

        if self.split_points.len() < 2 {
            return Err(ConfigError::TooFewSplitPoints(self.split_points.len()));
        }

        for file in &self.files {
            timecode::time_to_seconds(&file.sync).map_err(|source| {
                ConfigError::InvalidTimestamp {
                    context: format!("file {}", file.path.display()),
                    source,
                }
            })?;
        }

        let mut previous: Option<(f64, &SplitPoint)> = None;
        for point in &self.split_points {
            let secs = timecode::time_to_seconds(&point.time).map_err(|source| {
                ConfigError::InvalidTimestamp {
                    context: format!("split point {:?}", point.title),
                    source,
                }
            })?;

            if let Some((prev_secs, prev)) = previous {
                if secs <= prev_secs {
                    return Err(ConfigError::NotIncreasing {
                        previous: prev.title.clone(),
                        current: point.title.clone(),
                    });
                }
            }
            previous = Some((secs, point));
        }

        Ok(())
    }
}

impl Default for Config {
    /// The built-in job used when no config file is found. Edit the paths
    /// and timestamps, or point `--config` at a TOML file instead.
    fn default() -> Self {
        Self {
            reference: None,
            files: vec![
                VideoFile::new("/absolute/path/video1.MP4", "00:09:37"),
                VideoFile::new("/absolute/path/video2.MP4", "00:02:35"),
            ],
            split_points: vec![
                SplitPoint::new("00:09:30", "Part 1"),
                SplitPoint::new("00:14:30", "Part 2"),
                SplitPoint::new("00:19:40", "Part 3"),
            ],
            tools: ToolsConfig::default(),
        }
    }
}
