//! Cutting every configured recording at the shared split points.

use crate::config::{Config, SplitPoint, VideoFile};
use crate::offset::relative_split_points;
use crate::timecode::{seconds_to_time, time_to_seconds, TimecodeError};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use syncsplit_av::{MediaTools, SegmentJob, ToolOutput};

/// Outcome of a single segment.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentStatus {
    Written,
    /// ffmpeg failed; the message is the tool error.
    Failed(String),
    /// Dry run: the command was printed, not executed.
    Planned,
}

/// A planned segment and what happened to it.
#[derive(Debug, Clone)]
pub struct SegmentReport {
    pub job: SegmentJob,
    pub length_secs: f64,
    pub status: SegmentStatus,
}

/// Probe result and segments for one input file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Probed duration, `0.0` when probing failed.
    pub duration: f64,
    pub probe_error: Option<String>,
    pub segments: Vec<SegmentReport>,
}

/// Per-file outcomes of a whole run, in configured order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    fn count(&self, pred: impl Fn(&SegmentStatus) -> bool) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.segments)
            .filter(|s| pred(&s.status))
            .count()
    }

    pub fn written(&self) -> usize {
        self.count(|s| *s == SegmentStatus::Written)
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, SegmentStatus::Failed(_)))
    }

    pub fn planned(&self) -> usize {
        self.count(|s| *s == SegmentStatus::Planned)
    }
}

/// Split points for `file`: the configured ones for the reference file,
/// shifted ones for everything else.
pub fn points_for_file(config: &Config, file: &VideoFile) -> Result<Vec<SplitPoint>> {
    if config.is_reference(file) {
        return Ok(config.split_points.clone());
    }

    let reference = config
        .reference_file()
        .context("reference file is not in the file list")?;

    relative_split_points(&reference.sync, &file.sync, &config.split_points)
        .with_context(|| format!("Failed to shift split points for {:?}", file.path))
}

/// Length of the segment `[start, end)`, cut short so it does not run past
/// `duration`.
pub fn segment_length(start: f64, end: f64, duration: f64) -> f64 {
    let length = end - start;
    if start + length > duration {
        (duration - start).max(0.0)
    } else {
        length
    }
}

/// `{output_folder}/{stem}_{title}{.ext}` for `input`.
pub fn output_path(output_folder: &Path, input: &Path, title: &str) -> PathBuf {
    let base = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    output_folder.join(format!("{}_{}{}", base, title, ext))
}

/// One job per consecutive pair of `points`.
pub fn plan_segments(
    input: &Path,
    points: &[SplitPoint],
    duration: f64,
    output_folder: &Path,
) -> Result<Vec<(SegmentJob, f64)>, TimecodeError> {
    points
        .windows(2)
        .map(|pair| -> Result<(SegmentJob, f64), TimecodeError> {
            let (start, end) = (&pair[0], &pair[1]);
            let length = segment_length(
                time_to_seconds(&start.time)?,
                time_to_seconds(&end.time)?,
                duration,
            );

            let job = SegmentJob {
                input: input.to_path_buf(),
                start: start.time.clone(),
                length: seconds_to_time(length),
                output: output_path(output_folder, input, &start.title),
                title: start.title.clone(),
            };
            Ok((job, length))
        })
        .collect()
}

/// Runs the whole job: every file, every segment, in configured order.
pub struct Segmenter<'a, T: MediaTools + ?Sized> {
    config: &'a Config,
    tools: &'a T,
    output_folder: PathBuf,
    dry_run: bool,
}

impl<'a, T: MediaTools + ?Sized> Segmenter<'a, T> {
    pub fn new(config: &'a Config, tools: &'a T, output_folder: impl Into<PathBuf>) -> Self {
        Self {
            config,
            tools,
            output_folder: output_folder.into(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every file.
    ///
    /// Only configuration problems and an uncreatable output folder are
    /// errors; probe and extraction failures are logged and recorded in the
    /// report.
    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;

        if self.dry_run {
            tracing::info!("[DRY RUN] Output folder: {:?}", self.output_folder);
        } else {
            std::fs::create_dir_all(&self.output_folder).with_context(|| {
                format!("Failed to create output folder: {:?}", self.output_folder)
            })?;
        }

        let mut report = RunReport::default();
        for file in &self.config.files {
            report.files.push(self.process_file(file)?);
        }

        Ok(report)
    }

    fn process_file(&self, file: &VideoFile) -> Result<FileReport> {
        tracing::info!("Processing {:?} (sync at {})", file.path, file.sync);

        let points = points_for_file(self.config, file)?;
        let (duration, probe_error) = self.probe_or_zero(&file.path);

        let jobs = plan_segments(&file.path, &points, duration, &self.output_folder)
            .with_context(|| format!("Failed to plan segments for {:?}", file.path))?;

        let segments = jobs
            .into_iter()
            .map(|(job, length_secs)| {
                let status = self.extract(&job);
                SegmentReport {
                    job,
                    length_secs,
                    status,
                }
            })
            .collect();

        Ok(FileReport {
            path: file.path.clone(),
            duration,
            probe_error,
            segments,
        })
    }

    /// A failed probe degrades to a zero duration so the rest of the run
    /// still happens.
    fn probe_or_zero(&self, path: &Path) -> (f64, Option<String>) {
        match self.tools.probe_duration(path) {
            Ok(duration) => {
                tracing::debug!("{:?}: duration {}", path, seconds_to_time(duration));
                (duration, None)
            }
            Err(e) => {
                tracing::warn!("ffprobe failed for {:?}: {}", path, e);
                log_captured(e.captured_output());
                (0.0, Some(e.to_string()))
            }
        }
    }

    fn extract(&self, job: &SegmentJob) -> SegmentStatus {
        let cmd = self.tools.extract_command(job);

        if self.dry_run {
            tracing::info!("[DRY RUN] Would run: {}", cmd.command_line());
            return SegmentStatus::Planned;
        }

        tracing::info!("Running: {}", cmd.command_line());
        match self.tools.extract_segment(job) {
            Ok(_) => SegmentStatus::Written,
            Err(e) => {
                tracing::error!("ffmpeg failed for {:?} [{}]: {}", job.input, job.title, e);
                log_captured(e.captured_output());
                SegmentStatus::Failed(e.to_string())
            }
        }
    }
}

fn log_captured(output: Option<&ToolOutput>) {
    if let Some(output) = output {
        tracing::warn!("stdout: {}", output.stdout.trim_end());
        tracing::warn!("stderr: {}", output.stderr.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_length_unclamped() {
        assert_eq!(segment_length(0.0, 300.0, 420.0), 300.0);
    }

    #[test]
    fn test_segment_length_clamped_to_duration() {
        assert_eq!(segment_length(300.0, 600.0, 420.0), 120.0);
    }

    #[test]
    fn test_segment_length_start_past_end_of_file() {
        assert_eq!(segment_length(500.0, 600.0, 420.0), 0.0);
        assert_eq!(segment_length(10.0, 20.0, 0.0), 0.0);
    }

    #[test]
    fn test_output_path() {
        let out = output_path(Path::new("/out"), Path::new("/rec/clip.mp4"), "Part 1");
        assert_eq!(out, PathBuf::from("/out/clip_Part 1.mp4"));
    }

    #[test]
    fn test_output_path_keeps_last_extension_only() {
        let out = output_path(Path::new("out"), Path::new("a.b.MKV"), "x");
        assert_eq!(out, PathBuf::from("out/a.b_x.MKV"));

        let out = output_path(Path::new("out"), Path::new("/rec/noext"), "x");
        assert_eq!(out, PathBuf::from("out/noext_x"));
    }

    #[test]
    fn test_plan_segments_clamps_last_pair() {
        let points = vec![
            SplitPoint::new("00:00:00", "A"),
            SplitPoint::new("00:05:00", "B"),
            SplitPoint::new("00:10:00", "C"),
        ];
        let jobs = plan_segments(Path::new("clip.mp4"), &points, 420.0, Path::new("out")).unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].0.length, "00:05:00");
        assert_eq!(jobs[0].0.title, "A");
        assert_eq!(jobs[1].1, 120.0);
        assert_eq!(jobs[1].0.start, "00:05:00");
        assert_eq!(jobs[1].0.length, "00:02:00");
        assert_eq!(jobs[1].0.output, PathBuf::from("out/clip_B.mp4"));
    }

    #[test]
    fn test_points_for_file() {
        let config = Config::default();
        let reference = points_for_file(&config, &config.files[0]).unwrap();
        assert_eq!(reference, config.split_points);

        let other = points_for_file(&config, &config.files[1]).unwrap();
        assert_eq!(other[0].time, "00:02:28");
    }

    #[test]
    fn test_report_counts() {
        let job = SegmentJob {
            input: PathBuf::from("a.mp4"),
            start: "00:00:00".to_string(),
            length: "00:00:01".to_string(),
            output: PathBuf::from("out/a_x.mp4"),
            title: "x".to_string(),
        };
        let seg = |status| SegmentReport {
            job: job.clone(),
            length_secs: 1.0,
            status,
        };
        let report = RunReport {
            files: vec![FileReport {
                path: PathBuf::from("a.mp4"),
                duration: 1.0,
                probe_error: None,
                segments: vec![
                    seg(SegmentStatus::Written),
                    seg(SegmentStatus::Failed("boom".to_string())),
                    seg(SegmentStatus::Written),
                ],
            }],
        };
        assert_eq!(report.written(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.planned(), 0);
    }
}
