//! # syncsplit-av
//!
//! External media tool plumbing for syncsplit.
//!
//! This crate provides:
//! - Tool detection ([`check_tools`], [`resolve_tool`]) for ffmpeg and ffprobe
//! - Command execution with captured stdio ([`ToolCommand`])
//! - Container duration lookup via ffprobe ([`probe::probe_duration`])
//! - Stream-copy segment extraction via ffmpeg ([`extract::extract_command`])
//! - The [`MediaTools`] seam the segmentation driver is written against
//!
//! ## Features
//!
//! - `tracing` - Emit tracing events for tool invocations
//!
//! ## Example
//!
//! ```no_run
//! use syncsplit_av::{FfmpegTools, MediaTools};
//!
//! let tools = FfmpegTools::discover(None, None);
//! let seconds = tools.probe_duration("/path/to/video.mp4".as_ref())?;
//! println!("Duration: {seconds}s");
//! # Ok::<(), syncsplit_av::Error>(())
//! ```

mod backend;
pub mod command;
mod error;
pub mod extract;
pub mod probe;
pub mod tools;

// Re-exports
pub use backend::{FfmpegTools, MediaTools};
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use extract::SegmentJob;
pub use tools::{check_tool, check_tools, require_tool, resolve_tool, ToolInfo};
