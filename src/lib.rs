//! Syncsplit - cut synchronized recordings at shared timestamps
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod offset;
pub mod segmenter;
pub mod timecode;

pub use config::{Config, ConfigError, SplitPoint, ToolsConfig, VideoFile};
pub use segmenter::{RunReport, SegmentStatus, Segmenter};
