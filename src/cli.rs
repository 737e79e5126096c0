use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "syncsplit")]
#[command(
    author,
    version,
    about = "Split synchronized video recordings into labeled segments"
)]
pub struct Cli {
    /// Folder to save split video files
    #[arg(long, value_name = "DIR", required_unless_present = "check_tools")]
    pub output_folder: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Show the ffmpeg commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Check that ffmpeg and ffprobe are available, then exit
    #[arg(long)]
    pub check_tools: bool,
}
