mod cli;

use syncsplit::{
    config::{self, ToolsConfig},
    segmenter::Segmenter,
    timecode::seconds_to_time,
    RunReport, SegmentStatus,
};
use syncsplit_av::{FfmpegTools, MediaTools};

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "syncsplit=debug,syncsplit_av=debug".to_string()
        } else {
            "syncsplit=info,syncsplit_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    // clap requires --output-folder unless --check-tools is given
    match cli.output_folder {
        Some(output_folder) if !cli.check_tools => {
            run(&output_folder, cli.config.as_deref(), cli.dry_run)
        }
        _ => check_tools(cli.config.as_deref()),
    }
}

fn run(output_folder: &Path, config_path: Option<&Path>, dry_run: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if let Some(reference) = config.reference_file() {
        tracing::info!(
            "Reference file: {}, Sync at: {}",
            reference.path.display(),
            reference.sync
        );
    }

    let tools = FfmpegTools::discover(
        config.tools.ffmpeg_path.as_deref(),
        config.tools.ffprobe_path.as_deref(),
    );
    tracing::debug!(
        "Using ffmpeg at {:?}, ffprobe at {:?}",
        tools.ffmpeg(),
        tools.ffprobe()
    );

    let report = Segmenter::new(&config, &tools, output_folder)
        .dry_run(dry_run)
        .run()?;

    print_report(&report, &tools, dry_run);
    Ok(())
}

fn print_report(report: &RunReport, tools: &FfmpegTools, dry_run: bool) {
    for file in &report.files {
        println!("File: {}", file.path.display());
        match file.probe_error {
            Some(_) => println!("  Duration: unknown (probe failed)"),
            None => println!("  Duration: {}", seconds_to_time(file.duration)),
        }

        for segment in &file.segments {
            let status = match &segment.status {
                SegmentStatus::Written => "ok",
                SegmentStatus::Failed(_) => "FAILED",
                SegmentStatus::Planned => "planned",
            };
            println!(
                "  [{}] {} ({} from {})",
                status,
                segment.job.output.display(),
                segment.job.length,
                segment.job.start
            );
            if dry_run {
                println!("      {}", tools.extract_command(&segment.job).command_line());
            }
        }
    }

    println!();
    if dry_run {
        println!("[DRY RUN] Would write {} segments", report.planned());
    } else {
        println!(
            "Wrote {} segments, {} failed",
            report.written(),
            report.failed()
        );
    }
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let tools_config = match config::load_config_or_default(config_path) {
        Ok(config) => config.tools,
        Err(e) => {
            tracing::warn!("Ignoring config for tool check: {:#}", e);
            ToolsConfig::default()
        }
    };

    let tools = syncsplit_av::check_tools(
        tools_config.ffmpeg_path.as_deref(),
        tools_config.ffprobe_path.as_deref(),
    );
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to split videos.");
    }

    Ok(())
}
