mod config;
mod core;
mod decoder;
mod error;

use clap::{Parser, Subcommand};
use anyhow::{Result, Context};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::core::folders::create_folders;
use crate::core::sampler::sample_frames;
use crate::core::table::CsvTable;
use crate::decoder::{FrameSource, VideoDecoder};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file; command-line flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    #[arg(short, long, global = true)]
    out_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    threshold: Option<f64>,
    #[arg(long, global = true)]
    max_name_len: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one folder per mapped CSV row
    Folders {
        #[arg(long, default_value_t = false, help = "Also create a sub-folder for every row value at or above the threshold")]
        value_folders: bool,
    },
    /// Save video frames at a fixed interval, named after the CSV rows
    Frames {
        #[arg(short, long)]
        video: Option<PathBuf>,
        #[arg(short, long, help = "Seconds between samples")]
        interval: Option<f64>,
        #[arg(short, long, help = "Image extension, e.g. png or .jpg")]
        ext: Option<String>,
    },
    /// Print the video's frame rate, frame count and duration
    Probe {
        #[arg(short, long)]
        video: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env).with_target(false).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;

    match &cli.command {
        Commands::Folders { value_folders } => {
            let csv = config.require_csv()?;
            let table = CsvTable::from_path(csv)
                .with_context(|| format!("Failed to read CSV {}", csv.display()))?;
            let report = create_folders(&config, &table, *value_folders)?;
            info!("{} folders created, {} rows skipped", report.created(), report.skipped());
        }
        Commands::Frames { .. } => {
            let csv = config.require_csv()?;
            let table = CsvTable::from_path(csv)
                .with_context(|| format!("Failed to read CSV {}", csv.display()))?;
            let mut decoder = VideoDecoder::open(config.require_video()?)?;

            let interrupted = Arc::new(AtomicBool::new(false));
            let r = interrupted.clone();
            ctrlc::set_handler(move || {
                r.store(true, Ordering::SeqCst);
            }).context("Error registering Ctrl-C handler")?;

            let summary = sample_frames(&mut decoder, &table, &config, &interrupted)?;
            info!(
                "{} planned, {} attempted, {} saved, {} skipped{}",
                summary.planned,
                summary.attempted,
                summary.saved,
                summary.skipped,
                if summary.cancelled { " (interrupted)" } else { "" }
            );
        }
        Commands::Probe { .. } => {
            let decoder = VideoDecoder::open(config.require_video()?)?;
            let info = decoder.info();
            let mut report = serde_json::to_value(info)?;
            report["duration_secs"] = json!(info.duration_secs());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(csv) = &cli.csv {
        config.csv_path = Some(csv.clone());
    }
    if let Some(out_dir) = &cli.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(max_name_len) = cli.max_name_len {
        config.max_name_len = max_name_len;
    }
    match &cli.command {
        Commands::Frames { video, interval, ext } => {
            if let Some(video) = video {
                config.video_path = Some(video.clone());
            }
            if let Some(interval) = interval {
                config.interval_secs = *interval;
            }
            if let Some(ext) = ext {
                config.ext = ext.clone();
            }
        }
        Commands::Probe { video } => {
            if let Some(video) = video {
                config.video_path = Some(video.clone());
            }
        }
        Commands::Folders { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let mut config = Config::from_json(
            r#"{"interval_secs": 0, "threshold": 10, "ext": "jpg", "csv_path": "file.csv"}"#,
        )
        .unwrap();
        let cli = Cli::try_parse_from([
            "framecut", "--threshold", "500", "frames", "--interval", "0.25", "--video", "v.mp4",
        ])
        .unwrap();

        apply_overrides(&mut config, &cli);

        assert!(config.validate().is_ok());
        assert_eq!(config.interval_secs, 0.25);
        assert_eq!(config.threshold, 500.0);
        assert_eq!(config.ext, "jpg");
        assert_eq!(config.csv_path, Some(PathBuf::from("file.csv")));
        assert_eq!(config.video_path, Some(PathBuf::from("v.mp4")));
    }

    #[test]
    fn test_file_values_kept_without_flags() {
        let mut config = Config::from_json(r#"{"out_dir": "from_file"}"#).unwrap();
        let cli = Cli::try_parse_from(["framecut", "folders"]).unwrap();

        apply_overrides(&mut config, &cli);

        assert_eq!(config.out_dir, PathBuf::from("from_file"));
        assert_eq!(config.interval_secs, crate::config::DEFAULT_INTERVAL_SECS);
    }
}
