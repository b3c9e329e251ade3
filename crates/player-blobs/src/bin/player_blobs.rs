use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use player_blobs::core::parse_level;
use player_blobs::detect::{self, DetectError};
use player_blobs::extract::{ExtractConfig, ExtractIoError, ExtractReport};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

/// Extract player candidates from a foreground mask and its video frame.
#[derive(Parser, Debug)]
#[command(name = "player-blobs", version, about, long_about = None)]
struct Cli {
    /// Foreground mask image (nonzero = foreground)
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Original frame image, same size as the mask
    #[arg(long)]
    image: Option<PathBuf>,

    /// JSON extraction config; command-line flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame index recorded in the report
    #[arg(long)]
    frame_index: Option<u64>,

    /// Report path [default: player_blobs_report.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for per-player PNG crops
    #[arg(long)]
    crops_dir: Option<PathBuf>,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit log events as JSON lines
    #[cfg(feature = "tracing")]
    #[arg(long)]
    log_json: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("unknown log level `{0}`")]
    LogLevel(String),
    #[error("no {0} path given (use --{0} or set it in the config)")]
    MissingInput(&'static str),
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Report(#[from] ExtractIoError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let level =
        parse_level(&cli.log_level).ok_or_else(|| CliError::LogLevel(cli.log_level.clone()))?;
    init_logging(&cli, level);

    let mut cfg = match &cli.config {
        Some(path) => ExtractConfig::load_json(path)?,
        None => ExtractConfig::default(),
    };
    if let Some(mask) = &cli.mask {
        cfg.mask_path = Some(mask.display().to_string());
    }
    if let Some(image) = &cli.image {
        cfg.image_path = Some(image.display().to_string());
    }
    if let Some(index) = cli.frame_index {
        cfg.frame_index = index;
    }
    if let Some(output) = &cli.output {
        cfg.output_path = Some(output.display().to_string());
    }

    let mask_path = cfg.mask_path.clone().ok_or(CliError::MissingInput("mask"))?;
    let image_path = cfg.image_path.clone().ok_or(CliError::MissingInput("image"))?;

    let frame = detect::load_frame(cfg.frame_index, &mask_path, &image_path)?;
    let extractor = cfg.build_extractor();
    let labels = extractor.label(&frame.mask());
    let players = extractor.extract_labeled(&frame, &labels);
    log::info!(
        "frame {}: {} blobs, {} player candidates",
        frame.index(),
        labels.blob_count(),
        players.len()
    );

    let report = ExtractReport::new(&cfg, &labels, &players);
    let output_path = cfg.output_path();
    report.write_json(&output_path)?;
    println!(
        "found {} players, wrote report to {}",
        players.len(),
        output_path.display()
    );

    if let Some(dir) = &cli.crops_dir {
        let written = detect::save_candidate_crops(&players, dir)?;
        println!("wrote {} crops to {}", written.len(), dir.display());
    }
    Ok(())
}

fn init_logging(cli: &Cli, level: log::LevelFilter) {
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        player_blobs::core::init_tracing(level, cli.log_json);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = cli;
        let _ = player_blobs::core::init_with_level(level);
    }
}
