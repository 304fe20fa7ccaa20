//! Ergonomic Analysis CLI
//!
//! Reads pose keypoints exported by a pose-estimation model, runs the
//! analysis pipeline and prints the report as JSON.

pub mod args;
pub mod input;
pub mod settings;

use std::fs;
use std::path::PathBuf;

use ergo_pipeline::{AnalysisReport, ErgoPipeline, ObserverError, PipelineError};
use keypoints::PoseSequence;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub use args::Args;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid pose input: {0}")]
    Input(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Failed to install log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize logging on stderr, filtered by `RUST_LOG` (default `info`)
pub fn init_logging(json: bool) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Load settings and input, then analyze
pub fn run(args: &Args) -> Result<AnalysisReport, CliError> {
    let mut config = settings::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    let pipeline = ErgoPipeline::new(config)?;

    let json = fs::read_to_string(&args.input).map_err(|source| CliError::Io {
        path: args.input.clone(),
        source,
    })?;
    let frames = input::parse_frames(&json)?;
    let sequence = PoseSequence::from_raw(frames, args.dimensionality());
    info!(
        path = %args.input.display(),
        frames = sequence.len(),
        undetected = sequence.undetected_count(),
        "Pose input loaded"
    );

    let progress = |fraction: f64| -> Result<(), ObserverError> {
        debug!(percent = (fraction * 100.0).round(), "Classification progress");
        Ok(())
    };
    Ok(pipeline.run(&sequence, Some(&progress)))
}

/// Render the report as JSON
pub fn render(report: &AnalysisReport, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}
