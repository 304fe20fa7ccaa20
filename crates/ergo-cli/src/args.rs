//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use ergo_pipeline::PipelineConfig;
use keypoints::Dimensionality;

/// Ergonomic risk analysis of a pose keypoint sequence
#[derive(Parser, Debug)]
#[command(name = "ergo-analyze", author, version, about, long_about = None)]
#[command(after_help = r#"Examples:
    ergo-analyze --input poses.json
    ergo-analyze --input poses.json --config ergo.toml --pretty
    ergo-analyze -i poses.json --fps 25 --frame-skip 2 --min-seconds 4"#)]
pub struct Args {
    /// Pose keypoints JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keypoints are 2D (default)
    #[arg(long, conflicts_with = "spatial")]
    pub planar: bool,

    /// Keypoints are 3D
    #[arg(long)]
    pub spatial: bool,

    /// Video frame rate
    #[arg(long)]
    pub fps: Option<f64>,

    /// Only every n-th video frame was analyzed
    #[arg(long)]
    pub frame_skip: Option<u32>,

    /// Minimum event persistence in seconds
    #[arg(long)]
    pub min_seconds: Option<f64>,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    pub json_logs: bool,

    /// Pretty-print the report
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Args {
    pub fn dimensionality(&self) -> Dimensionality {
        if self.spatial {
            Dimensionality::Spatial
        } else {
            Dimensionality::Planar
        }
    }

    /// Apply flag overrides on top of file and environment settings
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(fps) = self.fps {
            config.time_base.fps = fps;
        }
        if let Some(frame_skip) = self.frame_skip {
            config.time_base.frame_skip = frame_skip;
        }
        if let Some(min_seconds) = self.min_seconds {
            config.min_persistence_seconds = min_seconds;
        }
    }
}
