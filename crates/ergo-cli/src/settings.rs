//! Layered configuration loading

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use ergo_pipeline::PipelineConfig;
use tracing::debug;

/// Prefix of environment overrides (`ERGO__TIME_BASE__FPS=25`)
pub const ENV_PREFIX: &str = "ERGO";

/// Load pipeline settings: defaults, then the optional TOML file, then
/// `ERGO__*` environment variables.
pub fn load(path: Option<&Path>) -> Result<PipelineConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        debug!(path = %path.display(), "Loading configuration file");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml));
    }
    finish(builder.add_source(environment()))
}

/// Parse settings from TOML text over the defaults
pub fn from_toml(text: &str) -> Result<PipelineConfig, ConfigError> {
    finish(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<PipelineConfig, ConfigError> {
    builder.build()?.try_deserialize()
}
