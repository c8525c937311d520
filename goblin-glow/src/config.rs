//! Loading and printing particle configuration files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use goblin_particles::ParticleConfig;

/// Serialization format for configuration files
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse a configuration from text
///
/// Missing keys fall back to the defaults, so a file only needs the values
/// it changes.
pub fn parse_config(text: &str, format: ConfigFormat) -> Result<ParticleConfig> {
    let config: ParticleConfig = match format {
        ConfigFormat::Json => serde_json::from_str(text).context("Invalid JSON configuration")?,
        ConfigFormat::Yaml => {
            serde_yaml_ng::from_str(text).context("Invalid YAML configuration")?
        }
    };
    config
        .validate()
        .context("Configuration values out of range")?;
    Ok(config)
}

/// Load a configuration file, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<ParticleConfig> {
    let Some(path) = path else {
        return Ok(ParticleConfig::default());
    };

    let Some(format) = ConfigFormat::from_path(path) else {
        bail!(
            "Cannot tell the format of {}; use a .json, .yaml or .yml extension",
            path.display()
        );
    };

    log::info!("Loading particle configuration from {}", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&text, format).with_context(|| format!("In config file: {}", path.display()))
}

/// Render a configuration in the requested format
pub fn render_config(config: &ParticleConfig, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")
        }
        ConfigFormat::Yaml => {
            serde_yaml_ng::to_string(config).context("Failed to serialize configuration")
        }
    }
}
