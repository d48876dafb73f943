//! Configuration loading for Vignette.
//!
//! Configuration is loaded from TOML files with environment variable
//! overrides (prefix `VIGNETTE_`).

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct VignetteConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_directory() -> String {
    "images".to_string()
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_generator")]
    pub default: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default: default_generator(),
        }
    }
}

fn default_generator() -> String {
    "scene".to_string()
}

impl VignetteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("VIGNETTE").separator("_"))
            .build()?;

        let vignette_config: VignetteConfig = config.try_deserialize().unwrap_or_default();
        Ok(vignette_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = VignetteConfig::default();
        assert_eq!(config.output.directory, "images");
        assert_eq!(config.output.width, 1024);
        assert_eq!(config.output.height, 1024);
        assert_eq!(config.generator.default, "scene");
    }

    #[test]
    fn load_without_files_falls_back_to_defaults() {
        let config = VignetteConfig::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.generator.default, "scene");
    }
}
