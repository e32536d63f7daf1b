//! Configuration file handling for image-to-ascii.
//!
//! Loads configuration from `<config dir>/image-to-ascii/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ascii::ScalarPolicy;

/// Default directory scanned for images.
pub const DEFAULT_INPUT_DIR: &str = "images";
/// Default directory receiving `<name>_ascii.txt` files.
pub const DEFAULT_OUTPUT_DIR: &str = "ascii_conversions";

/// Configuration file structure for image-to-ascii.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct InputConfig {
    #[serde(default = "default_input_dir")]
    pub directory: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: default_input_dir(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct RenderConfig {
    /// Target width in columns. Prompted for when unset.
    #[serde(default)]
    pub width: Option<u32>,
    /// Use the inverted ramp. Prompted for when unset.
    #[serde(default)]
    pub invert: Option<bool>,
    #[serde(default)]
    pub grayscale: ScalarPolicy,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("image-to-ascii").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".image-to-ascii.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input.directory, PathBuf::from("images"));
        assert_eq!(config.output.directory, PathBuf::from("ascii_conversions"));
        assert_eq!(config.render.width, None);
        assert_eq!(config.render.invert, None);
        assert_eq!(config.render.grayscale, ScalarPolicy::Skip);
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[input]
directory = "photos"

[output]
directory = "out"

[render]
width = 120
invert = true
grayscale = "expand"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.input.directory, PathBuf::from("photos"));
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.render.width, Some(120));
        assert_eq!(config.render.invert, Some(true));
        assert_eq!(config.render.grayscale, ScalarPolicy::Expand);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nwidth = 80").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.input.directory, PathBuf::from("images"));
        assert_eq!(config.render.width, Some(80));
        assert_eq!(config.render.invert, None);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\ngrayscale = \"sepia\"").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
