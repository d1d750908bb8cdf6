use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::display;

fn empty_path_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<PathBuf>::deserialize(deserializer)?;
    Ok(opt.and_then(|path| {
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    }))
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config io error: {}", err),
            ConfigError::Parse(err) => write!(f, "config parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&raw).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Hex dump file to read frames from; stdin when unset.
    #[serde(deserialize_with = "empty_path_none")]
    pub path: Option<PathBuf>,
    /// Captured bytes kept per frame (0 = keep every byte).
    pub snaplen: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            path: None,
            snaplen: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum number of frames to decode (0 = unlimited).
    pub count: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig { count: 0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show the detailed multi-line view for every frame.
    pub detail: bool,
    /// Only print frames that decoded through the TCP layer.
    pub tcp_only: bool,
    /// Suppress per-frame output.
    pub quiet: bool,
    /// Payload bytes to show in the detail view.
    pub payload_bytes: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            detail: false,
            tcp_only: false,
            quiet: false,
            payload_bytes: display::PAYLOAD_DISPLAY_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.input.path, None);
        assert_eq!(config.input.snaplen, 0);
        assert_eq!(config.run.count, 0);
        assert!(!config.output.tcp_only);
        assert_eq!(config.output.payload_bytes, 8);
    }

    #[test]
    fn parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [input]
            path = "frames.hex"
            snaplen = 96

            [output]
            tcp_only = true
            "#,
        )
        .unwrap();
        assert_eq!(config.input.path, Some(PathBuf::from("frames.hex")));
        assert_eq!(config.input.snaplen, 96);
        assert!(config.output.tcp_only);
        // Untouched sections keep their defaults.
        assert_eq!(config.run.count, 0);
        assert_eq!(config.output.payload_bytes, 8);
    }

    #[test]
    fn empty_path_treated_as_none() {
        let config: Config = toml::from_str("[input]\npath = \"\"\n").unwrap();
        assert_eq!(config.input.path, None);
    }
}
