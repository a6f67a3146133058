//! Driver configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for the terminal driver.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding avatar images.
    #[serde(default = "default_avatar_dir")]
    avatar_dir: PathBuf,

    /// File extensions counted as avatars (case-insensitive).
    #[serde(default = "default_avatar_extensions")]
    avatar_extensions: Vec<String>,

    /// Print the final board as JSON by default.
    #[serde(default)]
    json_output: bool,
}

fn default_avatar_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_avatar_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg"].map(String::from).to_vec()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            avatar_dir: default_avatar_dir(),
            avatar_extensions: default_avatar_extensions(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Reads and parses a TOML config file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Reading driver config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            avatar_dir = %config.avatar_dir.display(),
            extensions = config.avatar_extensions.len(),
            "Driver config loaded"
        );
        Ok(config)
    }

    /// Loads `path` if given, defaults otherwise.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replaces the avatar directory.
    pub fn with_avatar_dir(mut self, dir: PathBuf) -> Self {
        self.avatar_dir = dir;
        self
    }
}

/// Why the driver config could not be loaded.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[display("Cannot read config {}: {source}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`AppConfig`].
    #[display("Cannot parse config {}: {source}", path.display())]
    Parse {
        /// File that was read.
        path: PathBuf,
        /// TOML decoding failure.
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.avatar_dir(), Path::new("images"));
        assert_eq!(config.avatar_extensions(), &["png", "jpg", "jpeg"]);
        assert!(!config.json_output());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "avatar_dir = \"assets/faces\"\njson_output = true").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.avatar_dir(), Path::new("assets/faces"));
        assert_eq!(config.avatar_extensions().len(), 3);
        assert!(*config.json_output());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "avatar_dir = [").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
        assert!(err.to_string().starts_with("Cannot parse config"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/tictactoe.toml"))).unwrap_err();
        match err {
            ConfigError::Read { path, source } => {
                assert_eq!(path, Path::new("/nonexistent/tictactoe.toml"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected a read error, got {other}"),
        }
    }
}
