//! Configuration loading errors.
//!
//! The simulation itself never fails; only reading tuning/settings files from
//! disk can go wrong, and those errors surface here.

use std::fmt;
use std::path::PathBuf;

/// Error returned when a tuning or settings file cannot be loaded
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON for the expected shape.
    Parse {
        /// Where the JSON came from (file path or `"<inline>"`).
        origin: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config '{}': {}", path.display(), source)
            }
            ConfigError::Parse { origin, source } => {
                write!(f, "invalid config in {}: {}", origin, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Read a JSON config file and deserialize it
pub(crate) fn load_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        origin: path.display().to_string(),
        source,
    })
}
