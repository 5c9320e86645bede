//! Configuration loading
//!
//! Applications describe their setup in RON or TOML files and deserialize
//! them into their own serde structs. The format is picked from the file
//! extension. [`load_or_default`] is the forgiving variant for tools that
//! should come up with defaults rather than fail on a missing file.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors produced while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid RON
    #[error("failed to parse RON config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// The file is not valid TOML
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension maps to no supported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Loads a configuration file, picking the format from its extension
///
/// Supports `.ron` and `.toml`.
pub fn load<T>(path: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let text = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();

    match extension {
        "ron" => Ok(ron::from_str(&text)?),
        "toml" => Ok(toml::from_str(&text)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Loads a configuration file, falling back to `T::default()` on any error
///
/// The failure is logged, not surfaced, so a missing or broken file leaves
/// the application running with its built-in defaults.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match load(path) {
        Ok(config) => config,
        Err(error) => {
            log::warn!("using default config, {} failed: {}", path.display(), error);
            T::default()
        }
    }
}
