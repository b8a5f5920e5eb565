mod config;
pub mod json_file;

pub use config::{Config, SmoothingConfig, StorageConfig};
pub use json_file::{JsonFileStore, SeriesPersistence};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the dayseries data directory, creating it if needed.
///
/// `DAYSERIES_HOME` wins when set. Otherwise `~/.config/dayseries/`, or
/// `~/.config/dayseries-dev/` when `DAYSERIES_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DAYSERIES_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAYSERIES_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dayseries-dev")
            } else {
                base_dir.join("dayseries")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
