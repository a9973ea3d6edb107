mod config;

pub use config::{Config, DefaultsConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the trainroom config directory, creating it if needed.
///
/// `TRAINROOM_CONFIG_DIR` overrides the location outright. Otherwise the
/// directory is `~/.config/trainroom[-dev]/`, with `TRAINROOM_ENV=dev`
/// selecting the development directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TRAINROOM_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TRAINROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("trainroom-dev")
            } else {
                base_dir.join("trainroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
