//! Configuration module for ask-relay
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Locate and load settings.
///
/// An explicit path wins, then `ASK_RELAY_SETTINGS_PATH`, then the default
/// locations. Falls back to defaults when no file is found. Environment
/// overrides are applied in every case.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match find_settings_file(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn find_settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("ASK_RELAY_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut candidates = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("ask-relay/settings.yml"));
    }

    candidates.into_iter().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/tmp/custom-settings.yml");
        assert_eq!(find_settings_file(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        assert!(load(Some(Path::new("/nonexistent/ask-relay/settings.yml"))).is_err());
    }
}
