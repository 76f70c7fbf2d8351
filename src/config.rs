//! Application configuration.

use crate::consts::cli_consts::polling::POLL_INTERVAL_MS;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{env, fs, path::Path, path::PathBuf};

/// Environment variable holding the Instantly bearer credential.
pub const API_KEY_VAR: &str = "INSTANTLY_API_KEY";
/// Environment variable naming a file that holds the credential (container secrets).
pub const API_KEY_FILE_VAR: &str = "INSTANTLY_API_KEY_FILE";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Overrides the base URL implied by the environment.
    pub api_base_url: Option<String>,
    /// Sent as `?id=` on analytics requests to scope the result.
    pub analytics_scope_id: Option<String>,
    /// Campaign shown by `watch` when none is given on the command line.
    pub default_campaign_id: Option<String>,
    /// Milliseconds between scheduled refreshes.
    pub poll_interval_ms: u64,
    /// Collapse transition timings regardless of the device.
    pub reduced_motion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            analytics_scope_id: None,
            default_campaign_id: None,
            poll_interval_ms: POLL_INTERVAL_MS,
            reduced_motion: false,
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        // A zero interval would spin the poller.
        Duration::from_millis(self.poll_interval_ms.max(1_000))
    }

    /// Reads the JSON file at `path`. Malformed JSON is `InvalidData`.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Like [`Config::load_from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        match Self::load_from_file(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            other => other,
        }
    }

    /// Writes pretty JSON to `path`, creating missing directories and
    /// replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

/// Location of the config file, `~/.prospecting-hub/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home_path.join(".prospecting-hub").join("config.json"))
}

/// Reads the API key from `INSTANTLY_API_KEY`, falling back to the file named by
/// `INSTANTLY_API_KEY_FILE`. Blank values count as absent.
pub fn resolve_api_key() -> Option<String> {
    if let Ok(key) = env::var(API_KEY_VAR) {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Some(key);
        }
    }

    let path = env::var(API_KEY_FILE_VAR).ok()?;
    match fs::read_to_string(&path) {
        Ok(contents) => {
            let key = contents.trim().to_string();
            (!key.is_empty()).then_some(key)
        }
        Err(e) => {
            log::warn!("Could not read {}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn with_campaign(id: &str) -> Config {
        Config {
            default_campaign_id: Some(id.to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn save_creates_parent_dirs_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".prospecting-hub").join("config.json");

        let config = with_campaign("ce377a89-a781-474f-9425-f50bdac55b79");
        config.save(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn later_save_replaces_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        with_campaign("first").save(&path).unwrap();

        let replacement = Config {
            poll_interval_ms: 5_000,
            reduced_motion: true,
            ..Config::default()
        };
        replacement.save(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, replacement);
        assert_eq!(loaded.default_campaign_id, None);
    }

    #[test]
    fn malformed_file_is_invalid_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn absent_fields_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"reduced_motion": true}"#).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.reduced_motion);
        assert_eq!(loaded.poll_interval_ms, POLL_INTERVAL_MS);
        assert_eq!(loaded.default_campaign_id, None);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let loaded = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn poll_interval_has_a_floor() {
        let config = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(Config::default().poll_interval(), Duration::from_secs(30));
    }
}
