//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/shelf/config.toml)
//! 3. Environment variables (SHELF_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::favorites::FAVORITES_STORAGE_KEY;
use crate::storage::is_valid_key;

/// Environment variable prefix
const ENV_PREFIX: &str = "SHELF";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for local data (favorites, logs)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Dataset file to use instead of the bundled catalog
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,

    /// Storage key for the favorites list
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,

    /// Whether book selections are reported
    #[serde(default)]
    pub analytics: bool,

    /// Log file for TUI mode (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset_path: None,
            favorites_key: default_favorites_key(),
            analytics: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (SHELF_DATA_DIR, SHELF_DATASET, SHELF_ANALYTICS, ...)
    /// 2. Config file (~/.config/shelf/config.toml or SHELF_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.check_favorites_key();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.check_favorites_key();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Fall back to the default favorites key if the file holds one that
    /// storage would reject
    fn check_favorites_key(&mut self) {
        if !is_valid_key(&self.favorites_key) {
            warn!(
                "Config favorites_key '{}' is not a usable storage key; using '{}'",
                self.favorites_key, FAVORITES_STORAGE_KEY
            );
            self.favorites_key = default_favorites_key();
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // SHELF_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // SHELF_DATASET
        if let Ok(val) = std::env::var(format!("{}_DATASET", ENV_PREFIX)) {
            self.dataset_path = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // SHELF_FAVORITES_KEY
        if let Ok(val) = std::env::var(format!("{}_FAVORITES_KEY", ENV_PREFIX)) {
            if is_valid_key(&val) {
                self.favorites_key = val;
            } else if !val.is_empty() {
                warn!(
                    "Ignoring {}_FAVORITES_KEY '{}': not a usable storage key",
                    ENV_PREFIX, val
                );
            }
        }

        // SHELF_ANALYTICS
        if let Ok(val) = std::env::var(format!("{}_ANALYTICS", ENV_PREFIX)) {
            self.analytics = val.eq_ignore_ascii_case("true") || val == "1";
        }
    }

    /// Ensure data directory exists
    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with SHELF_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shelf")
            .join("config.toml")
    }

    /// Get the path of the TUI log file
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelf")
}

fn default_favorites_key() -> String {
    FAVORITES_STORAGE_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "SHELF_DATA_DIR",
        "SHELF_DATASET",
        "SHELF_FAVORITES_KEY",
        "SHELF_ANALYTICS",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.analytics);
        assert!(config.dataset_path.is_none());
        assert_eq!(config.favorites_key, "designBookshelfFavorites");
        assert!(config.data_dir.ends_with("shelf"));
    }

    #[test]
    fn test_log_path() {
        let mut config = Config::default();
        assert!(config.log_path().ends_with("debug.log"));

        config.log_file = Some(PathBuf::from("/tmp/shelf.log"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/shelf.log"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("SHELF_DATA_DIR", "/tmp/shelf-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/shelf-test"));
    }

    #[test]
    fn test_env_override_analytics() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        assert!(!config.analytics);

        env::set_var("SHELF_ANALYTICS", "true");
        config.apply_env_overrides();
        assert!(config.analytics);

        env::set_var("SHELF_ANALYTICS", "1");
        config.analytics = false;
        config.apply_env_overrides();
        assert!(config.analytics);

        env::set_var("SHELF_ANALYTICS", "false");
        config.apply_env_overrides();
        assert!(!config.analytics);
    }

    #[test]
    fn test_env_override_dataset() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("SHELF_DATASET", "/data/books.json");
        config.apply_env_overrides();
        assert_eq!(config.dataset_path, Some(PathBuf::from("/data/books.json")));

        // Empty string clears it
        env::set_var("SHELF_DATASET", "");
        config.apply_env_overrides();
        assert!(config.dataset_path.is_none());
    }

    #[test]
    fn test_env_override_favorites_key_ignores_empty() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_FAVORITES_KEY", "");
        config.apply_env_overrides();
        assert_eq!(config.favorites_key, "designBookshelfFavorites");

        env::set_var("SHELF_FAVORITES_KEY", "work");
        config.apply_env_overrides();
        assert_eq!(config.favorites_key, "work");
    }

    #[test]
    fn test_env_override_favorites_key_rejects_unusable_key() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_FAVORITES_KEY", "my favorites");
        config.apply_env_overrides();
        assert_eq!(config.favorites_key, "designBookshelfFavorites");
    }

    #[test]
    fn test_file_favorites_key_falls_back_when_unusable() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::load_from_str(r#"favorites_key = "../escape""#).unwrap();
        assert_eq!(config.favorites_key, "designBookshelfFavorites");

        let config = Config::load_from_str(r#"favorites_key = "work""#).unwrap();
        assert_eq!(config.favorites_key, "work");
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/shelf"),
            dataset_path: Some(PathBuf::from("/data/books.json")),
            favorites_key: "favs".to_string(),
            analytics: true,
            log_file: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("dataset_path"));
        assert!(toml_str.contains("analytics"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.dataset_path, config.dataset_path);
        assert_eq!(parsed.favorites_key, config.favorites_key);
        assert_eq!(parsed.analytics, config.analytics);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            analytics = true
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert!(config.analytics);
        assert_eq!(config.favorites_key, "designBookshelfFavorites");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(!config.analytics);
        assert!(config.dataset_path.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            analytics: true,
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(loaded.data_dir, temp_dir.path());
        assert!(loaded.analytics);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let _guard = EnvGuard::new(ENV_VARS);
        assert!(Config::load_from_str("data_dir = [").is_err());
    }
}
