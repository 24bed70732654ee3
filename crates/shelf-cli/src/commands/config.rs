//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use shelf_core::storage::is_valid_key;
use shelf_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "dataset_path": config.dataset_path,
                    "favorites_key": config.favorites_key,
                    "analytics": config.analytics,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:      {}", config.data_dir.display());
            println!(
                "  dataset_path:  {}",
                config
                    .dataset_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(bundled)".to_string())
            );
            println!("  favorites_key: {}", config.favorites_key);
            println!("  analytics:     {}", config.analytics);
            println!(
                "  log_file:      {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "dataset_path" => {
            config.dataset_path = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "favorites_key" => {
            if !is_valid_key(value) {
                bail!(
                    "Invalid favorites_key '{}'. Use letters, digits, '-', '_' or '.', \
                     not starting with '.'",
                    value
                );
            }
            config.favorites_key = value.to_string();
        }
        "analytics" => {
            config.analytics = value
                .parse()
                .context("Invalid value for analytics. Use 'true' or 'false'.")?;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, dataset_path, favorites_key, analytics, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "analytics", "true").unwrap();
        assert!(config.analytics);

        apply(&mut config, "dataset_path", "/data/books.json").unwrap();
        assert_eq!(config.dataset_path, Some(PathBuf::from("/data/books.json")));
        apply(&mut config, "dataset_path", "none").unwrap();
        assert!(config.dataset_path.is_none());

        apply(&mut config, "favorites_key", "work").unwrap();
        assert_eq!(config.favorites_key, "work");
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, "analytics", "maybe").is_err());
        assert!(apply(&mut config, "favorites_key", "").is_err());
        assert!(apply(&mut config, "favorites_key", "my favorites").is_err());
        assert!(apply(&mut config, "favorites_key", "a/b").is_err());
        assert_eq!(config.favorites_key, "designBookshelfFavorites");
        assert!(apply(&mut config, "theme", "dark").is_err());
    }
}
