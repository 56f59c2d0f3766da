use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// BBC three-day forecast feed, keyed by location identifier.
pub const DEFAULT_FEED_URL: &str =
    "https://weather-broker-cdn.api.bbci.co.uk/en/forecast/rss/3day/{location}";

/// Top-level configuration stored on disk.
///
/// The location itself is never configured here: it is an explicit argument
/// to every command, so two invocations for different locations share
/// nothing but this file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Feed URL template; `{location}` is replaced with the location id.
    pub feed_url: Option<String>,

    /// Where cached feeds are written. Defaults to the platform cache dir.
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// The feed URL for a location, from the configured template or the
    /// built-in BBC default.
    pub fn feed_url_for(&self, location: &str) -> String {
        self.feed_url
            .as_deref()
            .unwrap_or(DEFAULT_FEED_URL)
            .replace("{location}", location)
    }

    /// The cache file for a location, creating the cache directory if
    /// needed.
    pub fn cache_file(&self, location: &str) -> Result<PathBuf> {
        let dir = match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => project_dirs()?.cache_dir().to_path_buf(),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory: {}", dir.display()))?;
        Ok(dir.join(format!("{location}.rss")))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "wxrss", "wxrss")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_substitutes_location() {
        let cfg = Config::default();
        assert_eq!(
            cfg.feed_url_for("2643123"),
            "https://weather-broker-cdn.api.bbci.co.uk/en/forecast/rss/3day/2643123"
        );
    }

    #[test]
    fn configured_template_overrides_default() {
        let cfg = Config {
            feed_url: Some("http://feeds.test/weather/{location}.rss".to_string()),
            ..Config::default()
        };
        assert_eq!(
            cfg.feed_url_for("ls13"),
            "http://feeds.test/weather/ls13.rss"
        );
    }

    #[test]
    fn cache_file_uses_configured_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config {
            cache_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        let path = cfg.cache_file("ls13").expect("cache path");
        assert_eq!(path, dir.path().join("ls13.rss"));
        assert!(dir.path().exists());
    }
}
