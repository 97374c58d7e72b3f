//! Application configuration management.
//!
//! Configuration is stored at `~/.config/learnshelf/config.json`; a missing
//! file means defaults. Environment variables override the file:
//!
//! - `LEARNSHELF_API_URL`: course service base URL
//! - `LEARNSHELF_API_TOKEN`: bearer token for the course service
//! - `LEARNSHELF_TRUST_CACHE`: `true`/`false` (also `1`/`0`, `yes`/`no`, `on`/`off`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::client::DEFAULT_API_BASE_URL;
use crate::loader::LoaderConfig;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "learnshelf";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const ENV_API_URL: &str = "LEARNSHELF_API_URL";
const ENV_API_TOKEN: &str = "LEARNSHELF_API_TOKEN";
const ENV_TRUST_CACHE: &str = "LEARNSHELF_TRUST_CACHE";

/// One slide of the rotating banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerSlide {
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub trust_cache: bool,
    pub grid_columns: u16,
    pub banner_rotate_secs: u64,
    pub banners: Vec<BannerSlide>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            trust_cache: true,
            grid_columns: 2,
            banner_rotate_secs: 5,
            banners: vec![
                BannerSlide {
                    title: "New this week: fresh courses every Monday".to_string(),
                    image_url: None,
                },
                BannerSlide {
                    title: "Learn offline - your library is cached on this device".to_string(),
                    image_url: None,
                },
            ],
        }
    }
}

impl Config {
    /// Load from disk, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Apply overrides from `lookup`, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }

        if let Some(token) = lookup(ENV_API_TOKEN).filter(|t| !t.is_empty()) {
            self.api_token = Some(token);
        }

        if let Some(raw) = lookup(ENV_TRUST_CACHE) {
            match parse_bool(&raw) {
                Some(value) => self.trust_cache = value,
                None => warn!(value = %raw, "Ignoring unrecognized {}", ENV_TRUST_CACHE),
            }
        }
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            trust_cache: self.trust_cache,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.trust_cache);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.loader_config(), LoaderConfig { trust_cache: true });
        assert!(!config.banners.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"trust_cache": false}"#).unwrap();
        assert!(!config.trust_cache);
        assert_eq!(config.grid_columns, 2);
        assert_eq!(config.banner_rotate_secs, 5);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("LEARNSHELF_API_URL", " http://localhost:8080 "),
            ("LEARNSHELF_API_TOKEN", "secret"),
            ("LEARNSHELF_TRUST_CACHE", "off"),
        ]));
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert!(!config.trust_cache);
    }

    #[test]
    fn test_bad_trust_cache_value_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("LEARNSHELF_TRUST_CACHE", "maybe")]));
        assert!(config.trust_cache);
    }

    #[test]
    fn test_empty_url_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("LEARNSHELF_API_URL", "  ")]));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
