//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::schema::{ApiConfig, Config, TreeConfig, UiConfig};
use super::{defaults, paths};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        let mut config = Self::load_defaults();

        let root_path = paths::root_config_path();
        if root_path.exists() {
            let root_config = Self::load_file(&root_path)?;
            config = Self::merge_config(config, root_config);
        }

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the root config file and the merged result
    ///
    /// Fails on invalid YAML, wrong value types, an unparseable base URL,
    /// or zero timeout / page size.
    pub fn validate() -> Result<()> {
        let config = Self::load().context("Failed to load merged configuration")?;
        Self::check(&config)
    }

    /// Semantic checks that serde cannot express
    pub fn check(config: &Config) -> Result<()> {
        let url = url::Url::parse(&config.api.base_url)
            .with_context(|| format!("api.baseUrl is not a valid URL: {}", config.api.base_url))?;
        if url.cannot_be_a_base() {
            return Err(anyhow::anyhow!(
                "api.baseUrl cannot carry paths: {}",
                config.api.base_url
            ));
        }
        if config.api.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("api.timeoutSeconds must be greater than 0"));
        }
        if config.api.page_size == 0 {
            return Err(anyhow::anyhow!("api.pageSize must be greater than 0"));
        }
        if config.api.token_env.trim().is_empty() {
            return Err(anyhow::anyhow!("api.tokenEnv must name an environment variable"));
        }
        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Merge two configurations, with `other` taking precedence
    ///
    /// Fields missing from a file are already filled with their defaults by
    /// serde, so the file layer wins field by field.
    fn merge_config(_base: Config, other: Config) -> Config {
        Config {
            api: ApiConfig {
                base_url: other.api.base_url,
                token_env: other.api.token_env,
                timeout_seconds: other.api.timeout_seconds,
                page_size: other.api.page_size,
            },
            ui: UiConfig {
                enable_mouse: other.ui.enable_mouse,
                no_icons: other.ui.no_icons,
                default_view: other.ui.default_view,
            },
            tree: TreeConfig {
                reveal_focus: other.tree.reveal_focus,
            },
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // CMNS_TREE_API_URL override
        if let Ok(url) = std::env::var("CMNS_TREE_API_URL") {
            if !url.trim().is_empty() {
                config.api.base_url = url;
            }
        }

        // CMNS_TREE_DEFAULT_VIEW override
        if let Ok(view) = std::env::var("CMNS_TREE_DEFAULT_VIEW") {
            match view.parse() {
                Ok(kind) => config.ui.default_view = kind,
                Err(err) => tracing::warn!("Ignoring CMNS_TREE_DEFAULT_VIEW: {}", err),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeKind;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.ui.default_view, TreeKind::Ipam);
    }

    #[test]
    fn test_merge_config() {
        let base = Config::default();
        let mut other = Config::default();
        other.api.base_url = "https://ipam.example.org/".to_string();
        other.tree.reveal_focus = false;

        let merged = ConfigLoader::merge_config(base, other);
        assert_eq!(merged.api.base_url, "https://ipam.example.org/");
        assert!(!merged.tree.reveal_focus);
    }

    #[test]
    fn test_save_and_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.api.page_size = 7;

        ConfigLoader::save(&config, &path).unwrap();
        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded.api.page_size, 7);
    }

    #[test]
    fn test_load_file_rejects_bad_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "api: [not, a, map").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_check() {
        let mut config = Config::default();
        assert!(ConfigLoader::check(&config).is_ok());

        config.api.page_size = 0;
        assert!(ConfigLoader::check(&config).is_err());

        config.api.page_size = 10;
        config.api.base_url = "not a url".to_string();
        assert!(ConfigLoader::check(&config).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test in this crate reads these variables.
        unsafe {
            std::env::set_var("CMNS_TREE_API_URL", "http://10.0.0.5:8000/api/");
            std::env::set_var("CMNS_TREE_DEFAULT_VIEW", "topology");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.api.base_url, "http://10.0.0.5:8000/api/");
        assert_eq!(config.ui.default_view, TreeKind::Topology);

        // SAFETY: same as above.
        unsafe {
            std::env::remove_var("CMNS_TREE_API_URL");
            std::env::remove_var("CMNS_TREE_DEFAULT_VIEW");
        }
    }
}
