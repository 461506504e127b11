//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::models::TreeKind;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Management API connection
    #[serde(default)]
    pub api: ApiConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// Tree behaviour
    #[serde(default)]
    pub tree: TreeConfig,
}

/// Management API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Base URL of the REST API, e.g. `http://localhost:8000/api/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the session token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Enable mouse support
    #[serde(default = "default_false")]
    pub enable_mouse: bool,

    /// Disable Unicode icons and tree glyphs for compatibility
    #[serde(default = "default_false")]
    pub no_icons: bool,

    /// Tree shown at startup
    #[serde(default)]
    pub default_view: TreeKind,
}

/// Tree configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeConfig {
    /// Expand the ancestors of the focused node at startup
    #[serde(default = "default_true")]
    pub reveal_focus: bool,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000/api/".to_string()
}

fn default_token_env() -> String {
    "CMNS_TREE_TOKEN".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_mouse: default_false(),
            no_icons: default_false(),
            default_view: TreeKind::default(),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            reveal_focus: default_true(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/");
        assert_eq!(config.api.token_env, "CMNS_TREE_TOKEN");
        assert_eq!(config.ui.default_view, TreeKind::Ipam);
        assert!(config.tree.reveal_focus);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("baseUrl"));
        assert!(yaml.contains("defaultView: ipam"));
        assert!(yaml.contains("revealFocus"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
api:
  baseUrl: https://cmns.example.net/api/
  pageSize: 25
ui:
  defaultView: topology
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "https://cmns.example.net/api/");
        assert_eq!(config.api.page_size, 25);
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.ui.default_view, TreeKind::Topology);
        assert!(config.tree.reveal_focus);
    }
}
