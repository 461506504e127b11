//! Configuration system for cmns-tree
//!
//! Layered YAML configuration: built-in defaults, the root config file and
//! environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{ApiConfig, Config, TreeConfig, UiConfig};

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "api.baseUrl",
    "api.tokenEnv",
    "api.timeoutSeconds",
    "api.pageSize",
    "ui.enableMouse",
    "ui.noIcons",
    "ui.defaultView",
    "tree.revealFocus",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "api.baseUrl" => Ok(config.api.base_url.clone()),
        "api.tokenEnv" => Ok(config.api.token_env.clone()),
        "api.timeoutSeconds" => Ok(config.api.timeout_seconds.to_string()),
        "api.pageSize" => Ok(config.api.page_size.to_string()),
        "ui.enableMouse" => Ok(config.ui.enable_mouse.to_string()),
        "ui.noIcons" => Ok(config.ui.no_icons.to_string()),
        "ui.defaultView" => Ok(config.ui.default_view.to_string()),
        "tree.revealFocus" => Ok(config.tree.reveal_focus.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "api.baseUrl" => {
            url::Url::parse(value).context("api.baseUrl must be an absolute URL")?;
            config.api.base_url = value.to_string();
        }
        "api.tokenEnv" => {
            config.api.token_env = value.to_string();
        }
        "api.timeoutSeconds" => {
            config.api.timeout_seconds = value
                .parse()
                .context("api.timeoutSeconds must be a number")?;
        }
        "api.pageSize" => {
            config.api.page_size = value.parse().context("api.pageSize must be a number")?;
        }
        "ui.enableMouse" => {
            config.ui.enable_mouse = value
                .parse()
                .context("ui.enableMouse must be 'true' or 'false'")?;
        }
        "ui.noIcons" => {
            config.ui.no_icons = value
                .parse()
                .context("ui.noIcons must be 'true' or 'false'")?;
        }
        "ui.defaultView" => {
            config.ui.default_view = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }
        "tree.revealFocus" => {
            config.tree.reveal_focus = value
                .parse()
                .context("tree.revealFocus must be 'true' or 'false'")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeKind;

    #[test]
    fn test_every_key_round_trips_through_get() {
        let config = Config::default();
        for key in CONFIG_KEYS {
            assert!(get_config_value(&config, key).is_ok(), "{}", key);
        }
        assert!(get_config_value(&config, "ui.colors").is_err());
    }

    #[test]
    fn test_set_config_value() {
        let mut config = Config::default();
        set_config_value(&mut config, "ui.defaultView", "topology").unwrap();
        set_config_value(&mut config, "api.pageSize", "20").unwrap();
        assert_eq!(config.ui.default_view, TreeKind::Topology);
        assert_eq!(config.api.page_size, 20);

        assert!(set_config_value(&mut config, "api.pageSize", "many").is_err());
        assert!(set_config_value(&mut config, "ui.defaultView", "racks").is_err());
        assert!(set_config_value(&mut config, "api.baseUrl", "nope").is_err());
    }
}
