//! Configuration types for cexdeck
//!
//! `Settings` mirrors `config.toml`; every field has a default so a partial
//! or missing file still loads.

use cexdeck_api::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Global application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub connection: ConnectionSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend location
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Connect dialog defaults
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Prefilled VM address
    #[serde(default)]
    pub default_address: String,

    /// Initial state of the HTTPS toggle
    #[serde(default = "default_true")]
    pub use_https: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            default_address: String::new(),
            use_https: true,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Start with the sidebar expanded
    #[serde(default = "default_true")]
    pub show_sidebar: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { show_sidebar: true }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

/// Values given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub address: Option<String>,
    /// Default the HTTPS toggle to off
    pub insecure: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert!(settings.connection.default_address.is_empty());
        assert!(settings.connection.use_https);
        assert!(settings.ui.show_sidebar);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[connection]
default_address = "10.1.2.3"
"#,
        )
        .unwrap();
        assert_eq!(settings.connection.default_address, "10.1.2.3");
        assert!(settings.connection.use_https);
        assert_eq!(settings.api.base_url, "http://localhost:8000");
    }
}
