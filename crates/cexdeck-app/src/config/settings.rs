//! Settings loader for `~/.config/cexdeck/config.toml`

use std::path::{Path, PathBuf};

use cexdeck_core::prelude::*;
use url::Url;

use super::types::{CliOverrides, Settings};

const CONFIG_FILENAME: &str = "config.toml";
const CEXDECK_DIR: &str = "cexdeck";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV_VAR: &str = "CEXDECK_API_BASE_URL";

/// Location of the user config file, if the platform has a config dir.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CEXDECK_DIR).join(CONFIG_FILENAME))
}

/// Load settings from the user config file, falling back to defaults.
pub fn load_settings() -> Settings {
    match config_file_path() {
        Some(path) => load_settings_from(&path),
        None => {
            debug!("No config directory on this platform, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from `config_path`.
///
/// A missing file yields defaults. An unreadable or unparsable file is
/// logged and also yields defaults.
pub fn load_settings_from(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply command line and environment overrides to file settings.
///
/// Base URL precedence: `--base-url` > `CEXDECK_API_BASE_URL` > file.
pub fn resolve_settings(settings: Settings, overrides: &CliOverrides) -> Result<Settings> {
    let env_base_url = std::env::var(BASE_URL_ENV_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty());
    apply_overrides(settings, overrides, env_base_url)
}

fn apply_overrides(
    mut settings: Settings,
    overrides: &CliOverrides,
    env_base_url: Option<String>,
) -> Result<Settings> {
    if let Some(url) = overrides.base_url.clone().or(env_base_url) {
        settings.api.base_url = url;
    }
    validate_base_url(&settings.api.base_url)?;

    if let Some(address) = &overrides.address {
        settings.connection.default_address = address.clone();
    }
    if overrides.insecure {
        settings.connection.use_https = false;
    }

    Ok(settings)
}

/// Reject base URLs that are not absolute http(s) URLs.
pub fn validate_base_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|e| Error::config_invalid(format!("base_url '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::config_invalid(format!(
            "base_url '{}': unsupported scheme '{}'",
            raw, other
        ))),
    }
}
