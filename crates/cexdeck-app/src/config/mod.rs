//! Configuration loading for cexdeck
//!
//! Supports `~/.config/cexdeck/config.toml` plus command line and
//! environment overrides.

pub mod settings;
pub mod types;

pub use settings::{
    config_file_path, load_settings, load_settings_from, resolve_settings, validate_base_url,
    BASE_URL_ENV_VAR,
};
pub use types::*;
