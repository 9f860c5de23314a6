// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[server]` - Bind address and port of the HTTP API
//! - `[localization]` - Fallback locale, supported locales, negotiation and
//!   missing-key behavior
//! - `[client]` - Where the forecast client sends its requests
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `LOCALIZATION_DEMO_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use localization_demo::config;
//!
//! let (mut config, _warning) = config::load();
//! config.server.port = 8080;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::i18n::MissingKeyPolicy;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use unic_langid::LanguageIdentifier;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// Localization settings shared by the catalog and the negotiation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalizationConfig {
    /// Fallback locale tag (e.g., "en-US").
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Supported locale tags. Must contain `default_locale`.
    #[serde(default = "default_supported_locales")]
    pub supported_locales: Vec<String>,

    /// Maximum number of `Accept-Language` ranges considered per request.
    #[serde(default = "default_max_accept_language_values")]
    pub max_accept_language_values: usize,

    /// What a lookup returns when the key exists in no table.
    #[serde(default)]
    pub missing_key_policy: MissingKeyPolicy,

    /// Directory with `<scope>/<locale>.ftl` files that replaces the
    /// embedded resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_dir: Option<PathBuf>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            supported_locales: default_supported_locales(),
            max_accept_language_values: default_max_accept_language_values(),
            missing_key_policy: MissingKeyPolicy::default(),
            resources_dir: None,
        }
    }
}

impl LocalizationConfig {
    /// Parses the configured tags into the fallback locale and the
    /// supported list.
    ///
    /// Fails if any tag is malformed or the fallback is not supported.
    pub fn locales(&self) -> Result<(LanguageIdentifier, Vec<LanguageIdentifier>)> {
        let fallback: LanguageIdentifier = self.default_locale.parse()?;
        let mut supported = Vec::with_capacity(self.supported_locales.len());
        for tag in &self.supported_locales {
            let locale: LanguageIdentifier = tag.parse()?;
            if !supported.contains(&locale) {
                supported.push(locale);
            }
        }
        if !supported.contains(&fallback) {
            return Err(Error::Config(format!(
                "default locale {} is not among the supported locales",
                fallback
            )));
        }
        Ok((fallback, supported))
    }
}

/// Forecast client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_address")]
    pub api_base_address: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_address: default_api_base_address(),
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub localization: LocalizationConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_supported_locales() -> Vec<String> {
    DEFAULT_SUPPORTED_LOCALES
        .iter()
        .map(|tag| tag.to_string())
        .collect()
}

fn default_max_accept_language_values() -> usize {
    DEFAULT_MAX_ACCEPT_LANGUAGE_VALUES
}

fn default_api_base_address() -> String {
    DEFAULT_API_BASE_ADDRESS.to_string()
}

// =============================================================================
// Load Functions
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// Returns a tuple of (config, optional_warning). A missing file yields the
/// defaults with no warning; an unreadable or invalid file yields the
/// defaults with a warning describing the failure.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(config) => (config, None),
                Err(error) => (
                    Config::default(),
                    Some(format!("failed to load {}: {}", path.display(), error)),
                ),
            };
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
