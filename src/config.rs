use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Configuration file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "tagrelease.toml";

/// Configuration file looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".tagrelease.toml";

/// Represents the complete configuration for git-tag-release.
///
/// Contains forge connection settings, git behaviour and release defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub forge: ForgeConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_true() -> bool {
    true
}

/// Where and how releases are published.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ForgeConfig {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// `owner/name` of the repository; `GITHUB_REPOSITORY` takes precedence
    #[serde(default)]
    pub repository: String,

    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            api_url: default_api_url(),
            repository: String::new(),
            token_env: default_token_env(),
        }
    }
}

/// Local repository behaviour.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    /// Fetch every remote before tags are inspected
    #[serde(default = "default_true")]
    pub remote_fetch: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig { remote_fetch: true }
    }
}

/// Defaults for the created release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub prerelease: bool,

    /// Mark versions with a semver pre-release part as prerelease
    #[serde(default)]
    pub auto_prerelease: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagrelease.toml` in current directory
/// 3. `.tagrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Loads configuration for the project in `folder`.
///
/// An explicit `config_path` wins; otherwise `tagrelease.toml` inside the
/// project folder is used before falling back to [`load_config`].
pub fn load_project_config(folder: &Path, config_path: Option<&str>) -> Result<Config> {
    if config_path.is_some() {
        return load_config(config_path);
    }

    let project_config = folder.join(LOCAL_CONFIG_FILE);
    if project_config.is_file() {
        return parse_config(&fs::read_to_string(project_config)?);
    }

    load_config(None)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))
}
