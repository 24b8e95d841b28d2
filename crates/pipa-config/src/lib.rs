//! Shared configuration for the pipa CLI.
//!
//! TOML profiles, community resolution (env + keyring + plaintext), and
//! translation to `pipa_core::ConnectionConfig`. The CLI layers its
//! `GlobalOpts` flag overrides on top of this.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pipa_core::{ConnectionConfig, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS, DEFAULT_VERSION};

/// Keyring service name; entries are keyed `<profile>/community`.
pub const KEYRING_SERVICE: &str = "pipa";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no community configured for profile '{profile}'")]
    NoCommunity { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named codec profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_version")]
    pub version: u8,

    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            version: default_version(),
            retries: default_retries(),
            timeout: default_timeout(),
        }
    }
}

fn default_version() -> u8 {
    DEFAULT_VERSION
}
fn default_retries() -> u32 {
    DEFAULT_RETRIES
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// A named codec profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Codec address, optionally with `:port`.
    pub host: String,

    /// Community string (plaintext; prefer keyring or env var).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,

    /// Environment variable name containing the community string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_env: Option<String>,

    /// Override SNMP version (1 or 2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,

    /// Override retry count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,

    /// Override timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "pipa", "pipa").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("pipa");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// Environment overrides use a double underscore for nesting,
/// e.g. `PIPA_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PIPA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Community resolution ────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/community"))
}

/// Resolve the community string from the credential chain (no CLI flag step).
pub fn resolve_community(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's community_env → env var lookup
    if let Some(ref env_name) = profile.community_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref community) = profile.community {
        return Ok(SecretString::from(community.clone()));
    }

    Err(ConfigError::NoCommunity {
        profile: profile_name.into(),
    })
}

/// Store a community string in the system keyring.
pub fn store_community(profile_name: &str, community: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(community)?;
    Ok(())
}

/// Build a `ConnectionConfig` from a profile, no CLI flag overrides.
///
/// Profile values win over `defaults`.
pub fn profile_to_connection_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ConnectionConfig, ConfigError> {
    let community = resolve_community(profile, profile_name)?;
    build_connection_config(profile, profile_name, defaults, community)
}

/// Same as [`profile_to_connection_config`] with an already resolved community.
pub fn build_connection_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    community: SecretString,
) -> Result<ConnectionConfig, ConfigError> {
    if profile.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("profile '{profile_name}' has no host"),
        });
    }

    let version = profile.version.unwrap_or(defaults.version);
    if !matches!(version, 1 | 2) {
        return Err(ConfigError::Validation {
            field: "version".into(),
            reason: format!("expected 1 or 2, got {version}"),
        });
    }

    Ok(ConnectionConfig::new(profile.host.clone(), community)
        .with_version(version)
        .with_retries(profile.retries.unwrap_or(defaults.retries))
        .with_timeout(Duration::from_secs(
            profile.timeout.unwrap_or(defaults.timeout),
        )))
}
