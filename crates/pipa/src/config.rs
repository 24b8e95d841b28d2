//! Profile resolution: config file + CLI flag overrides → `ConnectionConfig`.

use secrecy::SecretString;

use pipa_config::{Config, Defaults, Profile};
use pipa_core::ConnectionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ConnectionConfig` from the config file, profile, and CLI overrides.
pub fn build_connection_config(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let cfg = pipa_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // A profile exists: use it with CLI flag overrides
    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg.defaults, global);
    }

    // An explicitly requested profile must exist
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    // No profile: flags / env vars alone
    let host = global.host.clone().ok_or_else(|| CliError::NoConfig {
        path: pipa_config::config_path().display().to_string(),
    })?;
    let profile = Profile {
        host,
        ..Profile::default()
    };
    resolve_profile(&profile, &profile_name, &cfg.defaults, global)
}

/// Translate a `Profile` + global flags into a `ConnectionConfig`.
///
/// Flags win over the profile, which wins over `[defaults]`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ConnectionConfig, CliError> {
    let mut effective = profile.clone();
    if let Some(ref host) = global.host {
        effective.host.clone_from(host);
    }
    effective.version = global.snmp_version.or(profile.version);
    effective.retries = global.retries.or(profile.retries);
    effective.timeout = global.timeout.or(profile.timeout);

    let community = match global.community {
        Some(ref community) => SecretString::from(community.clone()),
        None => pipa_config::resolve_community(&effective, profile_name)?,
    };

    pipa_config::build_connection_config(&effective, profile_name, defaults, community)
        .map_err(CliError::from)
}

pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}
