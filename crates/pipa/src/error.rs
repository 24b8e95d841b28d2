//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use pipa_config::ConfigError;
use pipa_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not open an SNMP session to {host}")]
    #[diagnostic(
        code(pipa::connection_failed),
        help(
            "Check that the codec address resolves and that UDP port 161 is reachable.\n\
             Host: {host}"
        )
    )]
    ConnectionFailed {
        host: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("SNMP request for {identifier} failed")]
    #[diagnostic(code(pipa::query_failed))]
    QueryFailed {
        identifier: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("No response from the codec while reading {identifier}")]
    #[diagnostic(
        code(pipa::timeout),
        help(
            "Check the community string and SNMP version, or raise --timeout / --retries.\n\
             A wrong community is indistinguishable from an unreachable codec."
        )
    )]
    Timeout {
        identifier: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Device data ──────────────────────────────────────────────────
    #[error("The codec returned inconsistent stream data: {message}")]
    #[diagnostic(
        code(pipa::device_data),
        help("The stream table may be changing; run the command again.")
    )]
    DeviceData { message: String },

    // ── Credentials ──────────────────────────────────────────────────
    #[error("No community configured for profile '{profile}'")]
    #[diagnostic(
        code(pipa::no_credentials),
        help(
            "Pass --community, set PIPA_COMMUNITY, or store one with:\n\
             pipa config set-community --profile {profile}"
        )
    )]
    NoCredentials { profile: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pipa::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(pipa::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: pipa --host <HOST> --profile {name} config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No codec configured")]
    #[diagnostic(
        code(pipa::no_config),
        help(
            "Pass --host, or create a profile with: pipa --host <HOST> config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(pipa::config))]
    Config(Box<ConfigError>),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::QueryFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let timed_out = err.is_timeout();
        match err {
            CoreError::Session { host, source } => CliError::ConnectionFailed {
                host,
                source: source.into(),
            },

            CoreError::Query { identifier, source } if timed_out => CliError::Timeout {
                identifier: identifier.to_string(),
                source: source.into(),
            },

            CoreError::Query { identifier, source } => CliError::QueryFailed {
                identifier: identifier.to_string(),
                source: source.into(),
            },

            err @ (CoreError::LengthMismatch { .. } | CoreError::InvalidValue { .. }) => {
                CliError::DeviceData {
                    message: err.to_string(),
                }
            }

            CoreError::InvalidConfig { field, reason } => CliError::Validation {
                field: field.into(),
                reason,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCommunity { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}
