// ── Core error types ──
//
// Typed failures from discovery. Callers branch on `kind()` rather than
// on message text. Transport failures always carry the identifier that
// was in flight; validation failures carry what was found.

use pipa_api::Identifier;
use strum::Display;
use thiserror::Error;

/// Failure class, for callers that only care which side is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    /// Session could not be opened or a request failed.
    Transport,
    /// The device answered, but the data is inconsistent or malformed.
    Validation,
    /// Connection parameters were rejected before any request was made.
    Config,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ────────────────────────────────────────────────────
    #[error("Cannot open SNMP session to {host}: {source}")]
    Session {
        host: String,
        #[source]
        source: pipa_api::Error,
    },

    #[error("SNMP query for {identifier} failed: {source}")]
    Query {
        identifier: Identifier,
        #[source]
        source: pipa_api::Error,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error(
        "Inconsistent stream tables: {enabled} enabled flags, {names} names, \
         {destinations} destination addresses"
    )]
    LengthMismatch {
        enabled: usize,
        names: usize,
        destinations: usize,
    },

    #[error("Unexpected value at {identifier}: expected {expected}, found {found}")]
    InvalidValue {
        identifier: Identifier,
        expected: &'static str,
        found: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Session { .. } | Self::Query { .. } => ErrorKind::Transport,
            Self::LengthMismatch { .. } | Self::InvalidValue { .. } => ErrorKind::Validation,
            Self::InvalidConfig { .. } => ErrorKind::Config,
        }
    }

    /// Returns `true` if the agent never answered within the retry budget.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Session { source, .. } | Self::Query { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Identifier that was being queried or validated, if any.
    pub fn identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Query { identifier, .. } | Self::InvalidValue { identifier, .. } => {
                Some(identifier)
            }
            _ => None,
        }
    }

    pub(crate) fn query(identifier: &Identifier, source: pipa_api::Error) -> Self {
        Self::Query {
            identifier: identifier.clone(),
            source,
        }
    }
}
