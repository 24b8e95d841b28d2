use thiserror::Error;

use crate::identifier::Identifier;

/// Top-level error type for the `pipa-api` crate.
///
/// Covers every failure the SNMP transport can produce: session setup,
/// request timeouts, agent-side protocol errors, and identifier parsing.
/// `pipa-core` attaches query context before handing these to callers.
#[derive(Debug, Error)]
pub enum Error {
    // ── Session ─────────────────────────────────────────────────────
    /// The UDP session could not be created (bad address, bind failure).
    #[error("Cannot open SNMP session to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The requested protocol version is not one this client speaks.
    #[error("Unsupported SNMP version {0} (expected 1 or 2)")]
    UnsupportedVersion(u8),

    // ── Transport ───────────────────────────────────────────────────
    /// No response after the configured number of attempts.
    ///
    /// SNMPv1/v2c agents silently drop requests carrying a wrong community,
    /// so a rejected secret also surfaces here.
    #[error("No response after {attempts} attempt(s) of {timeout_secs}s each")]
    Timeout { attempts: u32, timeout_secs: u64 },

    /// The agent answered with an error, or the response could not be decoded.
    #[error("SNMP protocol error: {0}")]
    Protocol(String),

    /// The agent returned identifiers that do not increase during a walk.
    #[error("Agent returned non-increasing identifier {returned} after {previous}")]
    NotIncreasing {
        previous: Identifier,
        returned: Identifier,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// A scalar GET named an object the agent does not have.
    #[error("No such object: {0}")]
    NoSuchObject(Identifier),

    /// Textual identifier failed to parse.
    #[error("Invalid identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },
}

impl Error {
    /// Returns `true` if this is a timeout that exhausted all retries.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<snmp2::Error> for Error {
    fn from(err: snmp2::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}
