// Shared transport configuration for opening SNMP sessions.
//
// Carries the community secret, protocol version, and the retry/timeout
// budget every request made through a session is subject to.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use tracing::warn;

use crate::error::Error;

/// Standard SNMP agent port.
pub const DEFAULT_PORT: u16 = 161;

/// Repetition count for GETBULK requests.
pub const DEFAULT_MAX_REPETITIONS: u32 = 10;

/// Protocol versions the client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnmpVersion {
    /// SNMPv1: walks use GETNEXT.
    V1,
    /// SNMPv2c: walks use GETBULK.
    V2c,
}

impl TryFrom<u8> for SnmpVersion {
    type Error = Error;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        match version {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2c),
            other => Err(Error::UnsupportedVersion(other)),
        }
    }
}

/// Everything needed to open a session against one agent.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// `host` or `host:port`.
    pub target: String,
    pub community: SecretString,
    pub version: SnmpVersion,
    /// Extra attempts after the first one times out.
    pub retries: u32,
    /// Per-attempt timeout.
    pub timeout: Duration,
    pub max_repetitions: u32,
}

impl TransportConfig {
    pub fn new(target: impl Into<String>, community: SecretString) -> Self {
        Self {
            target: target.into(),
            community,
            version: SnmpVersion::V2c,
            retries: 0,
            timeout: Duration::from_secs(5),
            max_repetitions: DEFAULT_MAX_REPETITIONS,
        }
    }

    /// Socket address string with the default port filled in when absent.
    pub fn socket_target(&self) -> String {
        socket_target(&self.target)
    }

    /// Total number of attempts a request gets.
    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Append [`DEFAULT_PORT`] unless `host` already names one.
///
/// Bare IPv6 literals are bracketed; `[v6]:port`, `v4:port`, and
/// `name:port` pass through untouched.
pub fn socket_target(host: &str) -> String {
    let host = host.trim();
    if host.parse::<SocketAddr>().is_ok() {
        return host.to_owned();
    }
    if let Ok(IpAddr::V6(v6)) = host.parse::<IpAddr>() {
        return format!("[{v6}]:{DEFAULT_PORT}");
    }
    if host.contains(':') {
        return host.to_owned();
    }
    format!("{host}:{DEFAULT_PORT}")
}

/// Decide whether a timed-out attempt may be repeated.
///
/// Returns `Ok(())` to retry, or the final timeout error once `attempt`
/// (1-based) has used up all `attempts`.
pub(crate) fn retry_or_give_up(attempt: u32, attempts: u32, timeout: Duration) -> Result<(), Error> {
    if attempt >= attempts {
        return Err(Error::Timeout {
            attempts,
            timeout_secs: timeout.as_secs(),
        });
    }
    warn!(attempt, attempts, "SNMP request timed out, retrying");
    Ok(())
}
