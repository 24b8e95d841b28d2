// ── Attribute values ──
//
// Owned, transport-independent copies of the values an agent returns.
// The snmp2 value type borrows the receive buffer, so every response is
// converted into these before the next request is sent.

use std::net::Ipv4Addr;

use serde::Serialize;
use strum::Display;

use crate::identifier::Identifier;

/// Kind tag for an [`AttributeValue`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Integer,
    Text,
    IpAddress,
    Counter,
    TimeTicks,
    ObjectId,
    Null,
    Other,
}

/// A single value returned by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum AttributeValue {
    Integer(i64),
    /// OCTET STRING, decoded as UTF-8 (lossy).
    Text(String),
    IpAddress(Ipv4Addr),
    /// Counter32, Counter64, Gauge32/Unsigned32.
    Counter(u64),
    TimeTicks(u32),
    ObjectId(Identifier),
    Null,
    /// Anything else, kept as its debug rendering.
    Other(String),
}

impl AttributeValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Text(_) => ValueKind::Text,
            Self::IpAddress(_) => ValueKind::IpAddress,
            Self::Counter(_) => ValueKind::Counter,
            Self::TimeTicks(_) => ValueKind::TimeTicks,
            Self::ObjectId(_) => ValueKind::ObjectId,
            Self::Null => ValueKind::Null,
            Self::Other(_) => ValueKind::Other,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Textual rendering of an address-like value.
    ///
    /// Accepts both `IpAddress` and `Text`; firmware revisions differ in
    /// which one they use for address columns.
    pub fn as_address_text(&self) -> Option<String> {
        match self {
            Self::IpAddress(addr) => Some(addr.to_string()),
            Self::Text(s) => Some(s.trim().to_owned()),
            _ => None,
        }
    }

    /// Unsigned counter reading. Non-negative integers are accepted too.
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            Self::Counter(n) => Some(*n),
            Self::Integer(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }
}

/// One `(identifier, value)` pair from a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeEntry {
    pub identifier: Identifier,
    pub value: AttributeValue,
}

impl AttributeEntry {
    pub fn new(identifier: Identifier, value: AttributeValue) -> Self {
        Self { identifier, value }
    }
}
