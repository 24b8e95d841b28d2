// ── Stream domain types ──

use serde::Serialize;
use strum::Display;

/// Address a receive stream reports as its destination.
pub const UNSPECIFIED_ADDRESS: &str = "0.0.0.0";

/// Which way audio flows through a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Inbound: no destination configured.
    Rx,
    /// Outbound to `destination_address`.
    Tx,
}

impl Direction {
    /// `Rx` iff the destination is empty or `0.0.0.0`.
    pub fn from_destination(destination: &str) -> Self {
        let destination = destination.trim();
        if destination.is_empty() || destination == UNSPECIFIED_ADDRESS {
            Self::Rx
        } else {
            Self::Tx
        }
    }

    pub fn is_rx(self) -> bool {
        matches!(self, Self::Rx)
    }
}

/// One configured audio stream, correlated from the per-column walks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamRecord {
    /// Row index under the stream table.
    pub index: u64,
    pub enabled: bool,
    pub name: String,
    pub destination_address: String,
    pub direction: Direction,
}

impl StreamRecord {
    /// Build a record, deriving `direction` from the destination.
    pub fn new(index: u64, enabled: bool, name: String, destination_address: String) -> Self {
        let direction = Direction::from_destination(&destination_address);
        Self {
            index,
            enabled,
            name,
            destination_address,
            direction,
        }
    }
}
