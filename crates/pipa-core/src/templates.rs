// ── Vendor identifier templates ──
//
// Fixed by the Broadcom PIPA MIB (enterprise 22425). Stream columns end
// without a row index; the walk enumerates the rows beneath them.

use pipa_api::Identifier;
use serde::Serialize;
use strum::{Display, EnumIter};

const STREAM_TABLE_ENTRY: [u64; 12] = [1, 3, 6, 1, 4, 1, 22425, 10, 5, 3, 5, 1];
const UNIT_NAME: [u64; 11] = [1, 3, 6, 1, 4, 1, 22425, 10, 4, 5, 0];

const COLUMN_ENABLED: u64 = 2;
const COLUMN_NAME: u64 = 3;
const COLUMN_DESTINATION: u64 = 12;
const COLUMN_PACKETS_RECEIVED: u64 = 16;
const COLUMN_DROPPED_PACKETS: u64 = 22;
const COLUMN_LOSS_OF_CONNECTION: u64 = 23;

fn column(column: u64) -> Identifier {
    Identifier::from(&STREAM_TABLE_ENTRY[..]).child(column)
}

/// Per-stream attribute columns walked during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StreamColumn {
    /// 0 = disabled, 1 = enabled.
    Enabled,
    Name,
    /// Empty or `0.0.0.0` for receive streams.
    DestinationAddress,
}

impl StreamColumn {
    pub fn identifier(self) -> Identifier {
        column(match self {
            Self::Enabled => COLUMN_ENABLED,
            Self::Name => COLUMN_NAME,
            Self::DestinationAddress => COLUMN_DESTINATION,
        })
    }
}

/// Receive-side counters kept per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CounterKind {
    /// Packets that arrived or were lost outside the buffer window.
    DroppedPackets,
    /// Buffer underruns (holes in the audio).
    LossOfConnection,
    PacketsReceived,
}

impl CounterKind {
    fn column(self) -> u64 {
        match self {
            Self::DroppedPackets => COLUMN_DROPPED_PACKETS,
            Self::LossOfConnection => COLUMN_LOSS_OF_CONNECTION,
            Self::PacketsReceived => COLUMN_PACKETS_RECEIVED,
        }
    }
}

/// Counter channel: one of the two receive streams, or their combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Stream1,
    Stream2,
    Combined,
}

impl Channel {
    fn index(self) -> u64 {
        match self {
            Self::Stream1 => 0,
            Self::Stream2 => 1,
            Self::Combined => 2,
        }
    }
}

/// Identifier of one receive counter scalar.
pub fn counter(kind: CounterKind, channel: Channel) -> Identifier {
    column(kind.column()).child(channel.index())
}

/// Identifier of the device's configured unit name.
pub fn unit_name() -> Identifier {
    Identifier::from(&UNIT_NAME[..])
}
