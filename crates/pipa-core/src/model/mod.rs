// ── Domain model ──
//
// Query-scoped values: built fresh for every poll, never cached.

pub mod counters;
pub mod stream;

use serde::Serialize;

pub use counters::{ReceiveCounters, StreamCounters};
pub use stream::{Direction, StreamRecord, UNSPECIFIED_ADDRESS};

/// Everything one status poll reports about a codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecStatus {
    pub unit_name: String,
    pub rx_streams: Vec<StreamRecord>,
    pub counters: ReceiveCounters,
}
