//! Stream discovery for Broadcom PIPA audio codecs.
//!
//! Sits between `pipa-api` (the SNMP transport) and the `pipa` CLI:
//!
//! - **[`query_subtree`]**: one bulk walk, filtered to the requested
//!   subtree. Walks routinely run past the end of a column; those entries
//!   are dropped, not reported.
//!
//! - **[`enumerate_rx_streams`]**: walks the enabled, name, and
//!   destination columns, zips them by row into [`StreamRecord`]s, derives
//!   each stream's [`Direction`], and keeps the receive streams.
//!
//! - **[`Codec`]**: per-device facade. Each call opens one session, runs
//!   its queries, and releases the session. Nothing is cached.
//!
//! Failures are [`CoreError`] values; [`CoreError::kind`] tells transport
//! problems apart from inconsistent device data.

pub mod codec;
pub mod config;
pub mod counters;
pub mod enumerator;
pub mod error;
pub mod model;
pub mod query;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use codec::Codec;
pub use config::{ConnectionConfig, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS, DEFAULT_VERSION};
pub use enumerator::{correlate, enumerate_rx_streams, enumerate_streams};
pub use error::{CoreError, ErrorKind};
pub use query::query_subtree;
pub use templates::{Channel, CounterKind, StreamColumn};

pub use model::{
    CodecStatus, Direction, ReceiveCounters, StreamCounters, StreamRecord, UNSPECIFIED_ADDRESS,
};

pub use pipa_api::{AttributeEntry, AttributeValue, Identifier};
