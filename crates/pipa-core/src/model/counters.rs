// ── Receive counter types ──

use serde::Serialize;

use crate::templates::{Channel, CounterKind};

/// Counter readings for one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamCounters {
    pub dropped_packets: u64,
    pub loss_of_connection: u64,
    pub packets_received: u64,
}

impl StreamCounters {
    pub fn get(&self, kind: CounterKind) -> u64 {
        match kind {
            CounterKind::DroppedPackets => self.dropped_packets,
            CounterKind::LossOfConnection => self.loss_of_connection,
            CounterKind::PacketsReceived => self.packets_received,
        }
    }

    pub(crate) fn set(&mut self, kind: CounterKind, value: u64) {
        match kind {
            CounterKind::DroppedPackets => self.dropped_packets = value,
            CounterKind::LossOfConnection => self.loss_of_connection = value,
            CounterKind::PacketsReceived => self.packets_received = value,
        }
    }
}

/// Receive counters for both streams and their combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReceiveCounters {
    pub stream1: StreamCounters,
    pub stream2: StreamCounters,
    pub combined: StreamCounters,
}

impl ReceiveCounters {
    pub fn channel(&self, channel: Channel) -> &StreamCounters {
        match channel {
            Channel::Stream1 => &self.stream1,
            Channel::Stream2 => &self.stream2,
            Channel::Combined => &self.combined,
        }
    }

    pub(crate) fn channel_mut(&mut self, channel: Channel) -> &mut StreamCounters {
        match channel {
            Channel::Stream1 => &mut self.stream1,
            Channel::Stream2 => &mut self.stream2,
            Channel::Combined => &mut self.combined,
        }
    }
}
