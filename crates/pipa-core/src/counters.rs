// ── Scalar reads: unit name and receive counters ──

use pipa_api::{AttributeEntry, TreeSession};
use strum::IntoEnumIterator;

use crate::error::CoreError;
use crate::model::ReceiveCounters;
use crate::templates::{self, Channel, CounterKind};

/// The unit name configured on the device.
pub async fn read_unit_name<S: TreeSession>(session: &mut S) -> Result<String, CoreError> {
    let identifier = templates::unit_name();
    let entry = session
        .get(&identifier)
        .await
        .map_err(|e| CoreError::query(&identifier, e))?;

    entry
        .value
        .as_text()
        .map(|name| name.trim().to_owned())
        .ok_or_else(|| unexpected(&entry, "text"))
}

/// All nine receive counters (three kinds × three channels).
pub async fn read_receive_counters<S: TreeSession>(
    session: &mut S,
) -> Result<ReceiveCounters, CoreError> {
    let mut counters = ReceiveCounters::default();

    for channel in Channel::iter() {
        for kind in CounterKind::iter() {
            let identifier = templates::counter(kind, channel);
            let entry = session
                .get(&identifier)
                .await
                .map_err(|e| CoreError::query(&identifier, e))?;
            let value = entry
                .value
                .as_counter()
                .ok_or_else(|| unexpected(&entry, "counter"))?;
            counters.channel_mut(channel).set(kind, value);
        }
    }

    Ok(counters)
}

fn unexpected(entry: &AttributeEntry, expected: &'static str) -> CoreError {
    CoreError::InvalidValue {
        identifier: entry.identifier.clone(),
        expected,
        found: entry.value.kind().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pipa_api::AttributeValue;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;
    use crate::model::StreamCounters;
    use crate::testing::FakeAgent;

    fn with_counters(agent: FakeAgent) -> FakeAgent {
        let mut agent = agent;
        let mut reading = 0;
        for channel in Channel::iter() {
            for kind in CounterKind::iter() {
                reading += 1;
                agent = agent.with(
                    &templates::counter(kind, channel).to_string(),
                    AttributeValue::Counter(reading),
                );
            }
        }
        agent
    }

    #[tokio::test]
    async fn reads_unit_name() {
        let agent = Arc::new(FakeAgent::new().with(
            ".1.3.6.1.4.1.22425.10.4.5.0",
            AttributeValue::Text("STUDIO-3 ".into()),
        ));
        let mut session = agent.session();

        assert_eq!(read_unit_name(&mut session).await.unwrap(), "STUDIO-3");
    }

    #[tokio::test]
    async fn missing_unit_name_is_a_transport_error() {
        let agent = Arc::new(FakeAgent::new());
        let mut session = agent.session();

        let err = read_unit_name(&mut session).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.identifier(), Some(&templates::unit_name()));
    }

    #[tokio::test]
    async fn reads_all_counters_into_channels() {
        let agent = Arc::new(with_counters(FakeAgent::new()));
        let mut session = agent.session();

        let counters = read_receive_counters(&mut session).await.unwrap();

        assert_eq!(
            counters.stream1,
            StreamCounters {
                dropped_packets: 1,
                loss_of_connection: 2,
                packets_received: 3,
            }
        );
        assert_eq!(counters.channel(Channel::Stream2).get(CounterKind::DroppedPackets), 4);
        assert_eq!(counters.combined.packets_received, 9);
    }

    #[tokio::test]
    async fn non_counter_value_is_rejected() {
        let bad = templates::counter(CounterKind::LossOfConnection, Channel::Combined);
        let agent = Arc::new(
            with_counters(FakeAgent::new()).with(&bad.to_string(), AttributeValue::Text("n/a".into())),
        );
        let mut session = agent.session();

        let err = read_receive_counters(&mut session).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.identifier(), Some(&bad));
    }
}
