// ── Codec facade ──
//
// Entry point for callers. Every operation opens its own session, runs to
// completion, and drops the session on every exit path. Nothing is kept
// between calls: two polls never share results.

use pipa_api::{Connector, SnmpConnector};
use tracing::{Instrument, debug, info_span};

use crate::config::ConnectionConfig;
use crate::counters::{read_receive_counters, read_unit_name};
use crate::enumerator::{enumerate_rx_streams, enumerate_streams};
use crate::error::CoreError;
use crate::model::{CodecStatus, ReceiveCounters, StreamRecord};

/// A PIPA codec reachable over SNMP.
///
/// Generic over the [`Connector`] so tests can swap in an in-memory agent.
pub struct Codec<C = SnmpConnector> {
    connector: C,
    config: ConnectionConfig,
}

impl Codec<SnmpConnector> {
    /// A codec polled over UDP with the real SNMP transport.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_connector(SnmpConnector, config)
    }
}

impl<C: Connector> Codec<C> {
    pub fn with_connector(connector: C, config: ConnectionConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Receive streams only, in row order.
    pub async fn rx_streams(&self) -> Result<Vec<StreamRecord>, CoreError> {
        let mut session = self.open().await?;
        enumerate_rx_streams(&mut session)
            .instrument(info_span!("rx_streams", host = %self.config.host))
            .await
    }

    /// Every configured stream, both directions.
    pub async fn streams(&self) -> Result<Vec<StreamRecord>, CoreError> {
        let mut session = self.open().await?;
        enumerate_streams(&mut session)
            .instrument(info_span!("streams", host = %self.config.host))
            .await
    }

    pub async fn unit_name(&self) -> Result<String, CoreError> {
        let mut session = self.open().await?;
        read_unit_name(&mut session)
            .instrument(info_span!("unit_name", host = %self.config.host))
            .await
    }

    pub async fn receive_counters(&self) -> Result<ReceiveCounters, CoreError> {
        let mut session = self.open().await?;
        read_receive_counters(&mut session)
            .instrument(info_span!("receive_counters", host = %self.config.host))
            .await
    }

    /// Unit name, receive streams, and counters from one session.
    pub async fn status(&self) -> Result<CodecStatus, CoreError> {
        let mut session = self.open().await?;
        async {
            let unit_name = read_unit_name(&mut session).await?;
            let rx_streams = enumerate_rx_streams(&mut session).await?;
            let counters = read_receive_counters(&mut session).await?;
            Ok::<_, CoreError>(CodecStatus {
                unit_name,
                rx_streams,
                counters,
            })
        }
        .instrument(info_span!("status", host = %self.config.host))
        .await
    }

    async fn open(&self) -> Result<C::Session, CoreError> {
        let transport = self.config.to_transport()?;
        debug!(host = %self.config.host, version = self.config.version, "opening session");
        self.connector
            .open(&transport)
            .await
            .map_err(|source| CoreError::Session {
                host: self.config.host.clone(),
                source,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pipa_api::AttributeValue;
    use pretty_assertions::assert_eq;
    use secrecy::SecretString;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{FakeAgent, FakeConnector};

    fn codec(agent: FakeAgent) -> (Codec<FakeConnector>, Arc<FakeAgent>) {
        let connector = FakeConnector::new(agent);
        let agent = Arc::clone(&connector.agent);
        let config = ConnectionConfig::new("10.0.0.20", SecretString::from("public".to_owned()));
        (Codec::with_connector(connector, config), agent)
    }

    /// Log sink shared between the subscriber and the assertions.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn unit_name_runs_inside_a_host_span() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_span_events(FmtSpan::NEW)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        let (codec, _) = codec(FakeAgent::new().with(
            ".1.3.6.1.4.1.22425.10.4.5.0",
            AttributeValue::Text("OB-VAN".into()),
        ));

        assert_eq!(codec.unit_name().await.unwrap(), "OB-VAN");

        let output = log.text();
        assert!(output.contains("unit_name{host=10.0.0.20}"), "{output}");
    }

    #[tokio::test]
    async fn each_call_opens_a_fresh_session() {
        let (codec, agent) = codec(FakeAgent::new().with_streams(&[(1, "A", "0.0.0.0")]));

        let first = codec.rx_streams().await.unwrap();
        let second = codec.rx_streams().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(agent.opens(), 2);
    }

    #[tokio::test]
    async fn session_failure_is_transport_error() {
        let (codec, _) = codec(FakeAgent::new().refusing_open());

        let err = codec.rx_streams().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(err, CoreError::Session { ref host, .. } if host == "10.0.0.20"));
    }

    #[tokio::test]
    async fn invalid_config_fails_before_opening() {
        let connector = FakeConnector::new(FakeAgent::new());
        let agent = Arc::clone(&connector.agent);
        let config = ConnectionConfig::new("10.0.0.20", SecretString::from("public".to_owned()))
            .with_version(3);
        let codec = Codec::with_connector(connector, config);

        let err = codec.streams().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(agent.opens(), 0);
    }

    #[tokio::test]
    async fn status_combines_all_reads() {
        let mut agent = FakeAgent::new()
            .with_streams(&[(1, "Inbound", "0.0.0.0"), (1, "Outbound", "10.0.0.9")])
            .with(
                ".1.3.6.1.4.1.22425.10.4.5.0",
                AttributeValue::Text("OB-VAN".into()),
            );
        for column in [22, 23, 16] {
            for channel in 0..3 {
                agent = agent.with(
                    &format!(".1.3.6.1.4.1.22425.10.5.3.5.1.{column}.{channel}"),
                    AttributeValue::Counter(0),
                );
            }
        }
        let (codec, agent) = codec(agent);

        let status = codec.status().await.unwrap();

        assert_eq!(status.unit_name, "OB-VAN");
        assert_eq!(status.rx_streams.len(), 1);
        assert_eq!(status.rx_streams[0].name, "Inbound");
        assert_eq!(status.counters, ReceiveCounters::default());
        assert_eq!(agent.opens(), 1);
    }
}
