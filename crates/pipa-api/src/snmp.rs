// SNMP session over snmp2
//
// Wraps `snmp2::AsyncSession` with per-request timeouts, retry budget,
// and conversion of borrowed response values into owned entries.
// Walks use GETBULK on v2c and GETNEXT on v1.
//
// Every retry goes out on a freshly bound socket. snmp2 reuses the request
// id of a timed-out attempt, so a late reply left queued on the old socket
// would otherwise be read as the answer to the next request.

use std::net::Ipv4Addr;

use secrecy::ExposeSecret;
use snmp2::{AsyncSession, Oid, Value};
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::error::Error;
use crate::identifier::Identifier;
use crate::session::{Connector, TreeSession};
use crate::transport::{SnmpVersion, TransportConfig, retry_or_give_up};
use crate::value::{AttributeEntry, AttributeValue};

/// SNMPv1 `noSuchName`, returned when GETNEXT runs off the end of the MIB.
const ERROR_STATUS_NO_SUCH_NAME: u32 = 2;

/// One decoded varbind from a response.
enum Fetched {
    Entry(AttributeEntry),
    /// `endOfMibView`, `noSuchObject`, or `noSuchInstance`.
    Exhausted,
}

/// Why an attempt produced nothing usable.
#[derive(Debug, Clone, Copy)]
enum Miss {
    TimedOut,
    /// The datagram read answered an earlier, abandoned request.
    StaleReply,
}

/// Live session against one agent.
pub struct SnmpSession {
    session: AsyncSession,
    config: TransportConfig,
    target: String,
}

impl SnmpSession {
    /// Open a session. Only binds a local UDP socket; nothing is sent yet.
    pub async fn open(config: &TransportConfig) -> Result<Self, Error> {
        let target = config.socket_target();
        let session = bind(config, &target).await?;

        debug!(target = %target, version = ?config.version, "SNMP session opened");

        Ok(Self {
            session,
            config: config.clone(),
            target,
        })
    }

    /// Fetch the next batch of entries following `cursor`.
    async fn next_batch(&mut self, cursor: &Identifier) -> Result<Vec<Fetched>, Error> {
        match self.config.version {
            SnmpVersion::V1 => self.getnext(cursor).await,
            SnmpVersion::V2c => self.getbulk(cursor).await,
        }
    }

    async fn getbulk(&mut self, cursor: &Identifier) -> Result<Vec<Fetched>, Error> {
        let oid = to_oid(cursor)?;
        let max_repetitions = self.config.max_repetitions.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            trace!(%cursor, attempt, max_repetitions, "GETBULK");
            let miss = match timeout(
                self.config.timeout,
                self.session.getbulk(&[&oid], 0, max_repetitions),
            )
            .await
            {
                Ok(Ok(pdu)) => {
                    check_error_status(pdu.error_status, pdu.error_index)?;
                    return pdu.varbinds.map(|(oid, value)| decode(&oid, value)).collect();
                }
                Ok(Err(snmp2::Error::RequestIdMismatch)) => Miss::StaleReply,
                Ok(Err(e)) => return Err(e.into()),
                Err(_elapsed) => Miss::TimedOut,
            };
            self.recover(attempt, miss).await?;
        }
    }

    async fn getnext(&mut self, cursor: &Identifier) -> Result<Vec<Fetched>, Error> {
        let oid = to_oid(cursor)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            trace!(%cursor, attempt, "GETNEXT");
            let miss = match timeout(self.config.timeout, self.session.getnext(&oid)).await {
                Ok(Ok(pdu)) => {
                    if pdu.error_status == ERROR_STATUS_NO_SUCH_NAME {
                        return Ok(vec![Fetched::Exhausted]);
                    }
                    check_error_status(pdu.error_status, pdu.error_index)?;
                    return pdu.varbinds.map(|(oid, value)| decode(&oid, value)).collect();
                }
                Ok(Err(snmp2::Error::RequestIdMismatch)) => Miss::StaleReply,
                Ok(Err(e)) => return Err(e.into()),
                Err(_elapsed) => Miss::TimedOut,
            };
            self.recover(attempt, miss).await?;
        }
    }

    async fn get_one(&mut self, identifier: &Identifier) -> Result<Fetched, Error> {
        let oid = to_oid(identifier)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            trace!(%identifier, attempt, "GET");
            let miss = match timeout(self.config.timeout, self.session.get(&oid)).await {
                Ok(Ok(pdu)) => {
                    if pdu.error_status == ERROR_STATUS_NO_SUCH_NAME {
                        return Ok(Fetched::Exhausted);
                    }
                    check_error_status(pdu.error_status, pdu.error_index)?;
                    let mut decoded = pdu
                        .varbinds
                        .map(|(oid, value)| decode(&oid, value))
                        .collect::<Result<Vec<_>, _>>()?;
                    return decoded
                        .pop()
                        .ok_or_else(|| Error::Protocol("empty GET response".into()));
                }
                Ok(Err(snmp2::Error::RequestIdMismatch)) => Miss::StaleReply,
                Ok(Err(e)) => return Err(e.into()),
                Err(_elapsed) => Miss::TimedOut,
            };
            self.recover(attempt, miss).await?;
        }
    }

    /// Spend one attempt of the budget and rebind before the next one.
    async fn recover(&mut self, attempt: u32, miss: Miss) -> Result<(), Error> {
        let attempts = self.config.attempts();
        match miss {
            Miss::TimedOut => retry_or_give_up(attempt, attempts, self.config.timeout)?,
            Miss::StaleReply if attempt >= attempts => {
                return Err(snmp2::Error::RequestIdMismatch.into());
            }
            Miss::StaleReply => {
                debug!(attempt, attempts, "discarded reply to an earlier request, retrying");
            }
        }
        self.session = bind(&self.config, &self.target).await?;
        Ok(())
    }
}

/// Bind a local socket connected to `target`.
async fn bind(config: &TransportConfig, target: &str) -> Result<AsyncSession, Error> {
    let community = config.community.expose_secret().as_bytes();
    match config.version {
        SnmpVersion::V1 => AsyncSession::new_v1(target, community, 0).await,
        SnmpVersion::V2c => AsyncSession::new_v2c(target, community, 0).await,
    }
    .map_err(|source| Error::Connect {
        target: target.to_owned(),
        source,
    })
}

impl TreeSession for SnmpSession {
    async fn bulk_walk(&mut self, root: &Identifier) -> Result<Vec<AttributeEntry>, Error> {
        let mut entries = Vec::new();
        let mut cursor = root.clone();

        'walk: loop {
            let batch = self.next_batch(&cursor).await?;
            if batch.is_empty() {
                break;
            }

            // The whole batch is kept, including entries past the subtree;
            // the walk only stops requesting once it has crossed the edge.
            let mut crossed_edge = false;
            for fetched in batch {
                let entry = match fetched {
                    Fetched::Entry(entry) => entry,
                    Fetched::Exhausted => break 'walk,
                };
                if entry.identifier <= cursor {
                    return Err(Error::NotIncreasing {
                        previous: cursor,
                        returned: entry.identifier,
                    });
                }
                crossed_edge |= !root.contains(&entry.identifier);
                cursor = entry.identifier.clone();
                entries.push(entry);
            }

            if crossed_edge {
                break;
            }
        }

        debug!(%root, returned = entries.len(), "walk finished");
        Ok(entries)
    }

    async fn get(&mut self, identifier: &Identifier) -> Result<AttributeEntry, Error> {
        match self.get_one(identifier).await? {
            Fetched::Entry(entry) => Ok(entry),
            Fetched::Exhausted => Err(Error::NoSuchObject(identifier.clone())),
        }
    }
}

/// Opens real [`SnmpSession`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnmpConnector;

impl Connector for SnmpConnector {
    type Session = SnmpSession;

    async fn open(&self, config: &TransportConfig) -> Result<SnmpSession, Error> {
        SnmpSession::open(config).await
    }
}

// ── Conversion helpers ──────────────────────────────────────────────

fn check_error_status(status: u32, index: u32) -> Result<(), Error> {
    if status == 0 {
        Ok(())
    } else {
        Err(Error::Protocol(format!(
            "agent returned error-status {status} at index {index}"
        )))
    }
}

fn to_oid(identifier: &Identifier) -> Result<Oid<'static>, Error> {
    Oid::from(identifier.segments()).map_err(|e| Error::InvalidIdentifier {
        input: identifier.to_string(),
        reason: format!("{e:?}"),
    })
}

fn from_oid(oid: &Oid<'_>) -> Result<Identifier, Error> {
    oid.iter()
        .map(|arcs| Identifier::new(arcs.collect::<Vec<u64>>()))
        .ok_or_else(|| Error::Protocol(format!("identifier segment out of range: {oid:?}")))
}

fn decode(oid: &Oid<'_>, value: Value<'_>) -> Result<Fetched, Error> {
    let value = match value {
        Value::EndOfMibView | Value::NoSuchObject | Value::NoSuchInstance => {
            return Ok(Fetched::Exhausted);
        }
        Value::Integer(n) => AttributeValue::Integer(n),
        Value::OctetString(bytes) => {
            AttributeValue::Text(String::from_utf8_lossy(bytes).into_owned())
        }
        Value::IpAddress(octets) => AttributeValue::IpAddress(Ipv4Addr::from(octets)),
        Value::Counter32(n) | Value::Unsigned32(n) => AttributeValue::Counter(u64::from(n)),
        Value::Counter64(n) => AttributeValue::Counter(n),
        Value::Timeticks(n) => AttributeValue::TimeTicks(n),
        Value::ObjectIdentifier(ref target) => AttributeValue::ObjectId(from_oid(target)?),
        Value::Null => AttributeValue::Null,
        other => AttributeValue::Other(format!("{other:?}")),
    };
    Ok(Fetched::Entry(AttributeEntry::new(from_oid(oid)?, value)))
}
