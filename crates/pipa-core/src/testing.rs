// In-memory agent used by the unit tests.
//
// Holds a sorted tree of values and answers walks the way a real agent
// does: starting strictly after the requested identifier and running a
// few entries past the end of the subtree.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, HashSet};
use std::net::Ipv4Addr;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pipa_api::{
    AttributeEntry, AttributeValue, Connector, Error, Identifier, TransportConfig, TreeSession,
};

use crate::templates::StreamColumn;

pub(crate) fn id(s: &str) -> Identifier {
    s.parse().unwrap()
}

#[derive(Default)]
pub(crate) struct FakeAgent {
    tree: Mutex<BTreeMap<Identifier, AttributeValue>>,
    failing: HashSet<Identifier>,
    overrun: usize,
    refuse_open: bool,
    opens: AtomicUsize,
    walks: Mutex<Vec<Identifier>>,
}

impl FakeAgent {
    pub(crate) fn new() -> Self {
        Self {
            overrun: 3,
            ..Self::default()
        }
    }

    pub(crate) fn with(self, identifier: &str, value: AttributeValue) -> Self {
        self.tree.lock().unwrap().insert(id(identifier), value);
        self
    }

    /// Populate the three stream columns, one row per tuple.
    pub(crate) fn with_streams(self, rows: &[(i64, &str, &str)]) -> Self {
        {
            let mut tree = self.tree.lock().unwrap();
            for (index, (enabled, name, destination)) in (0_u64..).zip(rows) {
                tree.insert(
                    StreamColumn::Enabled.identifier().child(index),
                    AttributeValue::Integer(*enabled),
                );
                tree.insert(
                    StreamColumn::Name.identifier().child(index),
                    AttributeValue::Text((*name).to_owned()),
                );
                let destination = match destination.parse::<Ipv4Addr>() {
                    Ok(addr) => AttributeValue::IpAddress(addr),
                    Err(_) => AttributeValue::Text((*destination).to_owned()),
                };
                tree.insert(StreamColumn::DestinationAddress.identifier().child(index), destination);
            }
        }
        self
    }

    pub(crate) fn without(self, identifier: &Identifier) -> Self {
        self.tree.lock().unwrap().remove(identifier);
        self
    }

    pub(crate) fn failing_walk(mut self, root: Identifier) -> Self {
        self.failing.insert(root);
        self
    }

    pub(crate) fn refusing_open(mut self) -> Self {
        self.refuse_open = true;
        self
    }

    pub(crate) fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub(crate) fn walks(&self) -> Vec<Identifier> {
        self.walks.lock().unwrap().clone()
    }

    fn walk(&self, root: &Identifier) -> Result<Vec<AttributeEntry>, Error> {
        self.walks.lock().unwrap().push(root.clone());
        if self.failing.contains(root) {
            return Err(Error::Timeout {
                attempts: 1,
                timeout_secs: 5,
            });
        }

        let tree = self.tree.lock().unwrap();
        let mut entries = Vec::new();
        let mut past_edge = 0;
        for (identifier, value) in tree.range((Bound::Excluded(root.clone()), Bound::Unbounded)) {
            if !root.contains(identifier) {
                if past_edge == self.overrun {
                    break;
                }
                past_edge += 1;
            }
            entries.push(AttributeEntry::new(identifier.clone(), value.clone()));
        }
        Ok(entries)
    }

    fn get(&self, identifier: &Identifier) -> Result<AttributeEntry, Error> {
        self.tree
            .lock()
            .unwrap()
            .get(identifier)
            .map(|value| AttributeEntry::new(identifier.clone(), value.clone()))
            .ok_or_else(|| Error::NoSuchObject(identifier.clone()))
    }
}

pub(crate) struct FakeSession {
    agent: Arc<FakeAgent>,
}

impl TreeSession for FakeSession {
    async fn bulk_walk(&mut self, root: &Identifier) -> Result<Vec<AttributeEntry>, Error> {
        self.agent.walk(root)
    }

    async fn get(&mut self, identifier: &Identifier) -> Result<AttributeEntry, Error> {
        self.agent.get(identifier)
    }
}

impl FakeAgent {
    pub(crate) fn session(self: &Arc<Self>) -> FakeSession {
        FakeSession {
            agent: Arc::clone(self),
        }
    }
}

#[derive(Clone)]
pub(crate) struct FakeConnector {
    pub(crate) agent: Arc<FakeAgent>,
}

impl FakeConnector {
    pub(crate) fn new(agent: FakeAgent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}

impl Connector for FakeConnector {
    type Session = FakeSession;

    async fn open(&self, config: &TransportConfig) -> Result<FakeSession, Error> {
        self.agent.opens.fetch_add(1, Ordering::SeqCst);
        if self.agent.refuse_open {
            return Err(Error::Connect {
                target: config.socket_target(),
                source: std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "refused"),
            });
        }
        Ok(self.agent.session())
    }
}
