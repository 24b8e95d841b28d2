// pipa-api: async SNMP tree-query client for Broadcom PIPA audio codecs

pub mod error;
pub mod identifier;
pub mod session;
pub mod snmp;
pub mod transport;
pub mod value;

pub use error::Error;
pub use identifier::Identifier;
pub use session::{Connector, TreeSession};
pub use snmp::{SnmpConnector, SnmpSession};
pub use transport::{DEFAULT_PORT, SnmpVersion, TransportConfig};
pub use value::{AttributeEntry, AttributeValue, ValueKind};
