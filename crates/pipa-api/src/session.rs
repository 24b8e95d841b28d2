use std::future::Future;

use crate::error::Error;
use crate::identifier::Identifier;
use crate::transport::TransportConfig;
use crate::value::AttributeEntry;

/// An open query session against one agent.
///
/// Implementations own the wire protocol: encoding, timeouts, and retries
/// all happen behind this trait.
pub trait TreeSession {
    /// Walk the tree starting at `root`.
    ///
    /// Entries come back in ascending identifier order. The walk may run
    /// past the end of the subtree; callers that need strict containment
    /// must filter.
    fn bulk_walk(
        &mut self,
        root: &Identifier,
    ) -> impl Future<Output = Result<Vec<AttributeEntry>, Error>> + Send;

    /// Read a single scalar.
    fn get(
        &mut self,
        identifier: &Identifier,
    ) -> impl Future<Output = Result<AttributeEntry, Error>> + Send;
}

/// Opens [`TreeSession`]s.
pub trait Connector {
    type Session: TreeSession + Send;

    fn open(
        &self,
        config: &TransportConfig,
    ) -> impl Future<Output = Result<Self::Session, Error>> + Send;
}
